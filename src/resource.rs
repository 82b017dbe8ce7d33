//! Declarative DNS record resource.
//!
//! A [`RecordResource`] is the shape the host tool reads from configuration and
//! persists as state. The functions here drive its lifecycle through any
//! [`DnsApiClient`]: create and update always read the record back so the stored
//! state reflects what the server holds.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::api::models::{DnsRecord, DnsZone, RecordType};
use crate::api::DnsApiClient;
use crate::errors::ClientError;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("invalid id {0:?} specified, should be in format \"zoneName/recordId\" for import")]
    InvalidImportId(String),

    #[error("record {name:?} in zone {zone:?} has no id")]
    MissingId { zone: String, name: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RecordResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[validate(length(min = 1, message = "Zone name cannot be empty"))]
    pub zone_name: String,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    #[validate(length(min = 1, message = "Record name cannot be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "Record content cannot be empty"))]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RecordResource {
    pub fn new(zone_name: &str, record_type: RecordType, name: &str, content: &str) -> Self {
        Self {
            id: None,
            zone_name: zone_name.to_string(),
            record_type,
            name: name.to_string(),
            content: content.to_string(),
            prio: None,
            port: None,
            weight: None,
            ttl: None,
            note: None,
        }
    }

    /// Wire form of this resource. Fields the type does not carry are dropped.
    pub fn to_record(&self) -> DnsRecord {
        DnsRecord {
            id: self.id.as_deref().and_then(|id| id.parse().ok()),
            r#type: self.record_type,
            name: self.name.clone(),
            content: self.content.clone(),
            prio: self.prio,
            port: self.port,
            weight: self.weight,
            ttl: self.ttl.unwrap_or_default(),
            note: self.note.clone(),
            zone: DnsZone {
                name: self.zone_name.clone(),
                ..Default::default()
            },
        }
        .project()
    }

    /// Copies server state into this resource. `prio`, `port` and `weight` are
    /// only taken when the record's type carries them.
    pub fn apply_record(&mut self, record: &DnsRecord) {
        if let Some(id) = record.id {
            self.id = Some(id.to_string());
        }
        self.record_type = record.r#type;
        self.name = record.name.clone();
        self.content = record.content.clone();
        self.ttl = Some(record.ttl);
        self.note = record.note.clone();

        let fields = record.r#type.fields();
        if fields.prio {
            self.prio = record.prio;
        }
        if fields.port {
            self.port = record.port;
        }
        if fields.weight {
            self.weight = record.weight;
        }
    }

    fn require_id(&self) -> Result<&str, ResourceError> {
        self.id.as_deref().ok_or_else(|| ResourceError::MissingId {
            zone: self.zone_name.clone(),
            name: self.name.clone(),
        })
    }
}

/// `zoneName/recordId`, as accepted by [`import`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub zone_name: String,
    pub record_id: String,
}

impl ImportId {
    pub fn parse(id: &str) -> Result<Self, ResourceError> {
        match id.split_once('/') {
            Some((zone, record))
                if !zone.is_empty() && !record.is_empty() && !record.contains('/') =>
            {
                Ok(Self {
                    zone_name: zone.to_string(),
                    record_id: record.to_string(),
                })
            }
            _ => Err(ResourceError::InvalidImportId(id.to_string())),
        }
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.zone_name, self.record_id)
    }
}

pub async fn create<C: DnsApiClient + ?Sized>(
    client: &C,
    resource: &mut RecordResource,
) -> Result<(), ResourceError> {
    resource.validate()?;
    let record = client.create_record(&resource.to_record()).await?;
    if let Some(id) = record.id {
        resource.id = Some(id.to_string());
    }
    info!(
        "Created {} record {} in zone {}",
        resource.record_type, resource.name, resource.zone_name
    );
    read(client, resource).await
}

pub async fn read<C: DnsApiClient + ?Sized>(
    client: &C,
    resource: &mut RecordResource,
) -> Result<(), ResourceError> {
    let id = resource.require_id()?.to_string();
    let record = client.read_record(&resource.zone_name, &id).await?;
    resource.apply_record(&record);
    Ok(())
}

pub async fn update<C: DnsApiClient + ?Sized>(
    client: &C,
    resource: &mut RecordResource,
) -> Result<(), ResourceError> {
    resource.validate()?;
    let id = resource.require_id()?.to_string();
    let record = client.update_record(&id, &resource.to_record()).await?;
    if let Some(id) = record.id {
        resource.id = Some(id.to_string());
    }
    info!(
        "Updated {} record {} in zone {}",
        resource.record_type, resource.name, resource.zone_name
    );
    read(client, resource).await
}

pub async fn delete<C: DnsApiClient + ?Sized>(
    client: &C,
    resource: &RecordResource,
) -> Result<(), ResourceError> {
    let id = resource.require_id()?;
    client.delete_record(&resource.zone_name, id).await?;
    info!("Deleted record {} in zone {}", id, resource.zone_name);
    Ok(())
}

/// Reads an existing record identified by `zoneName/recordId` into a new resource.
pub async fn import<C: DnsApiClient + ?Sized>(
    client: &C,
    id: &str,
) -> Result<RecordResource, ResourceError> {
    let import_id = ImportId::parse(id)?;
    let record = client
        .read_record(&import_id.zone_name, &import_id.record_id)
        .await?;
    info!("Found record {} at {}", record.name, import_id);

    let mut resource = RecordResource::new(
        &import_id.zone_name,
        record.r#type,
        &record.name,
        &record.content,
    );
    resource.id = Some(import_id.record_id);
    resource.apply_record(&record);
    Ok(resource)
}

/// Creates resources without an id and updates the rest, stopping at the first failure.
pub async fn apply_all<C: DnsApiClient + ?Sized>(
    client: &C,
    resources: &mut [RecordResource],
) -> Result<(), ResourceError> {
    for resource in resources.iter_mut() {
        if resource.id.is_some() {
            update(client, resource).await?;
        } else {
            create(client, resource).await?;
        }
    }
    Ok(())
}
