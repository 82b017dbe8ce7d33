use super::models::*;
use crate::errors::ClientError;
use async_trait::async_trait;

#[async_trait]
pub trait DnsApiClient: Send + Sync {
    /// Creates `record` in the zone named by `record.zone.name`.
    async fn create_record(&self, record: &DnsRecord) -> Result<DnsRecord, ClientError>;
    async fn read_record(&self, zone: &str, id: &str) -> Result<DnsRecord, ClientError>;
    /// Updates record `id` in the zone named by `record.zone.name`.
    async fn update_record(&self, id: &str, record: &DnsRecord) -> Result<DnsRecord, ClientError>;
    async fn delete_record(&self, zone: &str, id: &str) -> Result<(), ClientError>;
}
