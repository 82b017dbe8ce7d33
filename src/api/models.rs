use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Credentials and endpoint used to sign every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub secret: String,
    pub base_url: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum RecordType {
    A,
    Aaaa,
    Mx,
    Aname,
    Cname,
    Ns,
    Txt,
    Srv,
}

/// Which type-conditional fields a record type carries on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFields {
    pub prio: bool,
    pub port: bool,
    pub weight: bool,
}

const NO_FIELDS: TypeFields = TypeFields {
    prio: false,
    port: false,
    weight: false,
};

impl RecordType {
    pub const ALL: [RecordType; 8] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Mx,
        RecordType::Aname,
        RecordType::Cname,
        RecordType::Ns,
        RecordType::Txt,
        RecordType::Srv,
    ];

    pub const fn fields(self) -> TypeFields {
        match self {
            RecordType::Mx => TypeFields {
                prio: true,
                ..NO_FIELDS
            },
            RecordType::Srv => TypeFields {
                prio: true,
                port: true,
                weight: true,
            },
            _ => NO_FIELDS,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Mx => "MX",
            RecordType::Aname => "ANAME",
            RecordType::Cname => "CNAME",
            RecordType::Ns => "NS",
            RecordType::Txt => "TXT",
            RecordType::Srv => "SRV",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported record type: {}", s))
    }
}

impl TryFrom<String> for RecordType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsZone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(
        rename = "updateTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub update_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub r#type: RecordType,
    pub name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub zone: DnsZone,
}

impl DnsRecord {
    /// Drop the fields its type does not carry.
    pub fn project(mut self) -> Self {
        let fields = self.r#type.fields();
        if !fields.prio {
            self.prio = None;
        }
        if !fields.port {
            self.port = None;
        }
        if !fields.weight {
            self.weight = None;
        }
        self
    }
}

/// `{status, item}` wrapper returned by create, update and delete.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: String,
    pub item: Option<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(r#type: RecordType) -> DnsRecord {
        DnsRecord {
            id: None,
            r#type,
            name: "_sip._tcp".to_string(),
            content: "sip.example.com".to_string(),
            prio: Some(10),
            port: Some(5060),
            weight: Some(20),
            ttl: 600,
            note: None,
            zone: DnsZone {
                name: "example.com".to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn projection_keeps_only_type_fields() {
        for t in RecordType::ALL {
            let projected = record(t).project();
            match t {
                RecordType::Srv => {
                    assert_eq!(projected.prio, Some(10));
                    assert_eq!(projected.port, Some(5060));
                    assert_eq!(projected.weight, Some(20));
                }
                RecordType::Mx => {
                    assert_eq!(projected.prio, Some(10));
                    assert_eq!(projected.port, None);
                    assert_eq!(projected.weight, None);
                }
                _ => {
                    assert_eq!(projected.prio, None, "{} must not carry prio", t);
                    assert_eq!(projected.port, None);
                    assert_eq!(projected.weight, None);
                }
            }
        }
    }

    #[test]
    fn record_type_parses_case_insensitively() {
        assert_eq!("mx".parse::<RecordType>(), Ok(RecordType::Mx));
        assert_eq!("Aaaa".parse::<RecordType>(), Ok(RecordType::Aaaa));
        assert!("CAA".parse::<RecordType>().is_err());
        assert_eq!(
            serde_json::from_str::<RecordType>(r#""srv""#).unwrap(),
            RecordType::Srv
        );
        assert_eq!(serde_json::to_string(&RecordType::Aname).unwrap(), r#""ANAME""#);
    }

    #[test]
    fn record_json_round_trip() {
        let mut original = record(RecordType::Srv);
        original.id = Some(7);
        original.note = Some("voip".to_string());
        original.zone.id = Some(3);
        original.zone.update_time = Some(1_700_000_000);

        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: DnsRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn a_record_wire_shape_omits_absent_fields() {
        let record = DnsRecord {
            id: None,
            r#type: RecordType::A,
            name: "www".to_string(),
            content: "1.2.3.4".to_string(),
            prio: Some(5),
            port: None,
            weight: None,
            ttl: 300,
            note: None,
            zone: DnsZone {
                name: "example.com".to_string(),
                ..Default::default()
            },
        }
        .project();

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "type": "A",
                "name": "www",
                "content": "1.2.3.4",
                "ttl": 300,
                "zone": {"name": "example.com"}
            })
        );
    }

    #[test]
    fn envelope_tolerates_missing_status_and_item() {
        let response: ApiResponse<DnsRecord> = serde_json::from_value(json!({
            "item": {"id": 9, "type": "NS", "name": "@", "content": "ns1.example.com"}
        }))
        .unwrap();
        assert_eq!(response.status, "");
        assert_eq!(response.item.unwrap().id, Some(9));

        let response: ApiResponse<DnsRecord> =
            serde_json::from_value(json!({"status": "success"})).unwrap();
        assert!(response.item.is_none());
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = Credentials {
            api_key: "key".to_string(),
            secret: "hunter2".to_string(),
            base_url: "https://rest.websupport.sk".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
