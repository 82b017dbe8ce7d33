use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::Validate;

use crate::api::models::Credentials;
use crate::api::websupport::DEFAULT_API_URL;
use crate::resource::RecordResource;

fn default_api_url() -> Cow<'static, str> {
    Cow::Borrowed(DEFAULT_API_URL)
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Config {
    #[serde(default)]
    #[validate(length(min = 1, message = "API key cannot be empty"))]
    pub api_key: Cow<'static, str>,

    #[serde(default)]
    #[validate(length(min = 1, message = "API secret cannot be empty"))]
    pub api_secret: Cow<'static, str>,

    #[serde(default = "default_api_url")]
    #[validate(length(min = 1, message = "API url cannot be empty"))]
    pub api_url: Cow<'static, str>,

    #[serde(default)]
    #[validate(nested)]
    pub records: Vec<RecordResource>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: Cow::Borrowed(""),
            api_secret: Cow::Borrowed(""),
            api_url: default_api_url(),
            records: Vec::new(),
        }
    }
}

impl Config {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            api_key: self.api_key.to_string(),
            secret: self.api_secret.to_string(),
            base_url: self.api_url.to_string(),
        }
    }
}
