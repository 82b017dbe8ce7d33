use std::io::Write;

use super::{client::DnsApiClient, models::*, signing};
use crate::errors::{ApiError, ClientError};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE, DATE, USER_AGENT};
use reqwest::{Method, Request, Url};
use serde::{de::DeserializeOwned, de::IgnoredAny, Serialize};
use tokio::sync::Mutex;

pub const DEFAULT_API_URL: &str = "https://rest.websupport.sk";

const MEDIA_TYPE: &str = "application/json";
const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the Websupport REST API.
///
/// Every request is signed with HMAC-SHA1 over `"{METHOD} {PATH} {unix_seconds}"`
/// and sent with HTTP Basic auth (API key, hex signature). Calls made through one
/// client never overlap on the wire: `request_lock` is held from sending a request
/// until its response body has been read.
pub struct WebsupportClient {
    client: reqwest::Client,
    credentials: Credentials,
    request_lock: Mutex<()>,
}

#[async_trait]
impl DnsApiClient for WebsupportClient {
    async fn create_record(&self, record: &DnsRecord) -> Result<DnsRecord, ClientError> {
        let path = format!("/v1/user/self/zone/{}/record", record.zone.name);
        let request = self.json_request(Method::POST, &path, &record.clone().project())?;
        self.execute_item(request).await
    }

    async fn read_record(&self, zone: &str, id: &str) -> Result<DnsRecord, ClientError> {
        let path = format!("/v1/user/self/zone/{}/record/{}", zone, id);
        let request = self.new_request(Method::GET, &path, None)?;
        self.execute(request).await
    }

    async fn update_record(&self, id: &str, record: &DnsRecord) -> Result<DnsRecord, ClientError> {
        let path = format!("/v1/user/self/zone/{}/record/{}", record.zone.name, id);
        let request = self.json_request(Method::PUT, &path, &record.clone().project())?;
        self.execute_item(request).await
    }

    async fn delete_record(&self, zone: &str, id: &str) -> Result<(), ClientError> {
        let path = format!("/v1/user/self/zone/{}/record/{}", zone, id);
        let request = self.new_request(Method::DELETE, &path, None)?;
        let _: ApiResponse<IgnoredAny> = self.execute(request).await?;
        Ok(())
    }
}

impl WebsupportClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_http_client(reqwest::Client::new(), credentials)
    }

    pub fn with_http_client(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            request_lock: Mutex::new(()),
        }
    }

    /// Builds a signed request for `path` (relative to the base URL).
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, ClientError> {
        if !path.starts_with('/') {
            return Err(ClientError::Construction(format!(
                "path must start with '/': {}",
                path
            )));
        }
        let raw_url = format!("{}{}", self.credentials.base_url.trim_end_matches('/'), path);
        let url = Url::parse(&raw_url)
            .map_err(|e| ClientError::Construction(format!("invalid url {}: {}", raw_url, e)))?;

        let now = Utc::now();
        let signature = signing::sign(
            &self.credentials.secret,
            method.as_str(),
            path,
            now.timestamp(),
        );

        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, MEDIA_TYPE)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(DATE, signing::date_header(&now))
            .basic_auth(&self.credentials.api_key, Some(signature));

        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, MEDIA_TYPE).body(body);
        }

        builder
            .build()
            .map_err(|e| ClientError::Construction(e.to_string()))
    }

    fn json_request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Request, ClientError> {
        let body = serde_json::to_vec(body).map_err(|e| ClientError::Construction(e.to_string()))?;
        self.new_request(method, path, Some(body))
    }

    /// Sends `request` and decodes a successful JSON body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T, ClientError> {
        let body = self.round_trip(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Sends `request` and copies a successful body verbatim into `sink`.
    pub async fn execute_raw<W: Write + ?Sized>(
        &self,
        request: Request,
        sink: &mut W,
    ) -> Result<u64, ClientError> {
        let body = self.round_trip(request).await?;
        let mut reader = body.as_slice();
        Ok(std::io::copy(&mut reader, sink)?)
    }

    async fn execute_item(&self, request: Request) -> Result<DnsRecord, ClientError> {
        let response: ApiResponse<DnsRecord> = self.execute(request).await?;
        response
            .item
            .ok_or(ClientError::EmptyEnvelope(response.status))
    }

    async fn round_trip(&self, request: Request) -> Result<Vec<u8>, ClientError> {
        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!("{} {}", method, path);

        let (status, content_type, body) = {
            let _guard = self.request_lock.lock().await;
            let response = self.client.execute(request).await?;
            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let body = response.bytes().await?;
            (status, content_type, body)
        };

        if status.is_client_error() || status.is_server_error() {
            let error = ApiError::from_response(status, &content_type, &body);
            warn!(
                "{} {} failed with status {}: {}",
                method,
                path,
                status,
                error.to_string().trim_end()
            );
            return Err(error.into());
        }

        Ok(body.to_vec())
    }
}
