use std::time::Duration;

use fleet_core::FetchRequest;
use fleet_logging::fleet_debug;
use futures_util::StreamExt;
use serde::Deserialize;
use url::Url;

use crate::{ApiError, FailureKind, ListResponse};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub list_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            list_path: "/api/vehicles".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Paginated list endpoint.
#[async_trait::async_trait]
pub trait ListApi: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<ListResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestListApi {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestListApi {
    pub fn new(settings: FetchSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// `{base_url}{list_path}?page=..&limit=..` followed by the API filters in key order.
    pub fn request_url(&self, request: &FetchRequest) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.list_path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &request.page.to_string());
            query.append_pair("limit", &request.limit.to_string());
            for (key, value) in request.filters.iter() {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ListApi for ReqwestListApi {
    async fn fetch(&self, request: &FetchRequest) -> Result<ListResponse, ApiError> {
        let url = self.request_url(request)?;
        fleet_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;

        if !status.is_success() {
            return Err(backend_error(status, &body));
        }

        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

/// Error body some backends send alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

fn backend_error(status: reqwest::StatusCode, body: &[u8]) -> ApiError {
    let kind = FailureKind::HttpStatus(status.as_u16());
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { message, code }) => {
            let err = ApiError::new(kind, message);
            match code {
                Some(serde_json::Value::String(code)) => err.with_code(code),
                Some(serde_json::Value::Null) | None => err,
                Some(other) => err.with_code(other.to_string()),
            }
        }
        Err(_) => ApiError::new(kind, status.to_string())
            .with_code(format!("http_{}", status.as_u16())),
    }
}

fn too_large(max_bytes: u64, actual: u64) -> ApiError {
    ApiError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
