use std::fmt;

use fleet_core::{ErrorInfo, PageMeta, PageResult, RequestId};
use serde::Deserialize;

/// Backend record as returned by the list endpoint, before view-model mapping.
pub type RawRecord = serde_json::Value;

/// Body of a successful list call: `{ "data": [...], "meta": {...} }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: Vec<RawRecord>,
    #[serde(default)]
    pub meta: Option<ResponseMeta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ResponseMeta {
    pub current_page: u32,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl From<ResponseMeta> for PageMeta {
    fn from(meta: ResponseMeta) -> Self {
        PageMeta {
            current_page: meta.current_page,
            last_page: meta.last_page,
            total_count: meta.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent<V> {
    PageFetched {
        request_id: RequestId,
        result: Result<PageResult<V>, ErrorInfo>,
    },
}

impl<V> EngineEvent<V> {
    pub fn into_msg(self) -> fleet_core::Msg<V> {
        match self {
            EngineEvent::PageFetched {
                request_id,
                result: Ok(result),
            } => fleet_core::Msg::PageLoaded { request_id, result },
            EngineEvent::PageFetched {
                request_id,
                result: Err(error),
            } => fleet_core::Msg::PageFailed { request_id, error },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
    /// Error code reported by the backend, if it sent one.
    pub code: Option<String>,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl From<ApiError> for ErrorInfo {
    fn from(err: ApiError) -> Self {
        ErrorInfo {
            message: err.message,
            code: err.code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
    /// Failure reported by a non-HTTP `ListApi` implementation.
    Backend,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Backend => write!(f, "backend error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(#[source] std::io::Error),
}
