use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fleet_core::{ScopeContext, DEFAULT_LIMIT};
use fleet_engine::FetchSettings;
use serde::{Deserialize, Serialize};

use crate::logging::LogDestination;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Tenant every request is scoped to unless `--company` overrides it.
    pub tenant: Option<String>,
    pub page_size: u32,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            tenant: None,
            page_size: DEFAULT_LIMIT,
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub fn scope(&self) -> ScopeContext {
        self.tenant
            .clone()
            .map(ScopeContext::tenant)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub list_path: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            base_url: settings.base_url,
            list_path: settings.list_path,
            connect_timeout_ms: settings.connect_timeout.as_millis() as u64,
            request_timeout_ms: settings.request_timeout.as_millis() as u64,
            max_bytes: settings.max_bytes,
        }
    }
}

impl ApiConfig {
    pub fn to_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            list_path: self.list_path.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
        }
    }
}

/// Loads the RON config at `path`. A missing file yields `Ok(None)`.
pub fn load(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
