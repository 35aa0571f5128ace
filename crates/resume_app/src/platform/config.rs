use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::engine_info;
use resume_engine::{UploadSettings, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "resume_parser.ron";
pub const ENDPOINT_ENV: &str = "RESUME_PARSER_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid service endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("{field} must be at least 1 second")]
    ZeroTimeout { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let upload = UploadSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: upload.connect_timeout.as_secs(),
            request_timeout_secs: upload.request_timeout.as_secs(),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("./logs/resume_app.log"),
        }
    }
}

impl AppConfig {
    /// Load from a RON file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: AppConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        engine_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load `path`, apply the environment override and validate.
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_endpoint_override(std::env::var(ENDPOINT_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "connect_timeout_secs",
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "request_timeout_secs",
            });
        }
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };
        let url = url::Url::parse(&self.endpoint).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
