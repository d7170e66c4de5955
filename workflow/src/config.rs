//! Upload configuration.
//!
//! Defaults target a backend on `localhost:3000`. Native builds can override
//! them through the environment (a `.env` file is honored):
//!
//! | Variable                 | Meaning                               |
//! |--------------------------|---------------------------------------|
//! | `IMGUPLOAD_BACKEND_URL`  | Base URL prepended to both endpoints  |
//! | `IMGUPLOAD_TIMEOUT_SECS` | Ceiling for one upload request        |

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::UploadMode;

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Endpoint for single-image uploads.
pub const IMAGE_ENDPOINT: &str = "/api/upload-image";

/// Endpoint for image + collection uploads.
pub const COLLECTION_ENDPOINT: &str = "/api/upload-image-collection";

/// Default request ceiling (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_BACKEND_URL: &str = "IMGUPLOAD_BACKEND_URL";
pub const ENV_TIMEOUT_SECS: &str = "IMGUPLOAD_TIMEOUT_SECS";

/// Where and how uploads are sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    /// Base URL; empty means same origin (browser only).
    pub backend_url: String,
    pub image_endpoint: String,
    pub collection_endpoint: String,
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            image_endpoint: IMAGE_ENDPOINT.to_string(),
            collection_endpoint: COLLECTION_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl UploadConfig {
    /// Config with a custom base URL and default endpoints.
    pub fn with_backend_url(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            ..Self::default()
        }
    }

    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(feature = "native")]
        {
            // Missing .env is fine
            let _ = dotenvy::dotenv();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BACKEND_URL) {
            config.backend_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_TIMEOUT_SECS.to_string(),
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }

    /// Full URL for the mode's endpoint; `None` when no mode is selected.
    pub fn url_for(&self, mode: UploadMode) -> Option<String> {
        let endpoint = match mode {
            UploadMode::None => return None,
            UploadMode::SingleImage => &self.image_endpoint,
            UploadMode::ImageWithCollection => &self.collection_endpoint,
        };
        Some(format!("{}{}", self.backend_url.trim_end_matches('/'), endpoint))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
