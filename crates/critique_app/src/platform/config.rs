//! Optional `critique.ron` configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use critique_core::{ShellTiers, TierPolicy};
use critique_engine::ClientSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Every field is optional in the file; absent fields keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub state_dir: PathBuf,
    pub export_dir: PathBuf,
    pub log: LogDestination,
    pub primary_tiers: TierPolicy,
    pub sidebar_tiers: TierPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: client.endpoint,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_response_bytes: client.max_response_bytes,
            state_dir: PathBuf::from("./.critique_state"),
            export_dir: PathBuf::from("./exports"),
            log: LogDestination::default(),
            primary_tiers: TierPolicy::primary(),
            sidebar_tiers: TierPolicy::sidebar(),
        }
    }
}

impl AppConfig {
    /// `Ok(None)` when there is no file at `path`.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
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

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }

    pub fn tiers(&self) -> ShellTiers {
        ShellTiers {
            primary: self.primary_tiers.clone(),
            sidebar: self.sidebar_tiers.clone(),
        }
    }
}
