//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use runtime::RuntimeConfig;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    pub log_dir: PathBuf,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_LOG_DIR` - Directory for the daily log file (default: ./logs)
    /// - plus everything [`RuntimeConfig::from_env`] reads
    pub fn from_env() -> Self {
        Self {
            runtime: RuntimeConfig::from_env(),
            log_dir: env::var_os("BATTLE_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
        }
    }
}
