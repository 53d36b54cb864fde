//! Root configuration

use super::{CacheConfig, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cache provider and backing store settings
    pub cache: CacheConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}
