//! Runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [storage]
//! data_dir = ".swastha"
//! key = "user"
//!
//! [assistant]
//! thinking_delay_ms = 1500
//! booking_delay_ms = 2000
//! redirect_delay_ms = 3000
//!
//! [triage]
//! rules_file = "rules/triage.toml"
//!
//! [location]
//! enabled = true
//! latitude = 28.6139
//! longitude = 77.2090
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use swastha_contracts::{
    error::{SwasthaError, SwasthaResult},
    location::Coordinates,
};
use swastha_triage::SymptomClassifier;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwasthaConfig {
    pub storage: StorageConfig,
    pub assistant: AssistantConfig,
    pub triage: TriageConfig,
    pub location: LocationConfig,
}

/// Where the session record is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Fixed storage key; the record lives at `<data_dir>/<key>.json`.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".swastha"),
            key: "user".to_string(),
        }
    }
}

/// Simulated delays, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Before an assessment reply is shown.
    pub thinking_delay_ms: u64,
    /// Before a booking confirmation is shown ("searching for a hospital").
    pub booking_delay_ms: u64,
    /// After a booking, before switching to the dashboard.
    pub redirect_delay_ms: u64,
}

impl AssistantConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn booking_delay(&self) -> Duration {
        Duration::from_millis(self.booking_delay_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 1500,
            booking_delay_ms: 2000,
            redirect_delay_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Optional rule file replacing the built-in keyword lists.
    pub rules_file: Option<PathBuf>,
}

/// The simulated device location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// `false` behaves like a user who refuses the permission prompt.
    pub enabled: bool,
    /// Both must be set for a position to be available.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationConfig {
    /// The configured position, `None` when either half is unset.
    ///
    /// Out-of-range values are a `ConfigError`.
    pub fn coordinates(&self) -> SwasthaResult<Option<Coordinates>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon).map(Some).ok_or_else(|| {
                SwasthaError::ConfigError {
                    reason: format!("location ({}, {}) is out of range", lat, lon),
                }
            }),
            _ => Ok(None),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: Some(28.6139),
            longitude: Some(77.2090),
        }
    }
}

impl SwasthaConfig {
    /// Parse `s` as TOML.
    pub fn from_toml_str(s: &str) -> SwasthaResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| SwasthaError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        // Out-of-range coordinates fail here, not at booking time.
        config.location.coordinates()?;
        Ok(config)
    }

    /// Read and parse the file at `path`.
    pub fn from_file(path: &Path) -> SwasthaResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SwasthaError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Self::from_toml_str(&contents)
    }

    /// Build the classifier: the configured rule file, or the built-in lists.
    pub fn classifier(&self) -> SwasthaResult<SymptomClassifier> {
        match &self.triage.rules_file {
            Some(path) => SymptomClassifier::from_file(path),
            None => Ok(SymptomClassifier::default()),
        }
    }
}
