//! Configuration-backed `LocationProvider`.

use tracing::warn;

use swastha_contracts::{
    error::{SwasthaError, SwasthaResult},
    location::Coordinates,
};

use crate::{config::LocationConfig, traits::LocationProvider};

/// Message shown when the user has location access turned off.
pub const DENIED_REASON: &str = "Please enable location access to find nearby hospitals.";

/// A location source whose answer is fixed at construction.
///
/// - disabled              → `LocationDenied`
/// - enabled, no position  → `LocationUnsupported`
/// - enabled with position → that position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfiguredLocation {
    enabled: bool,
    position: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(enabled: bool, position: Option<Coordinates>) -> Self {
        Self { enabled, position }
    }

    pub fn from_config(config: &LocationConfig) -> SwasthaResult<Self> {
        Ok(Self::new(config.enabled, config.coordinates()?))
    }

    /// Same position, but access refused. The CLI uses this for
    /// `--deny-location`.
    pub fn denied(self) -> Self {
        Self { enabled: false, ..self }
    }
}

impl LocationProvider for ConfiguredLocation {
    fn locate(&self) -> SwasthaResult<Coordinates> {
        if !self.enabled {
            warn!("location request denied");
            return Err(SwasthaError::LocationDenied {
                reason: DENIED_REASON.to_string(),
            });
        }
        self.position.ok_or_else(|| {
            warn!("location requested but no position source is available");
            SwasthaError::LocationUnsupported
        })
    }
}
