//! Geographic position reported by a location provider.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Only used to trigger the booking simulation; no distance is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` when either component is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        (lat_ok && lon_ok).then_some(Self { latitude, longitude })
    }
}
