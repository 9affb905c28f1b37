//! Trait seams between the runtime and its environment.
//!
//! - `SessionStore`:     where the single session record lives
//! - `LocationProvider`: stands in for the device's geolocation service
//!
//! Front ends pick the implementations; the runtime only sees the traits.

use swastha_contracts::{
    error::SwasthaResult,
    location::Coordinates,
    profile::UserProfile,
};

/// The explicit load/save boundary for the session record.
///
/// There is exactly one record per store. Implementations must treat
/// `save()` as a full replacement of whatever was stored before.
pub trait SessionStore: Send + Sync {
    /// Read the current record.
    ///
    /// `Ok(None)` means nobody is signed in. Callers redirect to login on
    /// `None`; it is not an error.
    fn load(&self) -> SwasthaResult<Option<UserProfile>>;

    /// Replace the stored record with `profile`.
    fn save(&self, profile: &UserProfile) -> SwasthaResult<()>;

    /// Remove the record. Clearing an empty store succeeds.
    fn clear(&self) -> SwasthaResult<()>;
}

/// Resolves the user's current position.
///
/// Errors are surfaced to the user as a notice; the booking flow stops there.
pub trait LocationProvider: Send + Sync {
    fn locate(&self) -> SwasthaResult<Coordinates>;
}
