//! Appointment records and their status state machine.
//!
//! Appointments are created by the booking flow (chat triage or demo seed
//! data), mutated only by cancellation, and never deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque appointment identifier, e.g. `"app-1"` or `"app-1718000000000"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(pub String);

impl AppointmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for an appointment booked at `at`: `"app-<epoch millis>"`.
    pub fn from_booking_time(at: DateTime<Utc>) -> Self {
        Self(format!("app-{}", at.timestamp_millis()))
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of an appointment.
///
/// ```text
/// confirmed ──┐
///             ├── cancel ──▶ cancelled   (terminal)
/// pending  ───┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    /// Apply the single defined transition. `Cancelled` stays `Cancelled`.
    pub fn cancel(self) -> Self {
        AppointmentStatus::Cancelled
    }

    pub fn is_cancelled(self) -> bool {
        self == AppointmentStatus::Cancelled
    }

    /// Capitalized label used by the front ends ("Confirmed", ...).
    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single hospital appointment held in the session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub hospital_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    /// Why the visit was booked, e.g. "Follow-up consultation".
    pub reason_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Appointment {
    /// True while the appointment is still ahead of `now` and not cancelled.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_cancelled() && self.scheduled_at > now
    }
}
