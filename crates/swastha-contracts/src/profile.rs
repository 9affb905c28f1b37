//! The session record: one user profile and its appointments.

use serde::{Deserialize, Serialize};

use crate::appointment::{Appointment, AppointmentId};

/// The single persisted "current user" record.
///
/// Owned exclusively by the local session. It is loaded and saved through a
/// `SessionStore`; nothing else holds a copy between those calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    /// Stored order is preserved by every operation.
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

impl UserProfile {
    pub fn appointment(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| &a.id == id)
    }

    pub fn appointment_mut(&mut self, id: &AppointmentId) -> Option<&mut Appointment> {
        self.appointments.iter_mut().find(|a| &a.id == id)
    }
}
