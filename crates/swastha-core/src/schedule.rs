//! Appointment partitioning and cancellation.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use swastha_contracts::{
    appointment::{Appointment, AppointmentId},
    profile::UserProfile,
};

/// Appointments split into the two buckets the front ends display.
///
/// Every input appointment lands in exactly one bucket, and input order is
/// kept within each bucket.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    /// Not cancelled and strictly after `now`.
    pub upcoming: Vec<&'a Appointment>,
    /// At or before `now`, or cancelled.
    pub past: Vec<&'a Appointment>,
}

impl Partition<'_> {
    pub fn len(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `appointments` into upcoming and past relative to `now`.
///
/// An appointment scheduled for exactly `now` is past.
pub fn partition(now: DateTime<Utc>, appointments: &[Appointment]) -> Partition<'_> {
    let (upcoming, past): (Vec<_>, Vec<_>) =
        appointments.iter().partition(|a| a.is_upcoming(now));
    Partition { upcoming, past }
}

/// Cancel the appointment with `id`.
///
/// Returns whether a record matched. A missing id is a silent no-op, and
/// cancelling an already-cancelled appointment leaves it cancelled.
pub fn cancel_appointment(profile: &mut UserProfile, id: &AppointmentId) -> bool {
    let Some(appointment) = profile.appointment_mut(id) else {
        debug!(appointment_id = %id, "cancel requested for unknown appointment; ignoring");
        return false;
    };

    let previous = appointment.status;
    appointment.status = previous.cancel();

    info!(
        appointment_id = %id,
        from = %previous,
        to = %appointment.status,
        "appointment cancelled"
    );
    true
}

/// The first `n` appointments in stored order, for the dashboard card.
pub fn recent(profile: &UserProfile, n: usize) -> &[Appointment] {
    &profile.appointments[..profile.appointments.len().min(n)]
}
