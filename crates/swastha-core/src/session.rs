//! Session lifecycle: login, dashboard seeding, logout.
//!
//! All state goes through a `SessionStore`; nothing here keeps a copy of the
//! record between calls.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use swastha_contracts::{
    appointment::{Appointment, AppointmentId, AppointmentStatus},
    error::{SwasthaError, SwasthaResult},
    profile::UserProfile,
};

use crate::traits::SessionStore;

pub const DEMO_USER_ID: &str = "demo-user";
pub const DEMO_USER_NAME: &str = "Demo User";
pub const DEMO_USER_AGE: u32 = 25;

/// Sign in with any non-empty email and password.
///
/// Writes a fresh demo record (no appointments) and returns it. There is no
/// credential check beyond both fields being present.
pub fn login(store: &dyn SessionStore, email: &str, password: &str) -> SwasthaResult<UserProfile> {
    if email.is_empty() || password.is_empty() {
        debug!("login rejected: empty email or password");
        return Err(SwasthaError::InvalidCredentials);
    }

    let profile = UserProfile {
        id: DEMO_USER_ID.to_string(),
        name: DEMO_USER_NAME.to_string(),
        email: email.to_string(),
        age: DEMO_USER_AGE,
        appointments: Vec::new(),
    };
    store.save(&profile)?;

    info!(user_id = %profile.id, email = %profile.email, "signed in");
    Ok(profile)
}

/// Load the record for the dashboard, seeding demo appointments when it has
/// none.
///
/// `Ok(None)` means no one is signed in; callers show the login screen.
pub fn open_dashboard(
    store: &dyn SessionStore,
    now: DateTime<Utc>,
) -> SwasthaResult<Option<UserProfile>> {
    let Some(mut profile) = store.load()? else {
        debug!("no session record; redirecting to login");
        return Ok(None);
    };

    if profile.appointments.is_empty() {
        profile.appointments = demo_appointments(now);
        store.save(&profile)?;
        info!(
            user_id = %profile.id,
            count = profile.appointments.len(),
            "seeded demo appointments"
        );
    }

    Ok(Some(profile))
}

/// Sign out by clearing the stored record.
pub fn logout(store: &dyn SessionStore) -> SwasthaResult<()> {
    store.clear()?;
    info!("signed out");
    Ok(())
}

/// Cancel `id` and persist the result. Returns whether a record matched;
/// nothing is written when it did not.
pub fn cancel_and_save(
    store: &dyn SessionStore,
    profile: &mut UserProfile,
    id: &AppointmentId,
) -> SwasthaResult<bool> {
    let matched = crate::schedule::cancel_appointment(profile, id);
    if matched {
        store.save(profile)?;
    }
    Ok(matched)
}

/// The demo appointments, scheduled relative to `now`.
pub fn demo_appointments(now: DateTime<Utc>) -> Vec<Appointment> {
    vec![
        Appointment {
            id: AppointmentId::new("app-1"),
            hospital_name: "City General Hospital".to_string(),
            scheduled_at: now + Duration::hours(24),
            status: AppointmentStatus::Confirmed,
            reason_text: "Chest pain evaluation".to_string(),
            address: Some("123 Medical Center Dr, City, State 12345".to_string()),
            phone: Some("(555) 123-4567".to_string()),
        },
        Appointment {
            id: AppointmentId::new("app-2"),
            hospital_name: "Community Health Center".to_string(),
            scheduled_at: now + Duration::days(7),
            status: AppointmentStatus::Pending,
            reason_text: "Follow-up consultation".to_string(),
            address: Some("456 Healthcare Ave, City, State 12345".to_string()),
            phone: Some("(555) 987-6543".to_string()),
        },
        Appointment {
            id: AppointmentId::new("app-3"),
            hospital_name: "Emergency Medical Center".to_string(),
            scheduled_at: now + Duration::hours(1),
            status: AppointmentStatus::Confirmed,
            reason_text: "Emergency consultation based on AI assessment".to_string(),
            address: Some("789 Emergency Blvd, City, State 12345".to_string()),
            phone: Some("(555) 911-1234".to_string()),
        },
    ]
}
