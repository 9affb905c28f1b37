//! # swastha-core
//!
//! The SWASTHA runtime: session lifecycle, appointment scheduling rules, and
//! the triage chat conversation.
//!
//! This crate provides:
//! - The two environment seams (`SessionStore`, `LocationProvider`)
//! - `schedule`: upcoming/past partition and one-way cancellation
//! - `session`: login, dashboard seeding, logout
//! - `assistant`: the `ChatSession` conversation and emergency booking
//! - `config`: TOML configuration with defaults
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swastha_core::{assistant::ChatSession, session, traits::SessionStore};
//! ```

pub mod assistant;
pub mod config;
pub mod location;
pub mod schedule;
pub mod session;
pub mod traits;

pub use assistant::ChatSession;
pub use config::SwasthaConfig;
pub use location::ConfiguredLocation;
pub use schedule::{cancel_appointment, partition, Partition};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use swastha_contracts::{
        appointment::{Appointment, AppointmentId, AppointmentStatus},
        chat::Author,
        error::{SwasthaError, SwasthaResult},
        location::Coordinates,
        profile::UserProfile,
        triage::Severity,
    };
    use swastha_triage::SymptomClassifier;

    use crate::{
        assistant::{ChatSession, EMERGENCY_HOSPITAL, EMERGENCY_REASON, GREETING},
        config::SwasthaConfig,
        location::ConfiguredLocation,
        schedule::{cancel_appointment, partition, recent},
        session,
        traits::{LocationProvider, SessionStore},
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Minimal store that counts writes.
    #[derive(Default)]
    struct CountingStore {
        slot: Mutex<Option<UserProfile>>,
        saves: AtomicUsize,
    }

    impl SessionStore for CountingStore {
        fn load(&self) -> SwasthaResult<Option<UserProfile>> {
            Ok(self.slot.lock().unwrap().clone())
        }
        fn save(&self, profile: &UserProfile) -> SwasthaResult<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.slot.lock().unwrap() = Some(profile.clone());
            Ok(())
        }
        fn clear(&self) -> SwasthaResult<()> {
            *self.slot.lock().unwrap() = None;
            Ok(())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn appt(id: &str, offset: Duration, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: AppointmentId::new(id),
            hospital_name: format!("Hospital {id}"),
            scheduled_at: now() + offset,
            status,
            reason_text: "check-up".to_string(),
            address: None,
            phone: None,
        }
    }

    fn profile_with(appointments: Vec<Appointment>) -> UserProfile {
        UserProfile {
            id: "demo-user".to_string(),
            name: "Demo User".to_string(),
            email: "demo@example.com".to_string(),
            age: 25,
            appointments,
        }
    }

    fn ids(bucket: &[&Appointment]) -> Vec<String> {
        bucket.iter().map(|a| a.id.0.clone()).collect()
    }

    // ── Partition ─────────────────────────────────────────────────────────────

    #[test]
    fn test_future_confirmed_is_upcoming_until_cancelled() {
        let mut profile = profile_with(vec![appt("a", Duration::hours(1), AppointmentStatus::Confirmed)]);

        let before = partition(now(), &profile.appointments);
        assert_eq!(ids(&before.upcoming), vec!["a"]);
        assert!(before.past.is_empty());

        assert!(cancel_appointment(&mut profile, &AppointmentId::new("a")));

        let after = partition(now(), &profile.appointments);
        assert!(after.upcoming.is_empty());
        assert_eq!(ids(&after.past), vec!["a"]);
    }

    #[test]
    fn test_exactly_now_is_past() {
        let list = vec![appt("edge", Duration::zero(), AppointmentStatus::Confirmed)];
        let split = partition(now(), &list);

        assert!(split.upcoming.is_empty());
        assert_eq!(ids(&split.past), vec!["edge"]);
    }

    #[test]
    fn test_partition_is_total_disjoint_and_order_preserving() {
        let list = vec![
            appt("p1", -Duration::days(2), AppointmentStatus::Confirmed),
            appt("u1", Duration::hours(3), AppointmentStatus::Pending),
            appt("c1", Duration::days(5), AppointmentStatus::Cancelled),
            appt("u2", Duration::days(7), AppointmentStatus::Confirmed),
            appt("p2", -Duration::minutes(1), AppointmentStatus::Pending),
            appt("c2", -Duration::days(1), AppointmentStatus::Cancelled),
        ];

        // Sweep the reference time across every boundary in the list.
        for offset_h in -72..=200 {
            let reference = now() + Duration::hours(offset_h);
            let split = partition(reference, &list);

            assert_eq!(split.len(), list.len(), "partition must be total at {reference}");
            for a in &list {
                let in_up = split.upcoming.iter().any(|x| x.id == a.id);
                let in_past = split.past.iter().any(|x| x.id == a.id);
                assert!(in_up ^ in_past, "{} must be in exactly one bucket", a.id);
            }
        }

        let split = partition(now(), &list);
        assert_eq!(ids(&split.upcoming), vec!["u1", "u2"]);
        assert_eq!(ids(&split.past), vec!["p1", "c1", "p2", "c2"]);
    }

    #[test]
    fn test_partition_of_empty_list() {
        let split = partition(now(), &[]);
        assert!(split.is_empty());
    }

    // ── Cancellation ──────────────────────────────────────────────────────────

    #[test]
    fn test_cancel_twice_is_idempotent() {
        let mut profile = profile_with(vec![appt("a", Duration::hours(2), AppointmentStatus::Pending)]);
        let id = AppointmentId::new("a");

        assert!(cancel_appointment(&mut profile, &id));
        assert!(cancel_appointment(&mut profile, &id));
        assert_eq!(profile.appointments[0].status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_cancel_unknown_id_is_silent_noop() {
        let mut profile = profile_with(vec![appt("a", Duration::hours(2), AppointmentStatus::Confirmed)]);
        let snapshot = profile.clone();

        assert!(!cancel_appointment(&mut profile, &AppointmentId::new("missing")));
        assert_eq!(profile, snapshot);
    }

    #[test]
    fn test_cancel_and_save_only_writes_on_match() {
        let store = CountingStore::default();
        let mut profile = profile_with(vec![appt("a", Duration::hours(2), AppointmentStatus::Confirmed)]);

        assert!(!session::cancel_and_save(&store, &mut profile, &AppointmentId::new("zzz")).unwrap());
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);

        assert!(session::cancel_and_save(&store, &mut profile, &AppointmentId::new("a")).unwrap());
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        let stored = store.load().unwrap().unwrap();
        assert!(stored.appointments[0].status.is_cancelled());
    }

    #[test]
    fn test_recent_caps_at_n() {
        let profile = profile_with(vec![
            appt("a", Duration::hours(1), AppointmentStatus::Confirmed),
            appt("b", Duration::hours(2), AppointmentStatus::Confirmed),
        ]);
        assert_eq!(recent(&profile, 3).len(), 2);
        assert_eq!(recent(&profile, 1)[0].id.0, "a");
    }

    // ── Session ───────────────────────────────────────────────────────────────

    #[test]
    fn test_login_writes_demo_record() {
        let store = CountingStore::default();
        let profile = session::login(&store, "asha@example.com", "secret").unwrap();

        assert_eq!(profile.id, session::DEMO_USER_ID);
        assert_eq!(profile.name, session::DEMO_USER_NAME);
        assert_eq!(profile.age, session::DEMO_USER_AGE);
        assert_eq!(profile.email, "asha@example.com");
        assert!(profile.appointments.is_empty());
        assert_eq!(store.load().unwrap(), Some(profile));
    }

    #[test]
    fn test_login_rejects_empty_fields() {
        let store = CountingStore::default();

        for (email, password) in [("", "pw"), ("a@b.c", ""), ("", "")] {
            assert!(matches!(
                session::login(&store, email, password),
                Err(SwasthaError::InvalidCredentials)
            ));
        }
        assert_eq!(store.load().unwrap(), None, "failed login must not write");
    }

    #[test]
    fn test_dashboard_without_record_redirects() {
        let store = CountingStore::default();
        assert_eq!(session::open_dashboard(&store, now()).unwrap(), None);
    }

    #[test]
    fn test_dashboard_seeds_demo_appointments_once() {
        let store = CountingStore::default();
        session::login(&store, "a@b.c", "pw").unwrap();

        let first = session::open_dashboard(&store, now()).unwrap().unwrap();
        assert_eq!(first.appointments.len(), 3);
        assert_eq!(store.saves.load(Ordering::SeqCst), 2, "login + seed");

        let later = now() + Duration::minutes(10);
        let second = session::open_dashboard(&store, later).unwrap().unwrap();
        assert_eq!(second, first, "existing appointments must not be reseeded");
        assert_eq!(store.saves.load(Ordering::SeqCst), 2);

        let split = partition(now(), &second.appointments);
        assert_eq!(split.upcoming.len(), 3);
    }

    #[test]
    fn test_logout_clears_record() {
        let store = CountingStore::default();
        session::login(&store, "a@b.c", "pw").unwrap();
        session::logout(&store).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    // ── Assistant conversation ────────────────────────────────────────────────

    fn chat() -> ChatSession {
        ChatSession::new(SymptomClassifier::default(), now())
    }

    #[test]
    fn test_conversation_starts_with_greeting() {
        let session = chat();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].author, Author::Assistant);
        assert_eq!(session.transcript()[0].text, GREETING);
        assert!(!session.location_prompt_visible());
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut session = chat();
        assert!(session.submit("", now()).is_none());
        assert!(session.submit("   \t\n", now()).is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_minor_reply_does_not_prompt() {
        let mut session = chat();
        let reply = session.submit("I have a cough", now()).unwrap();
        assert_eq!(reply.assessment.severity, Severity::Minor);
        assert_eq!(session.transcript().len(), 2, "user message recorded before the delay");

        let message = session.deliver(reply, now() + Duration::milliseconds(1500));
        assert_eq!(message.author, Author::Assistant);
        assert_eq!(message.severity_flag, Some(false));
        assert!(!session.location_prompt_visible());
    }

    #[test]
    fn test_serious_reply_raises_prompt_and_dismiss_lowers_it() {
        let mut session = chat();
        let reply = session.submit("Sudden CHEST PAIN", now()).unwrap();
        assert!(session.deliver(reply, now()).is_serious());
        assert!(session.location_prompt_visible());

        session.dismiss_location_prompt();
        assert!(!session.location_prompt_visible());
        assert_eq!(session.transcript().len(), 3);
    }

    #[test]
    fn test_denied_location_keeps_prompt_and_books_nothing() {
        let mut session = chat();
        let reply = session.submit("difficulty breathing", now()).unwrap();
        session.deliver(reply, now());

        let denied = ConfiguredLocation::new(false, Coordinates::new(1.0, 1.0));
        match session.request_booking(&denied) {
            Err(SwasthaError::LocationDenied { reason }) => assert!(reason.contains("enable location")),
            other => panic!("expected LocationDenied, got {:?}", other),
        }

        let unsupported = ConfiguredLocation::new(true, None);
        assert!(matches!(
            session.request_booking(&unsupported),
            Err(SwasthaError::LocationUnsupported)
        ));

        assert!(session.location_prompt_visible());
        assert_eq!(session.transcript().len(), 3);
    }

    #[test]
    fn test_failed_booking_then_minor_turn_withdraws_prompt() {
        let mut session = chat();
        let mut profile = profile_with(Vec::new());
        let reply = session.submit("chest pain", now()).unwrap();
        session.deliver(reply, now());

        let denied = ConfiguredLocation::new(true, Coordinates::new(1.0, 1.0)).denied();
        assert!(session.request_booking(&denied).is_err());
        assert!(session.location_prompt_visible());

        let reply = session.submit("just a cough", now()).unwrap();
        let message = session.deliver(reply, now());
        assert!(!message.is_serious());
        assert!(!session.location_prompt_visible(), "minor reply must not keep the booking offer");
        assert!(profile.appointments.is_empty());

        // A later serious turn offers booking again and can complete it.
        let reply = session.submit("now difficulty breathing", now()).unwrap();
        session.deliver(reply, now());
        assert!(session.location_prompt_visible());
        let granted = ConfiguredLocation::new(true, Coordinates::new(28.6, 77.2));
        let pending = session.request_booking(&granted).unwrap();
        session.complete_booking(pending, &mut profile, now());
        assert_eq!(profile.appointments.len(), 1);
    }

    #[test]
    fn test_completed_booking_appends_confirmed_appointment() {
        let mut session = chat();
        let mut profile = profile_with(Vec::new());
        let reply = session.submit("I think it's a stroke", now()).unwrap();
        session.deliver(reply, now());

        let granted = ConfiguredLocation::new(true, Coordinates::new(28.6, 77.2));
        let pending = session.request_booking(&granted).unwrap();
        assert_eq!(pending.coordinates.latitude, 28.6);

        let booked_at = now() + Duration::seconds(2);
        let appointment = session.complete_booking(pending, &mut profile, booked_at);

        assert_eq!(profile.appointments, vec![appointment.clone()]);
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        assert_eq!(appointment.hospital_name, EMERGENCY_HOSPITAL);
        assert_eq!(appointment.reason_text, EMERGENCY_REASON);
        assert_eq!(appointment.scheduled_at, booked_at + Duration::hours(1));
        assert_eq!(appointment.id, AppointmentId::from_booking_time(booked_at));

        assert!(!session.location_prompt_visible());
        let last = session.transcript().last().unwrap();
        assert!(last.text.contains(EMERGENCY_HOSPITAL));
        assert!(last.text.contains("2.3 miles"));

        let split = partition(booked_at, &profile.appointments);
        assert_eq!(split.upcoming.len(), 1);
    }

    #[test]
    fn test_transcript_is_append_only() {
        let mut session = chat();
        let first_id = session.transcript()[0].id.clone();

        let reply = session.submit("headache", now()).unwrap();
        session.deliver(reply, now());
        let reply = session.submit("nausea too", now()).unwrap();
        session.deliver(reply, now());

        assert_eq!(session.transcript().len(), 5);
        assert_eq!(session.transcript()[0].id, first_id);
        assert_eq!(session.transcript()[3].text, "nausea too");
    }

    // ── Location ──────────────────────────────────────────────────────────────

    #[test]
    fn test_configured_location_grants_position() {
        let config = SwasthaConfig::default();
        let locator = ConfiguredLocation::from_config(&config.location).unwrap();
        let position = locator.locate().unwrap();
        assert_eq!(position.latitude, 28.6139);

        assert!(matches!(
            locator.denied().locate(),
            Err(SwasthaError::LocationDenied { .. })
        ));
    }

    // ── Config ────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SwasthaConfig::from_toml_str("").unwrap();
        assert_eq!(config.storage.key, "user");
        assert_eq!(config.assistant.thinking_delay().as_millis(), 1500);
        assert_eq!(config.assistant.booking_delay().as_millis(), 2000);
        assert_eq!(config.assistant.redirect_delay().as_millis(), 3000);
        assert!(config.location.enabled);
        assert!(config.triage.rules_file.is_none());
    }

    #[test]
    fn test_partial_config_overrides_named_fields() {
        let config = SwasthaConfig::from_toml_str(
            r#"
            [assistant]
            thinking_delay_ms = 10

            [location]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.assistant.thinking_delay_ms, 10);
        assert_eq!(config.assistant.booking_delay_ms, 2000);
        assert!(!config.location.enabled);
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let result = SwasthaConfig::from_toml_str(
            r#"
            [location]
            latitude = 123.0
            longitude = 10.0
            "#,
        );
        assert!(matches!(result, Err(SwasthaError::ConfigError { .. })));
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        match SwasthaConfig::from_toml_str("[storage\nkey=") {
            Err(SwasthaError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse config TOML"), "{reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_rules_file_surfaces_config_error() {
        let mut config = SwasthaConfig::default();
        config.triage.rules_file = Some("/no/such/rules.toml".into());
        assert!(matches!(config.classifier(), Err(SwasthaError::ConfigError { .. })));
    }
}
