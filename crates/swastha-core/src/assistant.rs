//! The triage chat conversation.
//!
//! A `ChatSession` owns the append-only transcript and the location-prompt
//! flag. It never sleeps: the two simulated delays are modelled as values
//! (`PendingReply`, `PendingBooking`) that the front end holds until the
//! configured delay has elapsed and then hands back.
//!
//!   submit ─▶ [thinking delay] ─▶ deliver ─▶ (serious) prompt
//!   prompt ─▶ request_booking ─▶ [booking delay] ─▶ complete_booking

use chrono::{DateTime, Duration, Local, Utc};
use tracing::{debug, info, warn};

use swastha_contracts::{
    appointment::{Appointment, AppointmentId, AppointmentStatus},
    chat::ChatMessage,
    error::SwasthaResult,
    location::Coordinates,
    profile::UserProfile,
    triage::Assessment,
};
use swastha_triage::SymptomClassifier;

use crate::traits::LocationProvider;

pub const GREETING: &str = "Hello! I'm your AI health assistant. Please describe your symptoms \
or health concerns, and I'll help you understand what might be going on.";

pub const EMERGENCY_HOSPITAL: &str = "Emergency Medical Center";
pub const EMERGENCY_REASON: &str = "Emergency consultation based on AI assessment";
pub const EMERGENCY_DISTANCE: &str = "2.3 miles";

/// An assessment waiting out the "thinking" delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub assessment: Assessment,
}

/// A granted location waiting out the "searching for a hospital" delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingBooking {
    pub coordinates: Coordinates,
}

#[derive(Debug)]
pub struct ChatSession {
    classifier: SymptomClassifier,
    transcript: Vec<ChatMessage>,
    location_prompt: bool,
}

impl ChatSession {
    /// Start a conversation with the assistant greeting.
    pub fn new(classifier: SymptomClassifier, now: DateTime<Utc>) -> Self {
        Self {
            classifier,
            transcript: vec![ChatMessage::assistant(GREETING, now)],
            location_prompt: false,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// True between a serious reply and either a dismissal or a completed
    /// booking.
    pub fn location_prompt_visible(&self) -> bool {
        self.location_prompt
    }

    /// Record the user's message and compute the reply.
    ///
    /// Blank or whitespace-only input is ignored: nothing is recorded and
    /// `None` is returned.
    pub fn submit(&mut self, text: &str, now: DateTime<Utc>) -> Option<PendingReply> {
        if text.trim().is_empty() {
            debug!("ignoring blank chat input");
            return None;
        }

        self.transcript.push(ChatMessage::user(text, now));
        let assessment = self.classifier.classify(text);

        debug!(severity = %assessment.severity, "reply pending");
        Some(PendingReply { assessment })
    }

    /// Append the assistant's reply once the thinking delay has passed.
    ///
    /// The location prompt follows the latest reply: a serious assessment
    /// raises it, anything else lowers a prompt left over from an earlier
    /// turn.
    pub fn deliver(&mut self, reply: PendingReply, now: DateTime<Utc>) -> &ChatMessage {
        let serious = reply.assessment.severity.is_serious();
        let message = ChatMessage::assistant(reply.assessment.advisory, now).with_severity_flag(serious);
        self.transcript.push(message);

        if serious {
            info!("serious symptoms reported; offering hospital booking");
        } else if self.location_prompt {
            debug!("non-serious reply; withdrawing earlier booking offer");
        }
        self.location_prompt = serious;

        &self.transcript[self.transcript.len() - 1]
    }

    /// The user declined the booking offer.
    pub fn dismiss_location_prompt(&mut self) {
        self.location_prompt = false;
    }

    /// Ask for the user's position.
    ///
    /// On error the prompt stays up and nothing else changes; the caller
    /// shows the error and stops.
    pub fn request_booking(&self, locator: &dyn LocationProvider) -> SwasthaResult<PendingBooking> {
        match locator.locate() {
            Ok(coordinates) => {
                debug!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "location granted; searching for nearest hospital"
                );
                Ok(PendingBooking { coordinates })
            }
            Err(e) => {
                warn!(error = %e, "booking aborted: location unavailable");
                Err(e)
            }
        }
    }

    /// Book the emergency appointment once the search delay has passed.
    ///
    /// Appends the appointment to `profile` (the caller persists it), posts
    /// the confirmation message, and lowers the prompt.
    pub fn complete_booking(
        &mut self,
        _pending: PendingBooking,
        profile: &mut UserProfile,
        now: DateTime<Utc>,
    ) -> Appointment {
        let appointment = emergency_appointment(now);
        profile.appointments.push(appointment.clone());

        self.transcript
            .push(ChatMessage::assistant(booking_confirmation(&appointment), now));
        self.location_prompt = false;

        info!(
            appointment_id = %appointment.id,
            hospital = %appointment.hospital_name,
            scheduled_at = %appointment.scheduled_at,
            "emergency appointment booked"
        );
        appointment
    }
}

/// The appointment the booking flow creates: one hour out, confirmed.
pub fn emergency_appointment(now: DateTime<Utc>) -> Appointment {
    Appointment {
        id: AppointmentId::from_booking_time(now),
        hospital_name: EMERGENCY_HOSPITAL.to_string(),
        scheduled_at: now + Duration::hours(1),
        status: AppointmentStatus::Confirmed,
        reason_text: EMERGENCY_REASON.to_string(),
        address: None,
        phone: None,
    }
}

/// The chat message announcing a completed booking.
pub fn booking_confirmation(appointment: &Appointment) -> String {
    let local_time = appointment
        .scheduled_at
        .with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p");

    format!(
        "✅ Great! I've found the nearest hospital and booked an appointment for you:\n\n\
         🏥 {}\n\
         📍 Located {} from your location\n\
         ⏰ Appointment Time: {}\n\n\
         Please head to the hospital as soon as possible. Your appointment has been \
         confirmed and they're expecting you.",
        appointment.hospital_name, EMERGENCY_DISTANCE, local_time
    )
}
