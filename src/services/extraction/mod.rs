pub mod datetime;
pub mod intent;

use chrono::NaiveDateTime;

use crate::models::AppointmentDraft;

pub use intent::IntentDecision;

/// Runs the intent classifier and the date/time extractor over one
/// conversational turn. Returns a complete, persistable draft, or `None`
/// when the turn carries no scheduling intent. "No appointment" is a
/// normal outcome, not an error.
///
/// Pure function of its inputs plus the injected reference time: no clock
/// reads, no I/O, no persistence. Persisting a returned draft is the
/// caller's responsibility.
pub fn extract_appointment(
    user_text: &str,
    assistant_text: &str,
    reference_now: NaiveDateTime,
) -> Option<AppointmentDraft> {
    let decision = intent::classify(user_text, assistant_text);
    if !decision.should_create {
        return None;
    }

    Some(AppointmentDraft {
        title: decision.appointment_type.title().to_string(),
        description: user_text.to_string(),
        appointment_type: decision.appointment_type,
        appointment_date: datetime::extract(user_text, reference_now),
        duration_minutes: decision.duration_minutes,
        location: None,
        notes: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentType;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_full_extraction() {
        let draft = extract_appointment(
            "Can I schedule a consultation tomorrow at 2:30 PM for 45 minutes",
            "",
            at("2024-01-01 00:00:00"),
        )
        .expect("expected a draft");

        assert_eq!(draft.appointment_type, AppointmentType::Consultation);
        assert_eq!(draft.title, "Consultation");
        assert_eq!(draft.duration_minutes, 45);
        assert_eq!(draft.appointment_date, at("2024-01-02 14:30:00"));
        assert_eq!(
            draft.description,
            "Can I schedule a consultation tomorrow at 2:30 PM for 45 minutes"
        );
        assert_eq!(draft.location, None);
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn test_no_intent_yields_none() {
        let result = extract_appointment("hello", "hi there", at("2024-01-01 00:00:00"));
        assert_eq!(result, None);
    }

    #[test]
    fn test_bot_confirmation_alone_is_enough() {
        let draft = extract_appointment(
            "please book it then",
            "Done! I've scheduled it for you.",
            at("2024-01-01 00:00:00"),
        )
        .expect("expected a draft");

        // No details in the user text: everything falls back to defaults.
        assert_eq!(draft.appointment_type, AppointmentType::General);
        assert_eq!(draft.title, "Appointment");
        assert_eq!(draft.duration_minutes, 60);
        assert_eq!(draft.appointment_date, at("2024-01-02 10:00:00"));
    }

    #[test]
    fn test_pure_and_repeatable() {
        let now = at("2024-01-01 00:00:00");
        let a = extract_appointment("book a checkup friday morning", "ok", now);
        let b = extract_appointment("book a checkup friday morning", "ok", now);
        assert_eq!(a, b);
    }
}
