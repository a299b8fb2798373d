use crate::models::AppointmentType;

/// Gate: a turn is only considered at all if the user text carries one of
/// these scheduling keywords.
const SCHEDULING_KEYWORDS: &[&str] = &[
    "schedule",
    "book",
    "appointment",
    "meeting",
    "consultation",
    "checkup",
    "visit",
    "session",
    "reservation",
    "make an appointment",
];

/// Temporal or type details in the user text that corroborate intent.
const DETAIL_KEYWORDS: &[&str] = &[
    "tomorrow",
    "today",
    "next week",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "am",
    "pm",
    "morning",
    "afternoon",
    "evening",
    "medical",
    "consultation",
    "checkup",
];

/// Phrases in the assistant reply that indicate it committed to scheduling.
const CONFIRMATION_KEYWORDS: &[&str] = &[
    "scheduled",
    "booked",
    "confirmed",
    "appointment created",
    "i've scheduled",
    "your appointment is",
    "appointment has been",
    "i'll schedule",
    "let me schedule",
    "i can schedule",
];

#[derive(Debug, Clone, PartialEq)]
pub struct IntentDecision {
    pub should_create: bool,
    pub appointment_type: AppointmentType,
    pub duration_minutes: i32,
}

impl IntentDecision {
    fn none() -> Self {
        Self {
            should_create: false,
            appointment_type: AppointmentType::General,
            duration_minutes: 60,
        }
    }
}

/// Decides whether a user/assistant turn pair should produce an appointment,
/// and extracts the coarse attributes when it should.
///
/// Deliberately simple keyword matching; the match semantics are part of
/// the contract and conformance tests depend on them.
pub fn classify(user_text: &str, assistant_text: &str) -> IntentDecision {
    let user = user_text.to_lowercase();

    if !contains_any(&user, SCHEDULING_KEYWORDS) {
        return IntentDecision::none();
    }

    let has_details = contains_any(&user, DETAIL_KEYWORDS);
    let bot_confirms = contains_any(&assistant_text.to_lowercase(), CONFIRMATION_KEYWORDS);

    if !(has_details || bot_confirms) {
        return IntentDecision::none();
    }

    IntentDecision {
        should_create: true,
        appointment_type: detect_type(&user),
        duration_minutes: detect_duration(&user),
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Type rules are checked in priority order; medical-family words win over
/// everything else even when keywords for several types coexist.
fn detect_type(user: &str) -> AppointmentType {
    if contains_any(user, &["medical", "doctor", "checkup", "health"]) {
        AppointmentType::Medical
    } else if contains_any(user, &["consultation", "consult"]) {
        AppointmentType::Consultation
    } else if contains_any(user, &["follow", "follow-up"]) {
        AppointmentType::FollowUp
    } else {
        AppointmentType::General
    }
}

fn detect_duration(user: &str) -> i32 {
    if user.contains("30 minutes") || user.contains("half hour") {
        30
    } else if user.contains("45 minutes") {
        45
    } else if user.contains("90 minutes") || user.contains("1.5 hours") {
        90
    } else if user.contains("2 hours") || user.contains("120 minutes") {
        120
    } else {
        60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_scheduling_keyword_is_rejected() {
        let decision = classify("hello there", "Hi! How can I help?");
        assert!(!decision.should_create);
    }

    #[test]
    fn test_gate_ignores_confirmation_in_reply() {
        // Without a scheduling keyword from the user, the assistant's
        // confirmation phrasing alone never triggers creation.
        let decision = classify(
            "thanks for the info",
            "Your appointment has been confirmed for Friday",
        );
        assert!(!decision.should_create);
    }

    #[test]
    fn test_keyword_without_corroboration_is_rejected() {
        let decision = classify("how do I book with you", "You can just tell me a time.");
        assert!(!decision.should_create);
    }

    #[test]
    fn test_details_path() {
        let decision = classify("I want to schedule a visit tomorrow", "Sure thing.");
        assert!(decision.should_create);
        assert_eq!(decision.appointment_type, AppointmentType::General);
        assert_eq!(decision.duration_minutes, 60);
    }

    #[test]
    fn test_bot_confirmation_path() {
        // No detail keywords from the user; the assistant's reply carries
        // the decision.
        let decision = classify(
            "I'd like to book something soon",
            "I've scheduled it. Your appointment is set.",
        );
        assert!(decision.should_create);
    }

    #[test]
    fn test_medical_beats_other_type_keywords() {
        let decision = classify("I want to book a checkup", "ok");
        assert!(decision.should_create);
        assert_eq!(decision.appointment_type, AppointmentType::Medical);

        // "consultation" also present, but medical-family wins.
        let decision = classify("book a medical consultation tomorrow", "ok");
        assert_eq!(decision.appointment_type, AppointmentType::Medical);
    }

    #[test]
    fn test_consultation_type() {
        let decision = classify("can I schedule a consultation tomorrow", "ok");
        assert_eq!(decision.appointment_type, AppointmentType::Consultation);
    }

    #[test]
    fn test_follow_up_type() {
        let decision = classify("schedule a follow-up visit tomorrow", "ok");
        assert_eq!(decision.appointment_type, AppointmentType::FollowUp);
    }

    #[test]
    fn test_durations() {
        let cases = [
            ("book a visit tomorrow for 30 minutes", 30),
            ("book a visit tomorrow for half hour", 30),
            ("book a visit tomorrow for 45 minutes", 45),
            ("book a visit tomorrow for 90 minutes", 90),
            ("book a visit tomorrow for 1.5 hours", 90),
            ("book a visit tomorrow for 2 hours", 120),
            ("book a visit tomorrow for 120 minutes", 120),
            ("book a visit tomorrow", 60),
        ];
        for (text, expected) in cases {
            let decision = classify(text, "ok");
            assert_eq!(decision.duration_minutes, expected, "for {text:?}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        let decision = classify("BOOK a CHECKUP Tomorrow", "OK");
        assert!(decision.should_create);
        assert_eq!(decision.appointment_type, AppointmentType::Medical);
    }
}
