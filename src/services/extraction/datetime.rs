use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDateTime};
use regex::Regex;

/// Clock-time patterns, tried in order. The first pattern with a match in
/// the text wins and later patterns are not consulted.
static CLOCK_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // 2:30 PM, 14:30
        Regex::new(r"(\d{1,2}):(\d{2})\s*(am|pm)?").expect("invalid clock pattern"),
        // 2 PM, 2pm
        Regex::new(r"(\d{1,2})\s*(am|pm)").expect("invalid clock pattern"),
        // 2 o'clock
        Regex::new(r"(\d{1,2})\s*o'?clock").expect("invalid clock pattern"),
    ]
});

const WEEKDAYS: [(&str, i64); 7] = [
    ("monday", 0),
    ("tuesday", 1),
    ("wednesday", 2),
    ("thursday", 3),
    ("friday", 4),
    ("saturday", 5),
    ("sunday", 6),
];

/// Resolves informal scheduling language ("tomorrow at 2 PM", "next Friday
/// morning") into a concrete timestamp relative to `reference_now`.
///
/// Best-effort by contract: unrecognizable text falls back to the default
/// (tomorrow at 10:00) rather than failing. The reference instant is always
/// injected so parsing stays deterministic.
pub fn extract(text: &str, reference_now: NaiveDateTime) -> NaiveDateTime {
    let lower = text.to_lowercase();

    let base_date = if lower.contains("today") {
        reference_now.date()
    } else if lower.contains("tomorrow") {
        reference_now.date() + Duration::days(1)
    } else if let Some((_, day_num)) = WEEKDAYS.iter().find(|(name, _)| lower.contains(name)) {
        // Next occurrence strictly after the reference day. A name matching
        // today's weekday rolls a full week forward, never same-day.
        let mut days_ahead = day_num - reference_now.weekday().num_days_from_monday() as i64;
        if days_ahead <= 0 {
            days_ahead += 7;
        }
        reference_now.date() + Duration::days(days_ahead)
    } else {
        reference_now.date() + Duration::days(1)
    };

    let (mut hour, mut minute) = (10u32, 0u32);

    for (idx, pattern) in CLOCK_PATTERNS.iter().enumerate() {
        let Some(caps) = pattern.captures(&lower) else {
            continue;
        };

        let parsed_hour: Option<u32> = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let parsed_minute: Option<u32> = if idx == 0 {
            caps.get(2).and_then(|m| m.as_str().parse().ok())
        } else {
            Some(0)
        };
        let meridiem = match idx {
            0 => caps.get(3),
            1 => caps.get(2),
            _ => None,
        }
        .map(|m| m.as_str());

        if let (Some(mut h), Some(min)) = (parsed_hour, parsed_minute) {
            match meridiem {
                Some("pm") if h != 12 => h += 12,
                Some("am") if h == 12 => h = 0,
                _ => {}
            }
            // Out-of-range numerics degrade to the default time.
            if h < 24 && min < 60 {
                hour = h;
                minute = min;
            }
        }
        break;
    }

    // Time-of-day keywords are applied last and win over explicit clock
    // times ("Monday at 3pm in the morning" resolves to 09:00).
    if lower.contains("morning") {
        (hour, minute) = (9, 0);
    } else if lower.contains("afternoon") {
        (hour, minute) = (14, 0);
    } else if lower.contains("evening") {
        (hour, minute) = (18, 0);
    }

    base_date
        .and_hms_opt(hour, minute, 0)
        .unwrap_or(reference_now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    // 2024-01-01 is a Monday.
    const MONDAY: &str = "2024-01-01 00:00";

    #[test]
    fn test_default_is_tomorrow_at_ten() {
        let result = extract("see you around", at(MONDAY));
        assert_eq!(result, at("2024-01-02 10:00"));
    }

    #[test]
    fn test_today_keeps_reference_date() {
        let result = extract("can we meet today", at("2024-01-01 16:45"));
        assert_eq!(result, at("2024-01-01 10:00"));
    }

    #[test]
    fn test_tomorrow() {
        let result = extract("tomorrow works for me", at(MONDAY));
        assert_eq!(result, at("2024-01-02 10:00"));
    }

    #[test]
    fn test_weekday_resolves_to_next_occurrence() {
        let result = extract("friday please", at(MONDAY));
        assert_eq!(result, at("2024-01-05 10:00"));
    }

    #[test]
    fn test_same_weekday_rolls_a_full_week() {
        let result = extract("monday please", at(MONDAY));
        assert_eq!(result, at("2024-01-08 10:00"));
    }

    #[test]
    fn test_weekday_earlier_in_week_wraps() {
        // Reference is Wednesday; "tuesday" lands next week.
        let result = extract("tuesday", at("2024-01-03 09:00"));
        assert_eq!(result, at("2024-01-09 10:00"));
    }

    #[test]
    fn test_hour_minute_with_meridiem() {
        let result = extract("tomorrow at 2:30 pm", at(MONDAY));
        assert_eq!(result, at("2024-01-02 14:30"));
    }

    #[test]
    fn test_hour_minute_24h() {
        let result = extract("tomorrow at 14:30", at(MONDAY));
        assert_eq!(result, at("2024-01-02 14:30"));
    }

    #[test]
    fn test_bare_hour_with_meridiem() {
        let result = extract("3pm tomorrow", at(MONDAY));
        assert_eq!(result, at("2024-01-02 15:00"));
    }

    #[test]
    fn test_oclock() {
        let result = extract("tomorrow at 2 o'clock", at(MONDAY));
        assert_eq!(result, at("2024-01-02 02:00"));
    }

    #[test]
    fn test_noon_and_midnight_normalization() {
        assert_eq!(
            extract("tomorrow at 12pm", at(MONDAY)),
            at("2024-01-02 12:00")
        );
        assert_eq!(
            extract("tomorrow at 12am", at(MONDAY)),
            at("2024-01-02 00:00")
        );
    }

    #[test]
    fn test_time_of_day_keyword_overrides_explicit_time() {
        let result = extract("Monday at 3pm in the morning", at(MONDAY));
        assert_eq!(result, at("2024-01-08 09:00"));
    }

    #[test]
    fn test_time_of_day_keywords() {
        assert_eq!(
            extract("tomorrow morning", at(MONDAY)),
            at("2024-01-02 09:00")
        );
        assert_eq!(
            extract("tomorrow afternoon", at(MONDAY)),
            at("2024-01-02 14:00")
        );
        assert_eq!(
            extract("tomorrow evening", at(MONDAY)),
            at("2024-01-02 18:00")
        );
    }

    #[test]
    fn test_out_of_range_clock_falls_back_to_default_time() {
        let result = extract("tomorrow at 99:99", at(MONDAY));
        assert_eq!(result, at("2024-01-02 10:00"));
    }

    #[test]
    fn test_case_insensitive() {
        let result = extract("FRIDAY at 2:30 PM", at(MONDAY));
        assert_eq!(result, at("2024-01-05 14:30"));
    }

    #[test]
    fn test_never_fails_on_arbitrary_text() {
        let inputs = [
            "",
            "   ",
            "!!!???",
            "日本語のテキスト",
            "1234567890",
            ":::am pm o'clock",
            "schedule schedule schedule",
        ];
        for input in inputs {
            let first = extract(input, at(MONDAY));
            let second = extract(input, at(MONDAY));
            assert_eq!(first, second, "extract must be deterministic for {input:?}");
        }
    }
}
