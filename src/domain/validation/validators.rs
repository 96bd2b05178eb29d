//! Single-field validators.

use chrono::NaiveDateTime;

use crate::domain::foundation::ValidationError;

use super::values::{Contact, PhoneNumber};

/// Text an actor sends to leave an optional field empty.
pub const NONE_SENTINEL: &str = "-";

/// Accepted pattern for deadlines.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Minimum number of digits in a phone number.
pub const PHONE_MIN_DIGITS: usize = 10;

/// Maximum number of digits in a phone number.
pub const PHONE_MAX_DIGITS: usize = 12;

/// Trims free text; empty text and the `-` sentinel map to `None`.
pub fn free_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NONE_SENTINEL {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Free text that must be present.
pub fn required_text(field: &str, raw: &str) -> Result<String, ValidationError> {
    free_text(raw).ok_or_else(|| ValidationError::required(field))
}

/// Strips every non-digit and requires 10 to 12 digits.
pub fn phone(field: &str, raw: &str) -> Result<PhoneNumber, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
        return Err(ValidationError::out_of_range(
            field,
            PHONE_MIN_DIGITS as i64,
            PHONE_MAX_DIGITS as i64,
            digits.len() as i64,
        ));
    }

    Ok(PhoneNumber::from_digits(digits))
}

/// Parses a strictly positive whole number.
pub fn positive_integer(field: &str, raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, "expected a whole number"))?;

    if value <= 0 || value > i64::from(u32::MAX) {
        return Err(ValidationError::out_of_range(
            field,
            1,
            i64::from(u32::MAX),
            value,
        ));
    }

    // Bounds checked above.
    Ok(value as u32)
}

/// Parses a `YYYY-MM-DD HH:MM` wall-clock time.
pub fn date_time(field: &str, raw: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }

    NaiveDateTime::parse_from_str(trimmed, DEADLINE_FORMAT)
        .map_err(|_| ValidationError::invalid_format(field, "expected YYYY-MM-DD HH:MM"))
}

/// Parses `Name, phone`.
pub fn contact(field: &str, raw: &str) -> Result<Contact, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    let (name, phone_part) = raw
        .split_once(',')
        .ok_or_else(|| ValidationError::invalid_format(field, "expected 'Name, phone'"))?;

    let name = required_text(field, name)?;
    let phone = phone(field, phone_part)?;

    Ok(Contact { name, phone })
}

/// Parses a yes/no answer.
pub fn yes_no(field: &str, raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "" => Err(ValidationError::required(field)),
        "yes" | "y" | "да" => Ok(true),
        "no" | "n" | "нет" => Ok(false),
        _ => Err(ValidationError::invalid_format(field, "expected yes or no")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RejectionKind;
    use proptest::prelude::*;

    #[test]
    fn free_text_maps_sentinel_to_none() {
        assert_eq!(free_text(" - "), None);
        assert_eq!(free_text("   "), None);
        assert_eq!(free_text("  fragile  "), Some("fragile".to_string()));
    }

    #[test]
    fn required_text_rejects_sentinel() {
        let err = required_text("cargo_name", "-").unwrap_err();
        assert_eq!(err.kind(), RejectionKind::Required);
    }

    #[test]
    fn phone_strips_punctuation() {
        let phone = phone("phone", "+7 (912) 345-67-89").unwrap();
        assert_eq!(phone.as_str(), "79123456789");
    }

    #[test]
    fn phone_rejects_wrong_length_as_range() {
        assert_eq!(phone("phone", "12345").unwrap_err().kind(), RejectionKind::Range);
        assert_eq!(
            phone("phone", "1234567890123").unwrap_err().kind(),
            RejectionKind::Range
        );
    }

    #[test]
    fn phone_rejects_blank_as_required() {
        assert_eq!(phone("phone", "  ").unwrap_err().kind(), RejectionKind::Required);
    }

    #[test]
    fn positive_integer_accepts_padded_number() {
        assert_eq!(positive_integer("weight", " 12 ").unwrap(), 12);
    }

    #[test]
    fn positive_integer_rejects_zero_and_negative() {
        assert_eq!(
            positive_integer("weight", "0").unwrap_err().kind(),
            RejectionKind::Range
        );
        assert_eq!(
            positive_integer("weight", "-3").unwrap_err().kind(),
            RejectionKind::Range
        );
    }

    #[test]
    fn positive_integer_rejects_non_numeric() {
        assert_eq!(
            positive_integer("weight", "twelve").unwrap_err().kind(),
            RejectionKind::Format
        );
        assert_eq!(
            positive_integer("weight", "1.5").unwrap_err().kind(),
            RejectionKind::Format
        );
    }

    #[test]
    fn date_time_parses_fixed_pattern() {
        let dt = date_time("deadline", "2025-03-01 14:30").unwrap();
        assert_eq!(dt.format(DEADLINE_FORMAT).to_string(), "2025-03-01 14:30");
    }

    #[test]
    fn date_time_rejects_other_patterns() {
        for raw in ["01.03.2025 14:30", "2025-03-01", "2025-03-01T14:30", "2025-13-01 10:00"] {
            assert_eq!(
                date_time("deadline", raw).unwrap_err().kind(),
                RejectionKind::Format,
                "{raw}"
            );
        }
    }

    #[test]
    fn contact_splits_name_and_phone() {
        let c = contact("pickup_contact", "Ivan Petrov, 8 912 345 67 89").unwrap();
        assert_eq!(c.name, "Ivan Petrov");
        assert_eq!(c.phone.as_str(), "89123456789");
    }

    #[test]
    fn contact_without_comma_is_format_error() {
        assert_eq!(
            contact("pickup_contact", "Ivan 89123456789").unwrap_err().kind(),
            RejectionKind::Format
        );
    }

    #[test]
    fn contact_with_bad_phone_is_range_error() {
        assert_eq!(
            contact("pickup_contact", "Ivan, 123").unwrap_err().kind(),
            RejectionKind::Range
        );
    }

    #[test]
    fn yes_no_accepts_both_languages() {
        assert!(yes_no("payment_required", "Yes").unwrap());
        assert!(yes_no("payment_required", "Да").unwrap());
        assert!(!yes_no("payment_required", "нет").unwrap());
        assert!(yes_no("payment_required", "maybe").is_err());
    }

    proptest! {
        #[test]
        fn phone_accepts_any_decoration_of_valid_digits(
            digits in "[0-9]{10,12}",
            sep in "[ ()+-]{0,3}",
        ) {
            let decorated: String = digits
                .chars()
                .flat_map(|c| std::iter::once(c).chain(sep.chars()))
                .collect();
            let parsed = phone("phone", &decorated).unwrap();
            prop_assert_eq!(parsed.as_str(), digits.as_str());
        }

        #[test]
        fn positive_integer_roundtrips_display(n in 1u32..=u32::MAX) {
            prop_assert_eq!(positive_integer("count", &n.to_string()).unwrap(), n);
        }

        #[test]
        fn positive_integer_never_accepts_non_positive(n in i64::MIN..=0i64) {
            prop_assert!(positive_integer("count", &n.to_string()).is_err());
        }
    }
}
