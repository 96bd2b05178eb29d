//! Collected fields and their validated values.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::ValidationError;
use crate::domain::validation::{
    contact, date_time, free_text, positive_integer, required_text, yes_no, Contact,
};

/// Validated values accumulated by a session, keyed by field.
pub type FieldMap = BTreeMap<Field, FieldValue>;

/// A single piece of data a flow collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CargoName,
    Weight,
    Count,
    Size,
    Documents,
    PickupContact,
    PickupAddress,
    DeliveryAddress,
    DeliveryContact,
    PaymentRequired,
    Deadline,
    Note,
    DeclineReason,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CargoName => "cargo_name",
            Field::Weight => "weight",
            Field::Count => "count",
            Field::Size => "size",
            Field::Documents => "documents",
            Field::PickupContact => "pickup_contact",
            Field::PickupAddress => "pickup_address",
            Field::DeliveryAddress => "delivery_address",
            Field::DeliveryContact => "delivery_contact",
            Field::PaymentRequired => "payment_required",
            Field::Deadline => "deadline",
            Field::Note => "note",
            Field::DeclineReason => "reason",
        }
    }

    /// Runs this field's validator over raw actor text.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, ValidationError> {
        let name = self.as_str();
        let value = match self {
            Field::CargoName
            | Field::Size
            | Field::PickupAddress
            | Field::DeliveryAddress
            | Field::DeclineReason => FieldValue::Text(required_text(name, raw)?),
            Field::Weight | Field::Count => FieldValue::Number(positive_integer(name, raw)?),
            Field::Documents | Field::Note => FieldValue::OptionalText(free_text(raw)),
            Field::PickupContact | Field::DeliveryContact => {
                FieldValue::Contact(contact(name, raw)?)
            }
            Field::PaymentRequired => FieldValue::Flag(yes_no(name, raw)?),
            Field::Deadline => FieldValue::DateTime(date_time(name, raw)?),
        };
        Ok(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value that has passed its field's validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    OptionalText(Option<String>),
    Number(u32),
    Contact(Contact),
    Flag(bool),
    DateTime(NaiveDateTime),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RejectionKind;

    #[test]
    fn weight_uses_positive_integer_validator() {
        assert_eq!(Field::Weight.parse(" 12 ").unwrap(), FieldValue::Number(12));
        assert_eq!(
            Field::Weight.parse("0").unwrap_err().kind(),
            RejectionKind::Range
        );
        assert_eq!(
            Field::Weight.parse("twelve").unwrap_err().kind(),
            RejectionKind::Format
        );
    }

    #[test]
    fn optional_fields_accept_the_sentinel() {
        assert_eq!(
            Field::Note.parse("-").unwrap(),
            FieldValue::OptionalText(None)
        );
        assert_eq!(
            Field::Documents.parse(" Invoice ").unwrap(),
            FieldValue::OptionalText(Some("Invoice".to_string()))
        );
    }

    #[test]
    fn required_fields_reject_the_sentinel() {
        let err = Field::CargoName.parse("-").unwrap_err();
        assert_eq!(err.kind(), RejectionKind::Required);
        assert_eq!(err.field(), "cargo_name");
    }

    #[test]
    fn contact_fields_parse_name_and_phone() {
        match Field::PickupContact.parse("Ivan, +7 912 345-67-89").unwrap() {
            FieldValue::Contact(c) => {
                assert_eq!(c.name, "Ivan");
                assert_eq!(c.phone.as_str(), "79123456789");
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn deadline_requires_fixed_pattern() {
        assert!(Field::Deadline.parse("2026-03-01 14:30").is_ok());
        assert_eq!(
            Field::Deadline.parse("01.03.2026").unwrap_err().kind(),
            RejectionKind::Format
        );
    }
}
