//! Canonical order payload.
//!
//! One record with its required and optional fields fixed at compile time.
//! Payloads arriving over the wire are deserialized with
//! `deny_unknown_fields` and then checked with [`OrderPayload::validate`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::validation::Contact;

/// What is being carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cargo {
    pub name: String,
    /// Weight in kilograms.
    pub weight: u32,
    pub count: u32,
    pub size: String,
}

/// One end of a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoint {
    pub contact: Contact,
    pub address: String,
}

/// Structured description of a delivery request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderPayload {
    pub cargo: Cargo,
    #[serde(default)]
    pub documents: Option<String>,
    pub pickup: Endpoint,
    pub delivery: Endpoint,
    pub payment_required: bool,
    pub deadline: NaiveDateTime,
    #[serde(default)]
    pub note: Option<String>,
}

impl OrderPayload {
    /// Checks the constraints the type system cannot express.
    ///
    /// Phone numbers are already validated by [`Contact`] deserialization.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("cargo_name", &self.cargo.name)?;
        require_positive("weight", self.cargo.weight)?;
        require_positive("count", self.cargo.count)?;
        require_text("size", &self.cargo.size)?;
        require_text("pickup_contact", &self.pickup.contact.name)?;
        require_text("pickup_address", &self.pickup.address)?;
        require_text("delivery_contact", &self.delivery.contact.name)?;
        require_text("delivery_address", &self.delivery.address)?;
        if let Some(documents) = &self.documents {
            require_text("documents", documents)?;
        }
        if let Some(note) = &self.note {
            require_text("note", note)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

fn require_positive(field: &str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::out_of_range(field, 1, u32::MAX as i64, 0));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::validation::PhoneNumber;
    use chrono::NaiveDate;

    pub fn sample_payload() -> OrderPayload {
        OrderPayload {
            cargo: Cargo {
                name: "Pallet of tiles".to_string(),
                weight: 12,
                count: 3,
                size: "120x80x100".to_string(),
            },
            documents: None,
            pickup: Endpoint {
                contact: Contact {
                    name: "Ivan".to_string(),
                    phone: PhoneNumber::parse("+7 912 345 67 89").unwrap(),
                },
                address: "Warehouse 4, Lenina 1".to_string(),
            },
            delivery: Endpoint {
                contact: Contact {
                    name: "Maria".to_string(),
                    phone: PhoneNumber::parse("89120001122").unwrap(),
                },
                address: "Site B, Mira 15".to_string(),
            },
            payment_required: true,
            deadline: NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            note: Some("Call ahead".to_string()),
        }
    }
}
