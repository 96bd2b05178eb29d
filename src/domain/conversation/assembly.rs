//! Conversion between accumulated session fields and the order payload.

use crate::domain::order::{Cargo, Endpoint, OrderPayload};
use crate::domain::validation::Contact;

use super::{Field, FieldMap, FieldValue, SessionError};

/// Freezes a complete create-order field map into a payload.
pub fn assemble_payload(fields: &FieldMap) -> Result<OrderPayload, SessionError> {
    Ok(OrderPayload {
        cargo: Cargo {
            name: text(fields, Field::CargoName)?,
            weight: number(fields, Field::Weight)?,
            count: number(fields, Field::Count)?,
            size: text(fields, Field::Size)?,
        },
        documents: optional_text(fields, Field::Documents)?,
        pickup: Endpoint {
            contact: contact(fields, Field::PickupContact)?,
            address: text(fields, Field::PickupAddress)?,
        },
        delivery: Endpoint {
            contact: contact(fields, Field::DeliveryContact)?,
            address: text(fields, Field::DeliveryAddress)?,
        },
        payment_required: match fields.get(&Field::PaymentRequired) {
            Some(FieldValue::Flag(flag)) => *flag,
            _ => return Err(SessionError::MalformedField(Field::PaymentRequired)),
        },
        deadline: match fields.get(&Field::Deadline) {
            Some(FieldValue::DateTime(at)) => *at,
            _ => return Err(SessionError::MalformedField(Field::Deadline)),
        },
        note: optional_text(fields, Field::Note)?,
    })
}

/// Splits a payload back into the field map a session would have collected.
pub fn payload_fields(payload: &OrderPayload) -> FieldMap {
    FieldMap::from([
        (Field::CargoName, FieldValue::Text(payload.cargo.name.clone())),
        (Field::Weight, FieldValue::Number(payload.cargo.weight)),
        (Field::Count, FieldValue::Number(payload.cargo.count)),
        (Field::Size, FieldValue::Text(payload.cargo.size.clone())),
        (
            Field::Documents,
            FieldValue::OptionalText(payload.documents.clone()),
        ),
        (
            Field::PickupContact,
            FieldValue::Contact(payload.pickup.contact.clone()),
        ),
        (
            Field::PickupAddress,
            FieldValue::Text(payload.pickup.address.clone()),
        ),
        (
            Field::DeliveryAddress,
            FieldValue::Text(payload.delivery.address.clone()),
        ),
        (
            Field::DeliveryContact,
            FieldValue::Contact(payload.delivery.contact.clone()),
        ),
        (
            Field::PaymentRequired,
            FieldValue::Flag(payload.payment_required),
        ),
        (Field::Deadline, FieldValue::DateTime(payload.deadline)),
        (Field::Note, FieldValue::OptionalText(payload.note.clone())),
    ])
}

fn text(fields: &FieldMap, field: Field) -> Result<String, SessionError> {
    match fields.get(&field) {
        Some(FieldValue::Text(value)) => Ok(value.clone()),
        _ => Err(SessionError::MalformedField(field)),
    }
}

fn optional_text(fields: &FieldMap, field: Field) -> Result<Option<String>, SessionError> {
    match fields.get(&field) {
        Some(FieldValue::OptionalText(value)) => Ok(value.clone()),
        _ => Err(SessionError::MalformedField(field)),
    }
}

fn number(fields: &FieldMap, field: Field) -> Result<u32, SessionError> {
    match fields.get(&field) {
        Some(FieldValue::Number(value)) => Ok(*value),
        _ => Err(SessionError::MalformedField(field)),
    }
}

fn contact(fields: &FieldMap, field: Field) -> Result<Contact, SessionError> {
    match fields.get(&field) {
        Some(FieldValue::Contact(value)) => Ok(value.clone()),
        _ => Err(SessionError::MalformedField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::test_support::sample_payload;

    #[test]
    fn payload_survives_field_map_round_trip() {
        let payload = sample_payload();
        let fields = payload_fields(&payload);
        assert_eq!(assemble_payload(&fields).unwrap(), payload);
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let mut fields = payload_fields(&sample_payload());
        fields.remove(&Field::Deadline);
        assert_eq!(
            assemble_payload(&fields).unwrap_err(),
            SessionError::MalformedField(Field::Deadline)
        );
    }

    #[test]
    fn mistyped_field_is_rejected() {
        let mut fields = payload_fields(&sample_payload());
        fields.insert(Field::Weight, FieldValue::Text("12".to_string()));
        assert_eq!(
            assemble_payload(&fields).unwrap_err(),
            SessionError::MalformedField(Field::Weight)
        );
    }
}
