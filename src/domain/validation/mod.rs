//! Validation library.
//!
//! Pure, side-effect-free validators that turn raw actor text into typed
//! values or a [`ValidationError`](crate::domain::foundation::ValidationError)
//! carrying a rejection kind (`format`, `range`, `required`). Every field that
//! reaches an order payload has passed through one of these.

mod validators;
mod values;

pub use validators::{
    contact, date_time, free_text, phone, positive_integer, required_text, yes_no,
    DEADLINE_FORMAT, NONE_SENTINEL, PHONE_MAX_DIGITS, PHONE_MIN_DIGITS,
};
pub use values::{Contact, PhoneNumber};
