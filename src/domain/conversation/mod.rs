//! Conversation domain module.
//!
//! A session is a linear form-filling machine owned by one actor. Each flow
//! kind has a fixed ordered list of steps; each step names the field it
//! collects and the validator that field runs through.
//!
//! ```text
//! step 0 -> step 1 -> ... -> step n-1 -> confirming -> completed
//!    \________ cancel (any step) ___________/    \-> discarded (reject)
//! ```
//!
//! Flows without confirmation (the decline reason) complete directly after
//! their last step.

mod assembly;
mod errors;
mod field;
mod flow;
mod session;

pub use assembly::{assemble_payload, payload_fields};
pub use errors::SessionError;
pub use field::{Field, FieldMap, FieldValue};
pub use flow::{FlowKind, CREATE_ORDER_STEPS, DECLINE_REASON_STEPS};
pub use session::{CompletedFlow, ConversationSession, Position, SessionInput, StepOutcome};
