//! Event publisher adapters.

mod in_memory;
mod logging;

pub use in_memory::InMemoryEventBus;
pub use logging::TracingEventPublisher;
