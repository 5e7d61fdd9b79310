//! Event vocabulary and in-process distribution.
//!
//! Handlers build typed events, wrap them in an [`EventEnvelope`] and hand them
//! to an [`EventBus`]. What happens to them afterwards belongs to the host.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
