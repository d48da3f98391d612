//! Stateless pub-sub hooks for engine events
//!
//! Other components subscribe to the events published by the checkout and reminder flows and react to them. The
//! handlers receive the event and nothing else; they cannot see or change the engine's state.
mod channel;
mod event_types;
mod hooks;

pub use channel::{EventHandler, EventProducer, Handler};
pub use event_types::*;
pub use hooks::{EventHandlers, EventHooks, EventProducers};
