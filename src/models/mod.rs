//! Domain and wire models.

pub mod call_event;
pub mod directive;
pub mod operator;
pub mod queue_entry;
