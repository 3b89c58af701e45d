//! Operator directory access: status store client, idle-operator
//! picker, and the queue audit recorder.
//!
//! The directory is an external system of record. Everything here is
//! stateless; every routing decision re-reads current store state, and
//! mutual exclusion against concurrent pickers is delegated to the
//! store (see [`picker`] for the accepted race).

pub mod client;
pub mod picker;
pub mod recorder;

pub use client::DirectoryClient;
pub use picker::OperatorPicker;
pub use recorder::QueueRecorder;
