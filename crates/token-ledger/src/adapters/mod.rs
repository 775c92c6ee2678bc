//! # Adapters
//!
//! In-process implementations of the outbound ports: a role table, a
//! receiver registry with stock receivers, and an in-memory event log.

pub mod event_log;
pub mod receivers;
pub mod roles;

pub use event_log::{MemoryEventLog, NullEventSink, SharedEventLog};
pub use receivers::{
    AcceptingReceiver, ReceivedCall, ReceiverRegistry, RecordingReceiver, RejectingReceiver,
};
pub use roles::{AllowAll, Role, RoleTable};
