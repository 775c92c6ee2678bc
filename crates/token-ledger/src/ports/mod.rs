//! # Ports
//!
//! Boundary interfaces of the ledger. The engine depends on these traits;
//! adapters (in-process or otherwise) implement them. Dependencies point
//! inward.

pub mod outbound;

pub use outbound::{Acceptance, Authorization, EventSink, ReceiverHost, TransferReceiver};
