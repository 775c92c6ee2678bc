//! # Domain Layer
//!
//! Pure business logic of the token ledger: identifier classification,
//! attribute layouts, collection registry, pause gate, and the inventory
//! state machine. Nothing in here talks to the outside world; external
//! concerns enter only through the ports.

pub mod attributes;
pub mod identifier;
pub mod invariants;
pub mod ledger;
pub mod pause;
pub mod registry;
pub mod value_objects;

pub use attributes::{AttributeField, AttributeLayouts};
pub use identifier::{IdentifierCodec, TokenKind};
pub use ledger::{InstanceRecord, InventoryLedger};
pub use pause::PauseGate;
pub use registry::{CollectionRecord, CollectionRegistry, CreationPolicy};
pub use value_objects::{Address, Amount, TokenId, U256};
