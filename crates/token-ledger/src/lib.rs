//! # token-ledger — Dual-Standard Token Ledger
//!
//! One underlying state, two token dialects: a single-ownership interface
//! (one owner per non-fungible instance) and a multi-balance interface
//! (per-account quantities for fungible and non-fungible identifiers),
//! with classification and metadata packed into the 256-bit identifier
//! space itself rather than in side tables.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Identifier codec | `domain/identifier.rs` | derive kind and collection from an id's bit pattern |
//! | Attribute layouts | `domain/attributes.rs` | named, variable-width bit fields inside a 256-bit value |
//! | Collection registry | `domain/registry.rs` | creator and fungibility records, creation policy |
//! | Pause gate | `domain/pause.rs` | paused collections + global flag |
//! | Inventory ledger | `domain/ledger.rs` | balances, ownership, supplies, approvals |
//! | Transfer engine | `service.rs` | orchestration, atomicity, events, receiver callbacks |
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | instance balances | instance balances are 0 or 1 | `domain/ledger.rs` mutators |
//! | collection aggregation | aggregate balance = owned-instance count | `domain/ledger.rs` mutators |
//! | supply conservation | supply = sum of balances | `domain/ledger.rs` mutators |
//! | atomicity | operations fully apply or fully revert | `service.rs` checkpointing |
//! | burnt finality | burnt instances never re-mint | `domain/ledger.rs` burnt set |
//!
//! Runtime checkers for the first three live in `domain/invariants.rs`.
//!
//! ## Execution model
//!
//! Single-threaded, serialized, atomic-per-call. The enclosing environment
//! totally orders callers; the ledger holds no locks. Receiver-acceptance
//! callbacks run *after* state is committed, so re-entrant reads observe
//! consistent post-mutation state; a rejection rolls the operation back in
//! full.
//!
//! ## Usage
//!
//! ```
//! use token_ledger::prelude::*;
//!
//! let config = LedgerConfig {
//!     creation_policy: CreationPolicy::AutoCreate,
//!     ..LedgerConfig::default()
//! };
//! let mut engine = TransferEngine::permissive(config).unwrap();
//!
//! let minter = Address::from_tag(1);
//! let alice = Address::from_tag(2);
//!
//! // Fungible mint: the id's flag bit is clear.
//! let gold = U256::from(7);
//! engine.mint(minter, alice, gold, U256::from(100)).unwrap();
//! assert_eq!(engine.balance_of(alice, gold), U256::from(100));
//!
//! // Non-fungible mint: flag set, discriminator non-zero.
//! let swords = U256::one() << 224;
//! let sword_1 = engine.instance_of(swords, U256::one()).unwrap();
//! engine.mint(minter, alice, sword_1, U256::one()).unwrap();
//! assert_eq!(engine.owner_of(sword_1).unwrap(), alice);
//! assert_eq!(engine.balance_of(alice, swords), U256::one());
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{Address, Amount, TokenId, U256};

    // Domain
    pub use crate::domain::attributes::{AttributeField, AttributeLayouts};
    pub use crate::domain::identifier::{IdentifierCodec, TokenKind};
    pub use crate::domain::invariants::{check_all, InvariantCheckResult, InvariantViolation};
    pub use crate::domain::ledger::{InstanceRecord, InventoryLedger};
    pub use crate::domain::pause::PauseGate;
    pub use crate::domain::registry::{CollectionRecord, CollectionRegistry, CreationPolicy};

    // Ports
    pub use crate::ports::outbound::{
        Acceptance, Authorization, EventSink, ReceiverHost, TransferReceiver,
    };

    // Events
    pub use crate::events::LedgerEvent;

    // Errors
    pub use crate::errors::{CodecError, LayoutError, LedgerError};

    // Adapters
    pub use crate::adapters::{
        AcceptingReceiver, AllowAll, MemoryEventLog, NullEventSink, ReceivedCall,
        ReceiverRegistry, RecordingReceiver, RejectingReceiver, Role, RoleTable, SharedEventLog,
    };

    // Service
    pub use crate::service::{LedgerConfig, TransferEngine};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
