//! # Identifier Codec
//!
//! Pure classification of 256-bit token identifiers.
//!
//! An identifier's bit pattern carries its own kind. With a deployment-wide
//! `mask_length`, the word splits into a collection prefix and a per-instance
//! discriminator:
//!
//! ```text
//!   bit 255 ──────────────┐                       ┌────────────── bit 0
//!   [ collection prefix: mask_length bits ][ discriminator: 256 - mask_length bits ]
//!     ^
//!     └── lowest prefix bit (position 256 - mask_length) is the non-fungible flag
//! ```
//!
//! | Flag | Discriminator | Kind |
//! |------|---------------|------|
//! | clear | (any)        | fungible collection — the whole value is the collection id |
//! | set   | zero         | non-fungible collection — a grouping id, not mintable |
//! | set   | non-zero     | non-fungible instance — uniquely owned |
//!
//! Classification is total: every 256-bit value falls in exactly one class,
//! so these functions never fail on a syntactically valid input. Only
//! *composition* (`instance_of`) has error paths.

use crate::domain::value_objects::{TokenId, U256};
use crate::errors::CodecError;

/// Classified form of a token identifier.
///
/// Decoded once at the boundary; the ledger operates on the tagged form and
/// re-encodes only at the external interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A fungible collection; balances are interchangeable quantities.
    Fungible(TokenId),
    /// A bare non-fungible collection; groups instances, holds no balance.
    NonFungibleCollection(TokenId),
    /// A concrete non-fungible instance within a collection.
    NonFungibleInstance {
        /// The owning collection (prefix with discriminator zeroed).
        collection: TokenId,
        /// The non-zero per-instance discriminator.
        discriminator: U256,
    },
}

impl TokenKind {
    /// Returns the collection identifier this kind belongs to.
    ///
    /// For fungible ids and bare collections that is the id itself.
    #[must_use]
    pub fn collection(&self) -> TokenId {
        match *self {
            Self::Fungible(id) | Self::NonFungibleCollection(id) => id,
            Self::NonFungibleInstance { collection, .. } => collection,
        }
    }

    /// Returns true for a concrete non-fungible instance.
    #[must_use]
    pub fn is_instance(&self) -> bool {
        matches!(self, Self::NonFungibleInstance { .. })
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Pure identifier codec, fixed per deployment by `mask_length`.
///
/// `mask_length` is configuration, not per-token state: it partitions the
/// identifier space once and never changes for a running ledger.
#[derive(Clone, Copy, Debug)]
pub struct IdentifierCodec {
    mask_length: u16,
    /// The non-fungible flag: bit `256 - mask_length`.
    flag: U256,
    /// Low `256 - mask_length` bits.
    discriminator_mask: U256,
    /// High `mask_length` bits, flag included.
    prefix_mask: U256,
}

impl IdentifierCodec {
    /// The customary deployment split: 32 prefix bits, 224 discriminator bits.
    pub const DEFAULT_MASK_LENGTH: u16 = 32;

    /// Creates a codec for the given mask length.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaskLength` unless `1 <= mask_length <= 255`: a
    /// zero-width prefix cannot carry the flag, and a zero-width
    /// discriminator would make every non-fungible identifier a bare
    /// collection.
    pub fn new(mask_length: u16) -> Result<Self, CodecError> {
        if mask_length == 0 || mask_length > 255 {
            return Err(CodecError::InvalidMaskLength { mask_length });
        }
        let field_bits = 256 - usize::from(mask_length);
        let flag = U256::one() << field_bits;
        let discriminator_mask = flag - 1;
        Ok(Self {
            mask_length,
            flag,
            discriminator_mask,
            prefix_mask: !discriminator_mask,
        })
    }

    /// Returns the deployment mask length.
    #[must_use]
    pub const fn mask_length(&self) -> u16 {
        self.mask_length
    }

    /// Width of the discriminator field in bits.
    #[must_use]
    pub const fn discriminator_bits(&self) -> u16 {
        256 - self.mask_length
    }

    /// True iff the non-fungible flag bit is clear.
    #[must_use]
    pub fn is_fungible(&self, id: TokenId) -> bool {
        (id & self.flag).is_zero()
    }

    /// True iff the flag is set and the discriminator bits are all zero.
    #[must_use]
    pub fn is_non_fungible_collection(&self, id: TokenId) -> bool {
        !(id & self.flag).is_zero() && (id & self.discriminator_mask).is_zero()
    }

    /// True iff the flag is set and the discriminator bits are non-zero.
    #[must_use]
    pub fn is_non_fungible_instance(&self, id: TokenId) -> bool {
        !(id & self.flag).is_zero() && !(id & self.discriminator_mask).is_zero()
    }

    /// Decodes an identifier into its tagged form.
    #[must_use]
    pub fn classify(&self, id: TokenId) -> TokenKind {
        if (id & self.flag).is_zero() {
            return TokenKind::Fungible(id);
        }
        let discriminator = id & self.discriminator_mask;
        if discriminator.is_zero() {
            TokenKind::NonFungibleCollection(id)
        } else {
            TokenKind::NonFungibleInstance {
                collection: id & self.prefix_mask,
                discriminator,
            }
        }
    }

    /// Returns the owning collection identifier.
    ///
    /// Identity for fungible identifiers; prefix with the discriminator
    /// zeroed (flag kept) for non-fungible ones.
    #[must_use]
    pub fn collection_of(&self, id: TokenId) -> TokenId {
        if self.is_fungible(id) {
            id
        } else {
            id & self.prefix_mask
        }
    }

    /// Returns the discriminator field of an identifier.
    #[must_use]
    pub fn discriminator_of(&self, id: TokenId) -> U256 {
        id & self.discriminator_mask
    }

    /// Composes a non-fungible instance identifier.
    ///
    /// # Errors
    ///
    /// * `NotACollectionIdentifier` — `collection` is not a bare
    ///   non-fungible collection identifier.
    /// * `InvalidDiscriminator` — `discriminator` is zero or exceeds the
    ///   discriminator field.
    pub fn instance_of(
        &self,
        collection: TokenId,
        discriminator: U256,
    ) -> Result<TokenId, CodecError> {
        if !self.is_non_fungible_collection(collection) {
            return Err(CodecError::NotACollectionIdentifier { id: collection });
        }
        if discriminator.is_zero() || !(discriminator & self.prefix_mask).is_zero() {
            return Err(CodecError::InvalidDiscriminator {
                discriminator,
                field_bits: self.discriminator_bits(),
            });
        }
        Ok(collection | discriminator)
    }
}

impl Default for IdentifierCodec {
    fn default() -> Self {
        // DEFAULT_MASK_LENGTH is in the valid range by construction.
        match Self::new(Self::DEFAULT_MASK_LENGTH) {
            Ok(codec) => codec,
            Err(_) => unreachable!(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
