//! # Attribute Layouts
//!
//! Bit-packed attribute codec: an arbitrary set of named, variable-width,
//! possibly-overlapping attributes stored inside a single 256-bit value.
//!
//! A *layout* is an insertion-ordered list of `(name, length, position)`
//! fields registered under a *scope* identifier. Extraction is pure bit
//! masking against any 256-bit value; the codec never interprets what the
//! value means.
//!
//! Overlapping ranges are intentionally unconstrained: a single identifier
//! may expose collection-scoped attributes (read against its collection id)
//! and instance-scoped attributes (read against the id itself) through the
//! same bit positions. The two scopes are queried independently; the codec
//! only extracts per scope.

use crate::domain::value_objects::{TokenId, U256};
use crate::errors::LayoutError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// FIELD
// =============================================================================

/// One named bit range inside a 256-bit value.
///
/// ## Invariants
/// - `1 <= length <= 256`
/// - `position + length <= 256`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeField {
    /// Attribute name, unique lookup key within its layout.
    pub name: String,
    /// Width of the range in bits.
    pub length: u16,
    /// Offset of the range's least-significant bit.
    pub position: u16,
}

impl AttributeField {
    /// Creates a field without validating it; validation happens on
    /// [`AttributeLayouts::set_layout`].
    #[must_use]
    pub fn new(name: impl Into<String>, length: u16, position: u16) -> Self {
        Self {
            name: name.into(),
            length,
            position,
        }
    }

    /// Validates the field's bounds.
    ///
    /// # Errors
    ///
    /// * `ZeroLength` — `length == 0`.
    /// * `OutOfBounds` — `length > 256` or `position + length > 256`.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.length == 0 {
            return Err(LayoutError::ZeroLength {
                name: self.name.clone(),
            });
        }
        if self.length > 256 || u32::from(self.position) + u32::from(self.length) > 256 {
            return Err(LayoutError::OutOfBounds {
                name: self.name.clone(),
                position: self.position,
                length: self.length,
            });
        }
        Ok(())
    }

    /// The field's mask, right-aligned (before shifting to `position`).
    #[must_use]
    pub fn mask(&self) -> U256 {
        if self.length >= 256 {
            U256::MAX
        } else {
            (U256::one() << usize::from(self.length)) - 1
        }
    }

    /// Extracts this field from a value: shift right, then mask.
    #[must_use]
    pub fn extract(&self, value: U256) -> U256 {
        (value >> usize::from(self.position)) & self.mask()
    }

    /// Writes `attribute` into this field of `base`, replacing the range.
    ///
    /// Bits of `attribute` beyond the field's length are discarded.
    #[must_use]
    pub fn inject(&self, base: U256, attribute: U256) -> U256 {
        let mask = self.mask();
        let cleared = base & !(mask << usize::from(self.position));
        cleared | ((attribute & mask) << usize::from(self.position))
    }
}

// =============================================================================
// LAYOUT STORE
// =============================================================================

/// Attribute layouts keyed by scope identifier.
///
/// Layouts describe *interpretation* of identifier bits, not token
/// existence: they are set, read, and cleared independently of the token
/// lifecycle.
#[derive(Clone, Debug, Default)]
pub struct AttributeLayouts {
    layouts: HashMap<TokenId, Vec<AttributeField>>,
}

impl AttributeLayouts {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the scope's layout atomically.
    ///
    /// Every field is validated before anything is stored; on failure the
    /// previous layout stays in place. An empty field list is valid and
    /// clears all attributes for the scope.
    ///
    /// # Errors
    ///
    /// Propagates the first failing [`AttributeField::validate`].
    pub fn set_layout(
        &mut self,
        scope: TokenId,
        fields: Vec<AttributeField>,
    ) -> Result<(), LayoutError> {
        for field in &fields {
            field.validate()?;
        }
        self.layouts.insert(scope, fields);
        Ok(())
    }

    /// Replaces the scope's layout from parallel arrays.
    ///
    /// # Errors
    ///
    /// * `InconsistentArrays` — the arrays differ in length.
    /// * Field validation errors as in [`Self::set_layout`].
    pub fn set_layout_parts(
        &mut self,
        scope: TokenId,
        names: Vec<String>,
        lengths: Vec<u16>,
        positions: Vec<u16>,
    ) -> Result<(), LayoutError> {
        if names.len() != lengths.len() || names.len() != positions.len() {
            return Err(LayoutError::InconsistentArrays {
                names: names.len(),
                lengths: lengths.len(),
                positions: positions.len(),
            });
        }
        let fields = names
            .into_iter()
            .zip(lengths)
            .zip(positions)
            .map(|((name, length), position)| AttributeField {
                name,
                length,
                position,
            })
            .collect();
        self.set_layout(scope, fields)
    }

    /// Removes the scope's layout entirely.
    ///
    /// Observably equivalent to setting an empty layout.
    pub fn clear_layout(&mut self, scope: TokenId) {
        self.layouts.remove(&scope);
    }

    /// Returns the stored fields in insertion order; empty if none.
    #[must_use]
    pub fn layout(&self, scope: TokenId) -> &[AttributeField] {
        self.layouts.get(&scope).map_or(&[], Vec::as_slice)
    }

    /// Extracts the named attribute of `scope`'s layout from `value`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAttribute` if `name` is not present in the layout.
    pub fn attribute(
        &self,
        scope: TokenId,
        value: U256,
        name: &str,
    ) -> Result<U256, LayoutError> {
        self.layout(scope)
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.extract(value))
            .ok_or_else(|| LayoutError::UnknownAttribute {
                name: name.to_string(),
            })
    }

    /// Extracts every attribute of `scope`'s layout from `value` in one
    /// pass. An empty or absent layout yields an empty result.
    #[must_use]
    pub fn all_attributes(&self, scope: TokenId, value: U256) -> Vec<(String, U256)> {
        self.layout(scope)
            .iter()
            .map(|field| (field.name.clone(), field.extract(value)))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
