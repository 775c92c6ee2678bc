//! # Transfer Engine
//!
//! Orchestration facade over the domain: every externally visible operation
//! of the ledger enters here.
//!
//! ## Operation pipeline
//!
//! ```text
//! caller ──► role check ──► checkpoint ──► per item:
//!                                            pause gate ─► classify ─► approval ─► ledger mutation
//!                            │
//!                            ├─ any failure ──► restore checkpoint, surface error
//!                            └─ all applied ──► receiver callback ──► publish buffered events
//!                                                   │
//!                                                   └─ rejected ──► restore checkpoint, TransferRejected
//! ```
//!
//! State mutations are committed *before* the receiver callback runs, so a
//! re-entrant read during the callback observes consistent post-mutation
//! state; the buffered events become visible only after acceptance. Either
//! the whole operation lands or none of it does.

use crate::domain::attributes::{AttributeField, AttributeLayouts};
use crate::domain::identifier::{IdentifierCodec, TokenKind};
use crate::domain::ledger::InventoryLedger;
use crate::domain::pause::PauseGate;
use crate::domain::registry::{CollectionRegistry, CreationPolicy};
use crate::domain::value_objects::{Address, Amount, TokenId, U256};
use crate::errors::LedgerError;
use crate::events::LedgerEvent;
use crate::ports::outbound::{Authorization, EventSink, ReceiverHost};

use tracing::{debug, info, warn};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Deployment configuration of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Width of the collection prefix in bits; fixed per deployment.
    pub mask_length: u16,
    /// How collections come into existence.
    pub creation_policy: CreationPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            mask_length: IdentifierCodec::DEFAULT_MASK_LENGTH,
            creation_policy: CreationPolicy::default(),
        }
    }
}

/// Pre-operation state capture for all-or-nothing semantics.
struct Checkpoint {
    ledger: InventoryLedger,
    registry: CollectionRegistry,
}

// =============================================================================
// ENGINE
// =============================================================================

/// The dual-standard token ledger engine.
///
/// Owns the domain state and the outbound collaborators. All operations
/// are atomic: they either fully succeed (state applied, events published,
/// receiver notified) or fully revert with no partial effect.
pub struct TransferEngine {
    config: LedgerConfig,
    codec: IdentifierCodec,
    registry: CollectionRegistry,
    pause: PauseGate,
    ledger: InventoryLedger,
    layouts: AttributeLayouts,
    auth: Box<dyn Authorization>,
    receivers: Box<dyn ReceiverHost>,
    events: Box<dyn EventSink>,
}

impl TransferEngine {
    /// Creates an engine over empty state.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaskLength` if the configured mask length is
    /// outside `1..=255`.
    pub fn new(
        config: LedgerConfig,
        auth: Box<dyn Authorization>,
        receivers: Box<dyn ReceiverHost>,
        events: Box<dyn EventSink>,
    ) -> Result<Self, LedgerError> {
        let codec = IdentifierCodec::new(config.mask_length)?;
        Ok(Self {
            config,
            codec,
            registry: CollectionRegistry::new(),
            pause: PauseGate::new(),
            ledger: InventoryLedger::new(),
            layouts: AttributeLayouts::new(),
            auth,
            receivers,
            events,
        })
    }

    /// Creates an engine with permissive collaborators: every role check
    /// passes, every recipient is a plain account, events are dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaskLength` as in [`Self::new`].
    pub fn permissive(config: LedgerConfig) -> Result<Self, LedgerError> {
        use crate::adapters::{AllowAll, NullEventSink, ReceiverRegistry};
        Self::new(
            config,
            Box::new(AllowAll),
            Box::new(ReceiverRegistry::new()),
            Box::new(NullEventSink),
        )
    }

    /// The deployment configuration.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The identifier codec of this deployment.
    #[must_use]
    pub fn codec(&self) -> &IdentifierCodec {
        &self.codec
    }

    /// Read access to the raw inventory state (invariant checks, tests).
    #[must_use]
    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    // -------------------------------------------------------------------------
    // Collection management
    // -------------------------------------------------------------------------

    /// Explicitly creates a collection with `caller` as creator.
    ///
    /// # Errors
    ///
    /// `NotMinter`, `NotACollectionIdentifier`, `ExistingCollection`,
    /// `ZeroAddress`.
    pub fn create_collection(&mut self, caller: Address, id: TokenId) -> Result<(), LedgerError> {
        if !self.auth.is_minter(caller) {
            return Err(LedgerError::NotMinter { account: caller });
        }
        let fungible = self.registry.create(&self.codec, id, caller)?;
        info!(creator = ?caller, id = ?id, fungible, "collection created");
        self.events.publish(LedgerEvent::CollectionCreated {
            id,
            creator: caller,
            fungible,
        });
        Ok(())
    }

    /// Returns the creator of a collection, or the zero address for
    /// instances and unregistered identifiers.
    #[must_use]
    pub fn creator_of(&self, id: TokenId) -> Address {
        self.registry.creator_of(id)
    }

    // -------------------------------------------------------------------------
    // Mint
    // -------------------------------------------------------------------------

    /// Mints `amount` of `id` to `to`.
    ///
    /// # Errors
    ///
    /// `NotMinter`, `MintToZero`, `Paused`/`IdIsPaused`, `NotTokenId`,
    /// `UnknownCollection` (strict policy), `ZeroValue`, `SupplyOverflow`,
    /// `WrongNftValue`, `ExistingOrBurntNft`, `TransferRejected`.
    pub fn mint(
        &mut self,
        operator: Address,
        to: Address,
        id: TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.execute_mint(operator, to, &[id], &[amount], false)
    }

    /// Mints every `(id, amount)` pair to `to` as one atomic batch.
    ///
    /// # Errors
    ///
    /// `InconsistentArrays` on length mismatch, otherwise as [`Self::mint`];
    /// any single item failure reverts the whole batch.
    pub fn batch_mint(
        &mut self,
        operator: Address,
        to: Address,
        ids: &[TokenId],
        amounts: &[Amount],
    ) -> Result<(), LedgerError> {
        check_paired(ids.len(), amounts.len())?;
        self.execute_mint(operator, to, ids, amounts, true)
    }

    fn execute_mint(
        &mut self,
        operator: Address,
        to: Address,
        ids: &[TokenId],
        amounts: &[Amount],
        batch: bool,
    ) -> Result<(), LedgerError> {
        if !self.auth.is_minter(operator) {
            return Err(LedgerError::NotMinter { account: operator });
        }
        if to.is_zero() {
            return Err(LedgerError::MintToZero);
        }
        debug!(operator = ?operator, to = ?to, items = ids.len(), "mint requested");

        let checkpoint = self.checkpoint();
        match self.apply_mint(operator, to, ids, amounts, batch) {
            Ok(events) => {
                self.settle_credit(checkpoint, operator, Address::ZERO, to, ids, amounts, batch, events)
            }
            Err(err) => {
                self.rollback(checkpoint);
                Err(err)
            }
        }
    }

    fn apply_mint(
        &mut self,
        operator: Address,
        to: Address,
        ids: &[TokenId],
        amounts: &[Amount],
        batch: bool,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let mut created = Vec::new();
        let mut ownership = Vec::new();

        for (&id, &amount) in ids.iter().zip(amounts) {
            self.pause.check(&self.codec, id)?;
            match self.codec.classify(id) {
                TokenKind::NonFungibleCollection(_) => {
                    return Err(LedgerError::NotTokenId { id })
                }
                TokenKind::Fungible(id) => {
                    self.ensure_collection(id, operator, &mut created)?;
                    self.ledger.mint_fungible(to, id, amount)?;
                }
                TokenKind::NonFungibleInstance { collection, .. } => {
                    if amount != U256::one() {
                        return Err(LedgerError::WrongNftValue { amount });
                    }
                    self.ensure_collection(collection, operator, &mut created)?;
                    self.ledger.mint_instance(to, collection, id)?;
                    ownership.push(LedgerEvent::OwnershipTransfer {
                        from: Address::ZERO,
                        to,
                        instance: id,
                    });
                }
            }
        }

        let mut events = created;
        events.push(aggregate_event(operator, Address::ZERO, to, ids, amounts, batch));
        events.extend(ownership);
        Ok(events)
    }

    // -------------------------------------------------------------------------
    // Transfer
    // -------------------------------------------------------------------------

    /// Moves `amount` of `id` from `from` to `to` on behalf of `operator`.
    ///
    /// A self-transfer (`from == to`) is a balance no-op that still runs
    /// every check and still emits events.
    ///
    /// # Errors
    ///
    /// `TransferToZero`, `Paused`/`IdIsPaused`, `NotTokenId`,
    /// `NonApproved`, `ZeroValue`, `InsufficientBalance`, `WrongNftValue`,
    /// `NonOwnedNft`, `TransferRejected`.
    pub fn transfer(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        id: TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.execute_transfer(operator, from, to, &[id], &[amount], false)
    }

    /// Moves every `(id, amount)` pair as one atomic batch.
    ///
    /// The balance snapshot backing self-transfer semantics is per item:
    /// each item sees the effects of the items before it.
    ///
    /// # Errors
    ///
    /// `InconsistentArrays` on length mismatch, otherwise as
    /// [`Self::transfer`]; any single item failure reverts the whole batch.
    pub fn batch_transfer(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        ids: &[TokenId],
        amounts: &[Amount],
    ) -> Result<(), LedgerError> {
        check_paired(ids.len(), amounts.len())?;
        self.execute_transfer(operator, from, to, ids, amounts, true)
    }

    fn execute_transfer(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        ids: &[TokenId],
        amounts: &[Amount],
        batch: bool,
    ) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::TransferToZero);
        }
        debug!(operator = ?operator, from = ?from, to = ?to, items = ids.len(), "transfer requested");

        let checkpoint = self.checkpoint();
        match self.apply_transfer(operator, from, to, ids, amounts, batch) {
            Ok(events) => {
                self.settle_credit(checkpoint, operator, from, to, ids, amounts, batch, events)
            }
            Err(err) => {
                self.rollback(checkpoint);
                Err(err)
            }
        }
    }

    fn apply_transfer(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        ids: &[TokenId],
        amounts: &[Amount],
        batch: bool,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let mut ownership = Vec::new();

        for (&id, &amount) in ids.iter().zip(amounts) {
            self.pause.check(&self.codec, id)?;
            match self.codec.classify(id) {
                TokenKind::NonFungibleCollection(_) => {
                    return Err(LedgerError::NotTokenId { id })
                }
                TokenKind::Fungible(id) => {
                    self.check_approval(from, operator, None)?;
                    self.ledger.transfer_fungible(from, to, id, amount)?;
                }
                TokenKind::NonFungibleInstance { collection, .. } => {
                    if amount != U256::one() {
                        return Err(LedgerError::WrongNftValue { amount });
                    }
                    self.check_approval(from, operator, Some(id))?;
                    self.ledger.transfer_instance(from, to, collection, id)?;
                    ownership.push(LedgerEvent::OwnershipTransfer {
                        from,
                        to,
                        instance: id,
                    });
                }
            }
        }

        let mut events = vec![aggregate_event(operator, from, to, ids, amounts, batch)];
        events.extend(ownership);
        Ok(events)
    }

    // -------------------------------------------------------------------------
    // Burn
    // -------------------------------------------------------------------------

    /// Burns `amount` of `id` from `from` on behalf of `operator`.
    ///
    /// Mirrors a transfer to the null account: no receiver callback is
    /// made, and burnt instances are never re-mintable.
    ///
    /// # Errors
    ///
    /// `Paused`/`IdIsPaused`, `NotTokenId`, `NonApproved`, `ZeroValue`,
    /// `InsufficientBalance`, `WrongNftValue`, `NonOwnedNft`.
    pub fn burn(
        &mut self,
        operator: Address,
        from: Address,
        id: TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.execute_burn(operator, from, &[id], &[amount], false)
    }

    /// Burns every `(id, amount)` pair as one atomic batch.
    ///
    /// # Errors
    ///
    /// `InconsistentArrays` on length mismatch, otherwise as [`Self::burn`].
    pub fn batch_burn(
        &mut self,
        operator: Address,
        from: Address,
        ids: &[TokenId],
        amounts: &[Amount],
    ) -> Result<(), LedgerError> {
        check_paired(ids.len(), amounts.len())?;
        self.execute_burn(operator, from, ids, amounts, true)
    }

    fn execute_burn(
        &mut self,
        operator: Address,
        from: Address,
        ids: &[TokenId],
        amounts: &[Amount],
        batch: bool,
    ) -> Result<(), LedgerError> {
        debug!(operator = ?operator, from = ?from, items = ids.len(), "burn requested");

        let checkpoint = self.checkpoint();
        let events = match self.apply_burn(operator, from, ids, amounts, batch) {
            Ok(events) => events,
            Err(err) => {
                self.rollback(checkpoint);
                return Err(err);
            }
        };

        // The null account never rejects: no receiver callback for burns.
        info!(operator = ?operator, from = ?from, items = ids.len(), "burn committed");
        for event in events {
            self.events.publish(event);
        }
        Ok(())
    }

    fn apply_burn(
        &mut self,
        operator: Address,
        from: Address,
        ids: &[TokenId],
        amounts: &[Amount],
        batch: bool,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let mut ownership = Vec::new();

        for (&id, &amount) in ids.iter().zip(amounts) {
            self.pause.check(&self.codec, id)?;
            match self.codec.classify(id) {
                TokenKind::NonFungibleCollection(_) => {
                    return Err(LedgerError::NotTokenId { id })
                }
                TokenKind::Fungible(id) => {
                    self.check_approval(from, operator, None)?;
                    self.ledger.burn_fungible(from, id, amount)?;
                }
                TokenKind::NonFungibleInstance { collection, .. } => {
                    if amount != U256::one() {
                        return Err(LedgerError::WrongNftValue { amount });
                    }
                    self.check_approval(from, operator, Some(id))?;
                    self.ledger.burn_instance(from, collection, id)?;
                    ownership.push(LedgerEvent::OwnershipTransfer {
                        from,
                        to: Address::ZERO,
                        instance: id,
                    });
                }
            }
        }

        let mut events = vec![aggregate_event(operator, from, Address::ZERO, ids, amounts, batch)];
        events.extend(ownership);
        Ok(events)
    }

    // -------------------------------------------------------------------------
    // Approvals
    // -------------------------------------------------------------------------

    /// Toggles `operator` as an operator-for-all of `caller`.
    ///
    /// # Errors
    ///
    /// `ZeroAddress` if `operator` is the null account.
    pub fn set_approval_for_all(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), LedgerError> {
        if operator.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.ledger.set_approval_for_all(caller, operator, approved);
        self.events.publish(LedgerEvent::ApprovalForAll {
            owner: caller,
            operator,
            approved,
        });
        Ok(())
    }

    /// Sets `spender` as the single approved spender of `instance`; the
    /// zero address clears the approval.
    ///
    /// # Errors
    ///
    /// `NonExistingNft` if the instance has no owner; `NonApproved` unless
    /// `caller` is the owner or one of its operators-for-all.
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        instance: TokenId,
    ) -> Result<(), LedgerError> {
        let owner = self
            .ledger
            .owner_of(instance)
            .ok_or(LedgerError::NonExistingNft { id: instance })?;
        if caller != owner && !self.ledger.is_approved_for_all(owner, caller) {
            return Err(LedgerError::NonApproved {
                operator: caller,
                holder: owner,
            });
        }
        self.ledger.approve_instance(instance, spender)?;
        self.events.publish(LedgerEvent::InstanceApproval {
            owner,
            spender,
            instance,
        });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Pausing
    // -------------------------------------------------------------------------

    /// Adds an identifier's collection to the paused set.
    ///
    /// # Errors
    ///
    /// `NotPauser`.
    pub fn pause(&mut self, caller: Address, id: TokenId) -> Result<(), LedgerError> {
        self.require_pauser(caller)?;
        let collection = self.codec.collection_of(id);
        if self.pause.pause(&self.codec, collection) {
            info!(pauser = ?caller, id = ?collection, "collection paused");
            self.events
                .publish(LedgerEvent::CollectionPaused { id: collection });
        }
        Ok(())
    }

    /// Removes an identifier's collection from the paused set.
    ///
    /// # Errors
    ///
    /// `NotPauser`.
    pub fn unpause(&mut self, caller: Address, id: TokenId) -> Result<(), LedgerError> {
        self.require_pauser(caller)?;
        let collection = self.codec.collection_of(id);
        if self.pause.unpause(&self.codec, collection) {
            info!(pauser = ?caller, id = ?collection, "collection unpaused");
            self.events
                .publish(LedgerEvent::CollectionUnpaused { id: collection });
        }
        Ok(())
    }

    /// Sets the global pause flag.
    ///
    /// # Errors
    ///
    /// `NotPauser`.
    pub fn set_global_pause(&mut self, caller: Address, paused: bool) -> Result<(), LedgerError> {
        self.require_pauser(caller)?;
        if self.pause.set_global(paused) {
            info!(pauser = ?caller, paused, "global pause flag changed");
            self.events.publish(LedgerEvent::GlobalPauseSet { paused });
        }
        Ok(())
    }

    /// Returns true if the identifier's collection is paused.
    #[must_use]
    pub fn is_paused(&self, id: TokenId) -> bool {
        self.pause.is_paused(&self.codec, id)
    }

    /// Returns the global pause flag.
    #[must_use]
    pub fn is_globally_paused(&self) -> bool {
        self.pause.is_globally_paused()
    }

    // -------------------------------------------------------------------------
    // Attribute layouts
    // -------------------------------------------------------------------------

    /// Replaces the scope's attribute layout.
    ///
    /// # Errors
    ///
    /// `NotOwner`; layout validation errors (`ZeroLength`, `OutOfBounds`).
    pub fn set_layout(
        &mut self,
        caller: Address,
        scope: TokenId,
        fields: Vec<AttributeField>,
    ) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        self.layouts.set_layout(scope, fields)?;
        Ok(())
    }

    /// Replaces the scope's attribute layout from parallel arrays.
    ///
    /// # Errors
    ///
    /// `NotOwner`; `InconsistentArrays`; layout validation errors.
    pub fn set_layout_parts(
        &mut self,
        caller: Address,
        scope: TokenId,
        names: Vec<String>,
        lengths: Vec<u16>,
        positions: Vec<u16>,
    ) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        self.layouts
            .set_layout_parts(scope, names, lengths, positions)?;
        Ok(())
    }

    /// Removes the scope's attribute layout.
    ///
    /// # Errors
    ///
    /// `NotOwner`.
    pub fn clear_layout(&mut self, caller: Address, scope: TokenId) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        self.layouts.clear_layout(scope);
        Ok(())
    }

    /// The scope's stored layout, in insertion order.
    #[must_use]
    pub fn layout(&self, scope: TokenId) -> &[AttributeField] {
        self.layouts.layout(scope)
    }

    /// Extracts one named attribute of `scope`'s layout from `value`.
    ///
    /// # Errors
    ///
    /// `UnknownAttribute`.
    pub fn attribute(
        &self,
        scope: TokenId,
        value: U256,
        name: &str,
    ) -> Result<U256, LedgerError> {
        Ok(self.layouts.attribute(scope, value, name)?)
    }

    /// Extracts every attribute of `scope`'s layout from `value`.
    #[must_use]
    pub fn all_attributes(&self, scope: TokenId, value: U256) -> Vec<(String, U256)> {
        self.layouts.all_attributes(scope, value)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Balance of `account` for `id`.
    #[must_use]
    pub fn balance_of(&self, account: Address, id: TokenId) -> Amount {
        self.ledger.balance_of(account, id)
    }

    /// Balances for every `(account, id)` pair.
    ///
    /// # Errors
    ///
    /// `InconsistentArrays` on length mismatch.
    pub fn balance_of_batch(
        &self,
        accounts: &[Address],
        ids: &[TokenId],
    ) -> Result<Vec<Amount>, LedgerError> {
        check_paired(accounts.len(), ids.len())?;
        Ok(accounts
            .iter()
            .zip(ids)
            .map(|(&account, &id)| self.ledger.balance_of(account, id))
            .collect())
    }

    /// Current owner of an instance.
    ///
    /// # Errors
    ///
    /// `NonExistingNft` for never-minted or burnt instances.
    pub fn owner_of(&self, instance: TokenId) -> Result<Address, LedgerError> {
        self.ledger
            .owner_of(instance)
            .ok_or(LedgerError::NonExistingNft { id: instance })
    }

    /// Single approved spender of an instance (zero when unset).
    ///
    /// # Errors
    ///
    /// `NonExistingNft`.
    pub fn approved_of(&self, instance: TokenId) -> Result<Address, LedgerError> {
        self.ledger.approved_of(instance)
    }

    /// Returns true if `operator` is an operator-for-all of `owner`.
    #[must_use]
    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.ledger.is_approved_for_all(owner, operator)
    }

    /// Total supply of an identifier.
    #[must_use]
    pub fn total_supply(&self, id: TokenId) -> Amount {
        self.ledger.total_supply(id)
    }

    /// Decodes an identifier into its tagged form.
    #[must_use]
    pub fn classify(&self, id: TokenId) -> TokenKind {
        self.codec.classify(id)
    }

    /// Composes a non-fungible instance identifier.
    ///
    /// # Errors
    ///
    /// `NotACollectionIdentifier`, `InvalidDiscriminator`.
    pub fn instance_of(
        &self,
        collection: TokenId,
        discriminator: U256,
    ) -> Result<TokenId, LedgerError> {
        Ok(self.codec.instance_of(collection, discriminator)?)
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            ledger: self.ledger.snapshot(),
            registry: self.registry.clone(),
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        self.ledger.restore(checkpoint.ledger);
        self.registry = checkpoint.registry;
    }

    /// Phase 2 of a crediting operation: receiver callback over committed
    /// state, then event publication.
    #[allow(clippy::too_many_arguments)]
    fn settle_credit(
        &mut self,
        checkpoint: Checkpoint,
        operator: Address,
        from: Address,
        to: Address,
        ids: &[TokenId],
        amounts: &[Amount],
        batch: bool,
        events: Vec<LedgerEvent>,
    ) -> Result<(), LedgerError> {
        if let Some(receiver) = self.receivers.receiver_for(to) {
            let verdict = if batch {
                receiver.on_batch_received(operator, from, ids, amounts)
            } else {
                receiver.on_single_received(operator, from, ids[0], amounts[0])
            };
            if !verdict.is_accepted() {
                warn!(recipient = ?to, "transfer rejected by receiver, rolling back");
                self.rollback(checkpoint);
                return Err(LedgerError::TransferRejected { recipient: to });
            }
        }

        info!(operator = ?operator, from = ?from, to = ?to, items = ids.len(), "operation committed");
        for event in events {
            self.events.publish(event);
        }
        Ok(())
    }

    fn ensure_collection(
        &mut self,
        collection: TokenId,
        operator: Address,
        events: &mut Vec<LedgerEvent>,
    ) -> Result<(), LedgerError> {
        if self.registry.is_created(collection) {
            return Ok(());
        }
        match self.config.creation_policy {
            CreationPolicy::Strict => Err(LedgerError::UnknownCollection { id: collection }),
            CreationPolicy::AutoCreate => {
                let fungible = self.registry.create(&self.codec, collection, operator)?;
                events.push(LedgerEvent::CollectionCreated {
                    id: collection,
                    creator: operator,
                    fungible,
                });
                Ok(())
            }
        }
    }

    fn check_approval(
        &self,
        holder: Address,
        operator: Address,
        instance: Option<TokenId>,
    ) -> Result<(), LedgerError> {
        if self.ledger.is_authorized(holder, operator, instance) {
            Ok(())
        } else {
            Err(LedgerError::NonApproved { operator, holder })
        }
    }

    fn require_pauser(&self, caller: Address) -> Result<(), LedgerError> {
        if self.auth.is_pauser(caller) {
            Ok(())
        } else {
            Err(LedgerError::NotPauser { account: caller })
        }
    }

    fn require_owner(&self, caller: Address) -> Result<(), LedgerError> {
        if self.auth.is_owner(caller) {
            Ok(())
        } else {
            Err(LedgerError::NotOwner { account: caller })
        }
    }
}

impl std::fmt::Debug for TransferEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferEngine")
            .field("config", &self.config)
            .field("collections", &self.registry.len())
            .finish_non_exhaustive()
    }
}

fn aggregate_event(
    operator: Address,
    from: Address,
    to: Address,
    ids: &[TokenId],
    amounts: &[Amount],
    batch: bool,
) -> LedgerEvent {
    if batch {
        LedgerEvent::TransferBatch {
            operator,
            from,
            to,
            ids: ids.to_vec(),
            amounts: amounts.to_vec(),
        }
    } else {
        LedgerEvent::TransferSingle {
            operator,
            from,
            to,
            id: ids[0],
            amount: amounts[0],
        }
    }
}

fn check_paired(left: usize, right: usize) -> Result<(), LedgerError> {
    if left == right {
        Ok(())
    } else {
        Err(LedgerError::InconsistentArrays { left, right })
    }
}

// =============================================================================
// TESTS
// =============================================================================
