//! # Integration Scenarios
//!
//! End-to-end lifecycles across the engine, registry, pause gate, receiver
//! registry, and event log: the components wired together the way an
//! embedding application wires them.
//!
//! Every mutating step re-checks the ledger invariants (instance balances,
//! collection aggregation, supply conservation) instead of trusting the
//! bookkeeping.

#[cfg(test)]
mod tests {
    use token_ledger::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const MINTER: Address = Address::from_tag(0x01);
    const PAUSER: Address = Address::from_tag(0x02);
    const ALICE: Address = Address::from_tag(0x0A);
    const BOB: Address = Address::from_tag(0x0B);
    const CAROL: Address = Address::from_tag(0x0C);
    const CONTRACT: Address = Address::from_tag(0xC0);

    /// A non-fungible collection id under the default 32-bit prefix:
    /// flag bit 224 set, some prefix bits above it, discriminator zero.
    fn nf_collection(tag: u64) -> TokenId {
        (U256::one() << 224) | (U256::from(tag) << 225)
    }

    /// Engine with permissive roles, auto-created collections, an
    /// observable event log, and the given receiver registry.
    fn engine_with_receivers(receivers: ReceiverRegistry) -> (TransferEngine, SharedEventLog) {
        let log = SharedEventLog::new();
        let engine = TransferEngine::new(
            LedgerConfig {
                creation_policy: CreationPolicy::AutoCreate,
                ..LedgerConfig::default()
            },
            Box::new(AllowAll),
            Box::new(receivers),
            Box::new(log.clone()),
        )
        .unwrap();
        (engine, log)
    }

    fn engine() -> (TransferEngine, SharedEventLog) {
        engine_with_receivers(ReceiverRegistry::new())
    }

    fn assert_invariants(engine: &TransferEngine) {
        let check = check_all(engine.ledger(), engine.codec());
        assert!(check.is_valid(), "ledger invariants violated: {check:?}");
    }

    // =============================================================================
    // SCENARIO: FUNGIBLE MINT / TRANSFER / BURN
    // =============================================================================

    #[test]
    fn test_fungible_mint_transfer_burn_scenario() {
        let (mut engine, _log) = engine();
        let f1 = U256::from(0xF1);

        engine.mint(MINTER, ALICE, f1, U256::from(10)).unwrap();
        assert_invariants(&engine);

        engine.transfer(ALICE, ALICE, BOB, f1, U256::from(4)).unwrap();
        assert_eq!(engine.balance_of(ALICE, f1), U256::from(6));
        assert_eq!(engine.balance_of(BOB, f1), U256::from(4));
        assert_eq!(engine.total_supply(f1), U256::from(10));
        assert_invariants(&engine);

        engine.burn(BOB, BOB, f1, U256::from(4)).unwrap();
        assert_eq!(engine.balance_of(BOB, f1), U256::zero());
        assert_eq!(engine.total_supply(f1), U256::from(6));
        assert_invariants(&engine);
    }

    #[test]
    fn test_fungible_only_operations_emit_no_ownership_events() {
        let (mut engine, log) = engine();
        let f1 = U256::from(0xF1);

        engine.mint(MINTER, ALICE, f1, U256::from(10)).unwrap();
        engine.transfer(ALICE, ALICE, BOB, f1, U256::from(3)).unwrap();
        engine.burn(BOB, BOB, f1, U256::from(1)).unwrap();

        assert!(log
            .snapshot()
            .iter()
            .all(|event| !event.is_ownership_transfer()));
    }

    // =============================================================================
    // SCENARIO: NON-FUNGIBLE LIFECYCLE
    // =============================================================================

    #[test]
    fn test_non_fungible_lifecycle_scenario() {
        let (mut engine, _log) = engine();
        let c1 = nf_collection(1);
        let n1 = engine.instance_of(c1, U256::one()).unwrap();

        engine.mint(MINTER, ALICE, n1, U256::one()).unwrap();
        assert_eq!(engine.owner_of(n1).unwrap(), ALICE);
        assert_eq!(engine.balance_of(ALICE, c1), U256::one());
        assert_eq!(engine.total_supply(c1), U256::one());
        assert_invariants(&engine);

        engine.transfer(ALICE, ALICE, BOB, n1, U256::one()).unwrap();
        assert_eq!(engine.owner_of(n1).unwrap(), BOB);
        assert_eq!(engine.balance_of(ALICE, c1), U256::zero());
        assert_eq!(engine.balance_of(BOB, c1), U256::one());
        assert_invariants(&engine);

        // Re-minting an owned instance is refused.
        assert!(matches!(
            engine.mint(MINTER, CAROL, n1, U256::one()),
            Err(LedgerError::ExistingOrBurntNft { .. })
        ));

        // And stays refused after a burn: burnt instances are final.
        engine.burn(BOB, BOB, n1, U256::one()).unwrap();
        assert!(matches!(
            engine.mint(MINTER, CAROL, n1, U256::one()),
            Err(LedgerError::ExistingOrBurntNft { .. })
        ));
        assert_invariants(&engine);
    }

    #[test]
    fn test_mixed_batch_emits_both_dialects() {
        let (mut engine, log) = engine();
        let f1 = U256::from(0xF1);
        let c1 = nf_collection(1);
        let n1 = engine.instance_of(c1, U256::one()).unwrap();
        let n2 = engine.instance_of(c1, U256::from(2)).unwrap();

        engine
            .batch_mint(
                MINTER,
                ALICE,
                &[f1, n1, n2],
                &[U256::from(50), U256::one(), U256::one()],
            )
            .unwrap();
        assert_invariants(&engine);

        let events = log.snapshot();
        let batches: Vec<_> = events
            .iter()
            .filter(|event| event.is_balance_transfer())
            .collect();
        let ownership: Vec<_> = events
            .iter()
            .filter(|event| event.is_ownership_transfer())
            .collect();

        // One aggregate event for the whole batch, one ownership event
        // per instance touched, none for the fungible item.
        assert_eq!(batches.len(), 1);
        assert!(matches!(
            batches[0],
            LedgerEvent::TransferBatch { ids, .. } if ids.len() == 3
        ));
        assert_eq!(ownership.len(), 2);
    }

    // =============================================================================
    // SCENARIO: PAUSE GATE
    // =============================================================================

    #[test]
    fn test_pause_gate_scenario() {
        let (mut engine, _log) = engine();
        let c1 = nf_collection(1);
        let c2 = nf_collection(2);
        let in_c1 = engine.instance_of(c1, U256::one()).unwrap();
        let in_c2 = engine.instance_of(c2, U256::one()).unwrap();

        engine
            .batch_mint(MINTER, ALICE, &[in_c1, in_c2], &[U256::one(), U256::one()])
            .unwrap();

        engine.pause(PAUSER, c1).unwrap();

        // Anything in C1 is gated, identified by instance or collection.
        assert!(matches!(
            engine.transfer(ALICE, ALICE, BOB, in_c1, U256::one()),
            Err(LedgerError::IdIsPaused { .. })
        ));

        // Other collections keep working.
        engine.transfer(ALICE, ALICE, BOB, in_c2, U256::one()).unwrap();
        assert_eq!(engine.owner_of(in_c2).unwrap(), BOB);

        // Unpause restores prior behavior.
        engine.unpause(PAUSER, c1).unwrap();
        engine.transfer(ALICE, ALICE, BOB, in_c1, U256::one()).unwrap();
        assert_eq!(engine.owner_of(in_c1).unwrap(), BOB);
        assert_invariants(&engine);
    }

    #[test]
    fn test_pause_requires_pauser_role() {
        let mut roles = RoleTable::new();
        roles.grant(Role::Minter, MINTER);
        roles.grant(Role::Pauser, PAUSER);

        let mut engine = TransferEngine::new(
            LedgerConfig {
                creation_policy: CreationPolicy::AutoCreate,
                ..LedgerConfig::default()
            },
            Box::new(roles),
            Box::new(ReceiverRegistry::new()),
            Box::new(NullEventSink),
        )
        .unwrap();

        // The minter is not a pauser, and the pauser is not a minter.
        assert!(matches!(
            engine.pause(MINTER, U256::from(1)),
            Err(LedgerError::NotPauser { .. })
        ));
        assert!(matches!(
            engine.mint(PAUSER, ALICE, U256::from(1), U256::one()),
            Err(LedgerError::NotMinter { .. })
        ));

        engine.mint(MINTER, ALICE, U256::from(1), U256::from(5)).unwrap();
        engine.pause(PAUSER, U256::from(1)).unwrap();
        assert!(matches!(
            engine.transfer(ALICE, ALICE, BOB, U256::from(1), U256::one()),
            Err(LedgerError::IdIsPaused { .. })
        ));
    }

    #[test]
    fn test_pause_events_are_published() {
        let (mut engine, log) = engine();
        let c1 = nf_collection(1);

        engine.pause(PAUSER, c1).unwrap();
        engine.pause(PAUSER, c1).unwrap(); // idempotent, no second event
        engine.unpause(PAUSER, c1).unwrap();
        engine.set_global_pause(PAUSER, true).unwrap();

        let events = log.snapshot();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], LedgerEvent::CollectionPaused { id } if id == c1));
        assert!(matches!(events[1], LedgerEvent::CollectionUnpaused { id } if id == c1));
        assert!(matches!(events[2], LedgerEvent::GlobalPauseSet { paused: true }));
    }

    // =============================================================================
    // SCENARIO: RECEIVER ACCEPTANCE
    // =============================================================================

    #[test]
    fn test_rejecting_receiver_leaves_state_unchanged() {
        let mut receivers = ReceiverRegistry::new();
        receivers.register(CONTRACT, Box::new(RejectingReceiver));
        let (mut engine, log) = engine_with_receivers(receivers);
        let f1 = U256::from(0xF1);
        let n1 = engine.instance_of(nf_collection(1), U256::one()).unwrap();

        engine.mint(MINTER, ALICE, f1, U256::from(10)).unwrap();
        engine.mint(MINTER, ALICE, n1, U256::one()).unwrap();
        let committed = log.snapshot().len();

        // Mint straight into the rejecting contract.
        assert!(matches!(
            engine.mint(MINTER, CONTRACT, f1, U256::from(5)),
            Err(LedgerError::TransferRejected { .. })
        ));

        // Transfers into it, single and batch, fungible and instance.
        assert!(matches!(
            engine.transfer(ALICE, ALICE, CONTRACT, f1, U256::from(5)),
            Err(LedgerError::TransferRejected { .. })
        ));
        assert!(matches!(
            engine.batch_transfer(ALICE, ALICE, CONTRACT, &[n1], &[U256::one()]),
            Err(LedgerError::TransferRejected { .. })
        ));

        // Follow-up reads: nothing moved, nothing was published.
        assert_eq!(engine.balance_of(CONTRACT, f1), U256::zero());
        assert_eq!(engine.balance_of(ALICE, f1), U256::from(10));
        assert_eq!(engine.owner_of(n1).unwrap(), ALICE);
        assert_eq!(engine.total_supply(f1), U256::from(10));
        assert_eq!(log.snapshot().len(), committed);
        assert_invariants(&engine);
    }

    #[test]
    fn test_accepting_receiver_sees_batch_callback() {
        let recorder = RecordingReceiver::accepting();
        let calls = recorder.calls();
        let mut receivers = ReceiverRegistry::new();
        receivers.register(CONTRACT, Box::new(recorder));
        let (mut engine, _log) = engine_with_receivers(receivers);
        let f1 = U256::from(0xF1);
        let f2 = U256::from(0xF2);

        engine
            .batch_mint(MINTER, ALICE, &[f1, f2], &[U256::from(10), U256::from(20)])
            .unwrap();
        engine
            .batch_transfer(
                ALICE,
                ALICE,
                CONTRACT,
                &[f1, f2],
                &[U256::from(1), U256::from(2)],
            )
            .unwrap();

        let log = calls.lock().unwrap();
        assert_eq!(log.len(), 1);
        match &log[0] {
            ReceivedCall::Batch {
                operator,
                from,
                ids,
                amounts,
            } => {
                assert_eq!(*operator, ALICE);
                assert_eq!(*from, ALICE);
                assert_eq!(ids, &[f1, f2]);
                assert_eq!(amounts, &[U256::from(1), U256::from(2)]);
            }
            other => panic!("expected batch callback, got {other:?}"),
        }
    }

    #[test]
    fn test_burn_never_notifies_receivers() {
        let recorder = RecordingReceiver::accepting();
        let calls = recorder.calls();
        let mut receivers = ReceiverRegistry::new();
        receivers.register(CONTRACT, Box::new(recorder));
        let (mut engine, _log) = engine_with_receivers(receivers);
        let f1 = U256::from(0xF1);

        engine.mint(MINTER, CONTRACT, f1, U256::from(5)).unwrap();
        engine.burn(CONTRACT, CONTRACT, f1, U256::from(5)).unwrap();
        assert_eq!(engine.total_supply(f1), U256::zero());

        // Only the mint produced a callback; the burn made none.
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    // =============================================================================
    // SCENARIO: BATCH SEMANTICS
    // =============================================================================

    #[test]
    fn test_batch_self_transfer_snapshots_per_item() {
        let (mut engine, log) = engine();
        let f1 = U256::from(0xF1);
        engine.mint(MINTER, ALICE, f1, U256::from(10)).unwrap();
        log.drain();

        // Each self-transfer item is validated against the live balance,
        // so the full amount can ride in every item.
        engine
            .batch_transfer(
                ALICE,
                ALICE,
                ALICE,
                &[f1, f1],
                &[U256::from(10), U256::from(10)],
            )
            .unwrap();
        assert_eq!(engine.balance_of(ALICE, f1), U256::from(10));
        assert_eq!(log.len(), 1); // events still emitted

        // A real move drains the balance for later items.
        let err = engine
            .batch_transfer(
                ALICE,
                ALICE,
                BOB,
                &[f1, f1],
                &[U256::from(6), U256::from(6)],
            )
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                required: U256::from(6),
                available: U256::from(4),
            }
        );

        // The failed batch reverted in full.
        assert_eq!(engine.balance_of(ALICE, f1), U256::from(10));
        assert_eq!(engine.balance_of(BOB, f1), U256::zero());
        assert_invariants(&engine);
    }

    #[test]
    fn test_batch_burn_scenario() {
        let (mut engine, _log) = engine();
        let c1 = nf_collection(1);
        let n1 = engine.instance_of(c1, U256::one()).unwrap();
        let n2 = engine.instance_of(c1, U256::from(2)).unwrap();

        engine
            .batch_mint(MINTER, ALICE, &[n1, n2], &[U256::one(), U256::one()])
            .unwrap();
        engine
            .batch_burn(ALICE, ALICE, &[n1, n2], &[U256::one(), U256::one()])
            .unwrap();

        assert_eq!(engine.balance_of(ALICE, c1), U256::zero());
        assert_eq!(engine.total_supply(c1), U256::zero());
        assert_invariants(&engine);
    }

    // =============================================================================
    // SCENARIO: APPROVALS
    // =============================================================================

    #[test]
    fn test_operator_approval_flow() {
        let (mut engine, log) = engine();
        let f1 = U256::from(0xF1);
        engine.mint(MINTER, ALICE, f1, U256::from(10)).unwrap();

        engine.set_approval_for_all(ALICE, CAROL, true).unwrap();
        assert!(engine.is_approved_for_all(ALICE, CAROL));
        engine.transfer(CAROL, ALICE, BOB, f1, U256::from(4)).unwrap();

        engine.set_approval_for_all(ALICE, CAROL, false).unwrap();
        assert!(matches!(
            engine.transfer(CAROL, ALICE, BOB, f1, U256::one()),
            Err(LedgerError::NonApproved { .. })
        ));

        let approvals: Vec<_> = log
            .snapshot()
            .into_iter()
            .filter(|event| matches!(event, LedgerEvent::ApprovalForAll { .. }))
            .collect();
        assert_eq!(approvals.len(), 2);
    }

    #[test]
    fn test_instance_approval_flow() {
        let (mut engine, _log) = engine();
        let c1 = nf_collection(1);
        let n1 = engine.instance_of(c1, U256::one()).unwrap();
        engine.mint(MINTER, ALICE, n1, U256::one()).unwrap();

        // Only the owner (or its operator) may approve.
        assert!(matches!(
            engine.approve(BOB, CAROL, n1),
            Err(LedgerError::NonApproved { .. })
        ));

        engine.approve(ALICE, CAROL, n1).unwrap();
        assert_eq!(engine.approved_of(n1).unwrap(), CAROL);

        // An operator-for-all may administer approvals too.
        engine.set_approval_for_all(ALICE, BOB, true).unwrap();
        engine.approve(BOB, BOB, n1).unwrap();

        engine.transfer(BOB, ALICE, CAROL, n1, U256::one()).unwrap();
        assert_eq!(engine.owner_of(n1).unwrap(), CAROL);
        assert_eq!(engine.approved_of(n1).unwrap(), Address::ZERO);
    }

    // =============================================================================
    // SCENARIO: CREATION POLICY
    // =============================================================================

    #[test]
    fn test_strict_policy_end_to_end() {
        let log = SharedEventLog::new();
        let mut engine = TransferEngine::new(
            LedgerConfig::default(), // strict
            Box::new(AllowAll),
            Box::new(ReceiverRegistry::new()),
            Box::new(log.clone()),
        )
        .unwrap();
        let c1 = nf_collection(1);
        let n1 = engine.instance_of(c1, U256::one()).unwrap();

        assert!(matches!(
            engine.mint(MINTER, ALICE, n1, U256::one()),
            Err(LedgerError::UnknownCollection { .. })
        ));

        engine.create_collection(MINTER, c1).unwrap();
        assert!(matches!(
            engine.create_collection(MINTER, c1),
            Err(LedgerError::ExistingCollection { .. })
        ));
        assert!(matches!(
            engine.create_collection(MINTER, n1),
            Err(LedgerError::Codec(CodecError::NotACollectionIdentifier { .. }))
        ));

        engine.mint(MINTER, ALICE, n1, U256::one()).unwrap();
        assert_eq!(engine.creator_of(c1), MINTER);
        assert_eq!(engine.creator_of(n1), Address::ZERO);

        assert!(matches!(
            log.snapshot()[0],
            LedgerEvent::CollectionCreated { fungible: false, .. }
        ));
    }

    // =============================================================================
    // SCENARIO: ATTRIBUTE LAYOUTS OVER LIVE IDENTIFIERS
    // =============================================================================

    #[test]
    fn test_collection_and_instance_scopes_share_bits() {
        let (mut engine, _log) = engine();
        let c1 = nf_collection(1);
        let n1 = engine.instance_of(c1, U256::from(0x2A)).unwrap();

        // Collection scope interprets the prefix, instance scope aliases
        // the low bits; both read the same identifier independently.
        engine
            .set_layout(
                MINTER,
                c1,
                vec![AttributeField::new("series", 31, 225)],
            )
            .unwrap();
        engine
            .set_layout(
                MINTER,
                n1,
                vec![AttributeField::new("serial", 224, 0)],
            )
            .unwrap();

        let series = engine.attribute(c1, engine.codec().collection_of(n1), "series").unwrap();
        assert_eq!(series, U256::one());

        let serial = engine.attribute(n1, n1, "serial").unwrap();
        assert_eq!(serial, U256::from(0x2A));

        assert!(matches!(
            engine.attribute(c1, n1, "serial"),
            Err(LedgerError::Layout(LayoutError::UnknownAttribute { .. }))
        ));
    }
}
