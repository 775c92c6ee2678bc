//! # Property Sweeps
//!
//! Randomized checks of the codec and ledger properties. Generators are
//! seeded so failures reproduce.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use token_ledger::prelude::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x1ed9e4)
    }

    fn random_u256(rng: &mut StdRng) -> U256 {
        let bytes: [u8; 32] = rng.gen();
        U256::from_big_endian(&bytes)
    }

    // =============================================================================
    // CLASSIFICATION TOTALITY
    // =============================================================================

    #[test]
    fn test_classification_totality_over_random_identifiers() {
        let codec = IdentifierCodec::default();
        let mut rng = rng();

        for _ in 0..10_000 {
            let id = random_u256(&mut rng);
            let classes = [
                codec.is_fungible(id),
                codec.is_non_fungible_collection(id),
                codec.is_non_fungible_instance(id),
            ];
            assert_eq!(
                classes.iter().filter(|&&class| class).count(),
                1,
                "identifier {id:?} must fall in exactly one class"
            );

            // The tagged decoding agrees with the predicates.
            match codec.classify(id) {
                TokenKind::Fungible(decoded) => {
                    assert!(codec.is_fungible(id));
                    assert_eq!(decoded, id);
                }
                TokenKind::NonFungibleCollection(decoded) => {
                    assert!(codec.is_non_fungible_collection(id));
                    assert_eq!(decoded, id);
                }
                TokenKind::NonFungibleInstance {
                    collection,
                    discriminator,
                } => {
                    assert!(codec.is_non_fungible_instance(id));
                    assert_eq!(collection | discriminator, id);
                    assert_eq!(collection, codec.collection_of(id));
                    // Composition round-trips the decomposition.
                    assert_eq!(codec.instance_of(collection, discriminator).unwrap(), id);
                }
            }

            // collection_of is idempotent.
            assert_eq!(
                codec.collection_of(codec.collection_of(id)),
                codec.collection_of(id)
            );
        }
    }

    #[test]
    fn test_classification_totality_across_mask_lengths() {
        let mut rng = rng();
        for mask_length in [1u16, 8, 32, 128, 255] {
            let codec = IdentifierCodec::new(mask_length).unwrap();
            for _ in 0..500 {
                let id = random_u256(&mut rng);
                let count = [
                    codec.is_fungible(id),
                    codec.is_non_fungible_collection(id),
                    codec.is_non_fungible_instance(id),
                ]
                .iter()
                .filter(|&&class| class)
                .count();
                assert_eq!(count, 1);
            }
        }
    }

    // =============================================================================
    // ATTRIBUTE ROUND-TRIP
    // =============================================================================

    #[test]
    fn test_attribute_round_trip_reproduces_masked_bits() {
        let mut layouts = AttributeLayouts::new();
        let scope = U256::from(1);
        let fields = vec![
            AttributeField::new("low", 17, 0),
            AttributeField::new("mid", 64, 17),
            AttributeField::new("overlap", 32, 60),
            AttributeField::new("top", 8, 248),
            AttributeField::new("word", 256, 0),
        ];
        layouts.set_layout(scope, fields.clone()).unwrap();

        let mut rng = rng();
        for _ in 0..1_000 {
            let value = random_u256(&mut rng);
            let extracted = layouts.all_attributes(scope, value);
            assert_eq!(extracted.len(), fields.len());

            // Re-encode every extracted attribute at its declared position;
            // within each field's range the original masked bits reappear.
            let mut rebuilt = U256::zero();
            for (field, (name, attribute)) in fields.iter().zip(&extracted) {
                assert_eq!(&field.name, name);
                rebuilt = field.inject(rebuilt, *attribute);
            }
            for field in &fields {
                assert_eq!(
                    field.extract(rebuilt),
                    field.extract(value),
                    "field {:?} lost bits in the round trip",
                    field.name
                );
            }
        }
    }

    // =============================================================================
    // CONSERVATION UNDER RANDOM OPERATION SEQUENCES
    // =============================================================================

    #[test]
    fn test_invariants_hold_under_random_operations() {
        let mut engine = TransferEngine::new(
            LedgerConfig {
                creation_policy: CreationPolicy::AutoCreate,
                ..LedgerConfig::default()
            },
            Box::new(AllowAll),
            Box::new(ReceiverRegistry::new()),
            Box::new(NullEventSink),
        )
        .unwrap();

        let accounts = [
            Address::from_tag(1),
            Address::from_tag(2),
            Address::from_tag(3),
        ];
        let fungibles = [U256::from(10), U256::from(11)];
        let collection = U256::one() << 224;
        let mut rng = rng();

        for step in 0..2_000u32 {
            let operator = accounts[rng.gen_range(0..accounts.len())];
            let to = accounts[rng.gen_range(0..accounts.len())];
            let id = if rng.gen_bool(0.5) {
                fungibles[rng.gen_range(0..fungibles.len())]
            } else {
                collection | U256::from(rng.gen_range(1..20u64))
            };
            let amount = if engine.codec().is_fungible(id) {
                U256::from(rng.gen_range(1..50u64))
            } else {
                U256::one()
            };

            // Any of these may legitimately fail (insufficient balance,
            // non-owned instance, burnt instance); the property is that
            // the ledger stays consistent either way.
            let _ = match rng.gen_range(0..3) {
                0 => engine.mint(operator, to, id, amount),
                1 => engine.transfer(operator, operator, to, id, amount),
                _ => engine.burn(operator, operator, id, amount),
            };

            let check = check_all(engine.ledger(), engine.codec());
            assert!(check.is_valid(), "step {step}: {check:?}");
        }

        // Spot-check supply conservation directly for the fungibles.
        for id in fungibles {
            let sum = accounts
                .iter()
                .fold(U256::zero(), |acc, &account| acc + engine.balance_of(account, id));
            assert_eq!(sum, engine.total_supply(id));
        }
    }

    // =============================================================================
    // EVENT SCHEMA
    // =============================================================================

    #[test]
    fn test_committed_events_survive_serde_round_trip() {
        let log = SharedEventLog::new();
        let mut engine = TransferEngine::new(
            LedgerConfig {
                creation_policy: CreationPolicy::AutoCreate,
                ..LedgerConfig::default()
            },
            Box::new(AllowAll),
            Box::new(ReceiverRegistry::new()),
            Box::new(log.clone()),
        )
        .unwrap();

        let minter = Address::from_tag(1);
        let alice = Address::from_tag(2);
        let collection = U256::one() << 224;
        let instance = engine.instance_of(collection, U256::from(9)).unwrap();

        engine.mint(minter, alice, U256::from(7), U256::from(100)).unwrap();
        engine.mint(minter, alice, instance, U256::one()).unwrap();
        engine.set_approval_for_all(alice, minter, true).unwrap();
        engine.burn(minter, alice, instance, U256::one()).unwrap();

        for event in log.snapshot() {
            let encoded = serde_json::to_string(&event).unwrap();
            let decoded: LedgerEvent = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, event);
        }
    }
}
