//! Property-Based Tests for the learner state store
//!
//! Tests the following invariants:
//! - Restart consistency: add/delete sequences survive re-initialization, newest additions first
//! - Idempotence: mark_learned twice equals mark_learned once
//! - Streak counting: N increments yield N
//! - Snapshot round-trip for all three persisted collections
//! - Isolation: a corrupted key falls back to its default without touching the others

use std::collections::BTreeSet;

use proptest::prelude::*;

use almani::models::{Level, VocabularyEntry};
use almani::storage::snapshot::{self, LEARNED_KEY, STREAK_KEY, WORDS_KEY};
use almani::storage::{KeyValueStore, MemoryStore};
use almani::store::{LearnerStore, StoreError};

mod common;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_level() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::A1), Just(Level::A2)]
}

fn arb_entry() -> impl Strategy<Value = VocabularyEntry> {
    (
        "[a-z0-9]{1,8}",  // id
        "\\PC{1,16}",     // german
        "\\PC{1,16}",     // arabic
        "\\PC{1,16}",     // english
        "\\PC{0,24}",     // example
        arb_level(),
        "[A-Za-z]{0,10}", // category
    )
        .prop_map(
            |(id, german, arabic, english, example, level, category)| VocabularyEntry {
                id,
                german,
                arabic,
                english,
                example,
                level,
                category,
            },
        )
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Delete(u8),
    DeleteSeed(u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12).prop_map(Op::Add),
        (0u8..12).prop_map(Op::Delete),
        (1u8..=10).prop_map(Op::DeleteSeed),
    ]
}

fn arb_corruption() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("{"),
        Just("not json"),
        Just("null"),
        Just("-1"),
        Just(r#"{"version": 99, "data": []}"#),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// PBT-1: add/delete sequences survive a restart, newest additions first
    #[test]
    fn add_delete_sequence_survives_restart(ops in prop::collection::vec(arb_op(), 0..40)) {
        let (mut store, backend) = common::bundled_store();
        let mut model: Vec<VocabularyEntry> = common::bundled_words();

        for op in ops {
            match op {
                Op::Add(n) => {
                    let entry = common::word(&format!("u{n}"), &format!("Wort {n}"));
                    let duplicate = model.iter().any(|w| w.id == entry.id);
                    let result = store.add_vocabulary(entry.clone());
                    if duplicate {
                        prop_assert!(matches!(result, Err(StoreError::DuplicateId(_))));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(0, entry);
                    }
                }
                Op::Delete(n) | Op::DeleteSeed(n) => {
                    let id = match op {
                        Op::Delete(_) => format!("u{n}"),
                        _ => format!("w{n}"),
                    };
                    let existed = model.iter().any(|w| w.id == id);
                    prop_assert_eq!(store.delete_vocabulary(&id).unwrap(), existed);
                    model.retain(|w| w.id != id);
                }
            }
        }

        let restarted = common::restart(&backend);
        prop_assert_eq!(restarted.list_vocabulary(), model.as_slice());
    }

    /// PBT-2: mark_learned is idempotent
    #[test]
    fn mark_learned_is_idempotent(ids in prop::collection::vec("w[0-9]{1,2}", 1..10)) {
        let (mut once, _) = common::bundled_store();
        let (mut twice, _) = common::bundled_store();

        for id in &ids {
            once.mark_learned(id).unwrap();
            twice.mark_learned(id).unwrap();
            prop_assert!(!twice.mark_learned(id).unwrap());
        }

        prop_assert_eq!(once.learned_ids(), twice.learned_ids());
    }

    /// PBT-3: N increments from zero yield N, durably
    #[test]
    fn streak_counts_increments(n in 0u32..50) {
        let (mut store, backend) = common::bundled_store();
        for _ in 0..n {
            store.increment_streak().unwrap();
        }

        prop_assert_eq!(store.streak(), n);
        prop_assert_eq!(common::restart(&backend).streak(), n);
    }

    /// PBT-4: snapshot encode/decode round-trips every persisted collection
    #[test]
    fn snapshot_roundtrip(
        words in prop::collection::vec(arb_entry(), 0..8),
        learned in prop::collection::btree_set("[a-z0-9]{1,8}", 0..8),
        streak in any::<u32>(),
    ) {
        let raw = snapshot::encode(&words).unwrap();
        let restored: snapshot::Snapshot<Vec<VocabularyEntry>> = snapshot::decode(&raw).unwrap();
        prop_assert_eq!(restored.data, words);

        let raw = snapshot::encode(&learned).unwrap();
        let restored: snapshot::Snapshot<BTreeSet<String>> = snapshot::decode(&raw).unwrap();
        prop_assert_eq!(restored.data, learned);

        let raw = snapshot::encode(&streak).unwrap();
        let restored: snapshot::Snapshot<u32> = snapshot::decode(&raw).unwrap();
        prop_assert_eq!(restored.data, streak);
    }

    /// PBT-5: corrupting one key resets only that key
    #[test]
    fn corrupted_key_falls_back_alone(key_index in 0usize..3, garbage in arb_corruption()) {
        let (mut store, backend) = common::bundled_store();
        store.add_vocabulary(common::word("u1", "das Buch")).unwrap();
        store.mark_learned("w3").unwrap();
        store.increment_streak().unwrap();
        store.increment_streak().unwrap();

        let key = [WORDS_KEY, LEARNED_KEY, STREAK_KEY][key_index];
        backend.set(key, garbage).unwrap();

        let restarted = common::restart(&backend);

        let seed = common::bundled_words();
        if key == WORDS_KEY {
            prop_assert_eq!(restarted.list_vocabulary(), seed.as_slice());
        } else {
            prop_assert_eq!(restarted.list_vocabulary().len(), 11);
            prop_assert_eq!(&restarted.list_vocabulary()[0].id, "u1");
        }

        if key == LEARNED_KEY {
            prop_assert!(restarted.learned_ids().is_empty());
        } else {
            prop_assert!(restarted.is_learned("w3"));
        }

        if key == STREAK_KEY {
            prop_assert_eq!(restarted.streak(), 0);
        } else {
            prop_assert_eq!(restarted.streak(), 2);
        }
    }
}

#[test]
fn fresh_memory_backend_is_seeded() {
    let backend = MemoryStore::new();
    let store = LearnerStore::initialize(backend.clone(), &common::bundled_words());

    assert_eq!(store.list_vocabulary().len(), 10);
    for key in [WORDS_KEY, LEARNED_KEY, STREAK_KEY] {
        assert!(backend.get(key).unwrap().is_some(), "{key} not written");
    }
}
