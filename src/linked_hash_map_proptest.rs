#![cfg(test)]

// Property tests for LinkedHashMap kept inside the crate so they can look at
// the bucket table directly.

use crate::cursor::Cursor;
use crate::error::Error;
use crate::linked_hash_map::LinkedHashMap;
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::HashMap;
use std::hash::Hasher;

// Pool-indexed operations: indices shrink to earlier keys, op lists shrink
// in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Upsert(usize, i32),
    Erase(usize),
    Remove(usize),
    At(usize),
    Mutate(usize, i32),
    Clear,
    Walk,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Upsert(i, v)),
            2 => idx.clone().prop_map(OpI::Erase),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::At),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Walk),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Model: entries in insertion order.
fn model_pos(model: &[(String, i32)], k: &str) -> Option<usize> {
    model.iter().position(|(mk, _)| mk == k)
}

// Drive `sut` and an ordered Vec model through the same operations.
// Invariants checked after every op:
// - iteration equals the model (keys and values, in order), both directions;
// - re-insert of a present key reports false and changes nothing;
// - `len`/`is_empty` parity and load factor `len <= buckets * 3 / 4`;
// - cursors of erased entries stay invalid.
fn run<S: BuildHasher>(
    mut sut: LinkedHashMap<String, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: Vec<(String, i32)> = Vec::new();
    let mut stale: Vec<Cursor> = Vec::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let (cur, inserted) = sut.insert(k.clone(), v);
                match model_pos(&model, &k) {
                    Some(p) => {
                        prop_assert!(!inserted);
                        prop_assert_eq!(cur.value(&sut), Ok(&model[p].1));
                    }
                    None => {
                        prop_assert!(inserted);
                        model.push((k, v));
                    }
                }
            }
            OpI::Upsert(i, v) => {
                let k = pool[i].clone();
                *sut.get_or_insert_default(k.clone()) = v;
                match model_pos(&model, &k) {
                    Some(p) => model[p].1 = v,
                    None => model.push((k, v)),
                }
            }
            OpI::Erase(i) => {
                let k = &pool[i];
                match (sut.find(k.as_str()), model_pos(&model, k)) {
                    (Some(cur), Some(p)) => {
                        let (ek, ev) = sut.erase(cur).expect("live cursor erases");
                        let (mk, mv) = model.remove(p);
                        prop_assert_eq!(ek, mk);
                        prop_assert_eq!(ev, mv);
                        stale.push(cur);
                    }
                    (None, None) => {}
                    (found, expected) => {
                        prop_assert!(false, "find {:?} vs model {:?}", found, expected)
                    }
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let got = sut.remove(k.as_str());
                let want = model_pos(&model, k).map(|p| model.remove(p).1);
                prop_assert_eq!(got, want);
            }
            OpI::At(i) => {
                let k = &pool[i];
                match model_pos(&model, k) {
                    Some(p) => prop_assert_eq!(sut.at(k.as_str()), Ok(&model[p].1)),
                    None => prop_assert_eq!(sut.at(k.as_str()), Err(Error::IndexOutOfBound)),
                }
                prop_assert_eq!(sut.count(k.as_str()), usize::from(model_pos(&model, k).is_some()));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Ok(v) = sut.at_mut(k.as_str()) {
                    *v = v.wrapping_add(d);
                }
                if let Some(p) = model_pos(&model, k) {
                    model[p].1 = model[p].1.wrapping_add(d);
                }
            }
            OpI::Clear => {
                let buckets = sut.bucket_count();
                stale.extend(sut.iter().filter_map(|(k, _)| sut.find(k.as_str())));
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.bucket_count(), buckets);
            }
            OpI::Walk => {
                let mut cur = sut.end();
                let mut back = Vec::new();
                while cur != sut.begin() {
                    cur.retreat(&sut).expect("retreat inside range");
                    let (k, v) = cur.get(&sut).expect("live entry");
                    back.push((k.clone(), *v));
                }
                prop_assert_eq!(cur.retreat(&sut), Err(Error::InvalidIterator));
                back.reverse();
                prop_assert_eq!(&back, &model);
            }
        }

        let seen: Vec<(String, i32)> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(&seen, &model);
        let rev: Vec<&String> = sut.keys().rev().collect();
        prop_assert!(rev.into_iter().eq(model.iter().rev().map(|(k, _)| k)));
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.len() * 4 <= sut.bucket_count() * 3);
        prop_assert!(sut.bucket_count().is_power_of_two());
        for c in &stale {
            prop_assert_eq!(c.get(&sut), Err(Error::InvalidIterator));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(LinkedHashMap::new(), pool, ops)?;
    }
}

// Collision variant using a constant hasher: every entry shares one chain,
// stressing chain unlink at every position.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run(LinkedHashMap::with_hasher(ConstBuildHasher), pool, ops)?;
    }
}

// Property: a clone has the same entries in the same order, and edits to
// either side never show up in the other.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_clone_is_deep(entries in proptest::collection::vec(("[a-z]{1,3}", any::<i16>()), 0..60)) {
        let src: LinkedHashMap<String, i16> = entries.into_iter().collect();
        let snapshot: Vec<(String, i16)> = src.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let mut copy = src.clone();
        prop_assert_eq!(&copy, &src);
        prop_assert_eq!(copy.bucket_count(), src.bucket_count());

        for v in copy.values_mut() {
            *v = v.wrapping_add(1);
        }
        if let Some(k) = snapshot.first().map(|(k, _)| k.clone()) {
            copy.remove(k.as_str());
        }
        copy.insert("new-key".to_string(), 0);

        let after: Vec<(String, i16)> = src.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(after, snapshot);
        let unique: HashMap<&String, ()> = src.keys().map(|k| (k, ())).collect();
        prop_assert_eq!(unique.len(), src.len());
    }
}
