#![cfg(test)]

// Property tests for ChainMap kept inside the crate so they can check the
// bucket-table invariants directly after each operation.

use crate::chain_map::ChainMap;
use crate::cursor::Cursor;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Iterate,
    Reserve(usize),
}

fn arb_scenario(key: BoxedStrategy<Vec<u8>>) -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(key, 1..=10).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => (0usize..40).prop_map(OpI::Reserve),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn string_keys() -> BoxedStrategy<Vec<u8>> {
    "[a-z]{0,5}".prop_map(String::into_bytes).boxed()
}

// Short alphabets with zeros force collisions in both digest and bytes.
fn sized_keys() -> BoxedStrategy<Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(0u8), Just(1u8), Just(2u8)], 0..4).boxed()
}

fn cursor_keys(m: &ChainMap<i32>) -> Vec<Vec<u8>> {
    let mut c = Cursor::new();
    std::iter::from_fn(|| m.next_key(&mut c).map(|k| k.to_vec())).collect()
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `set` on a present key overwrites, on an absent key inserts; `len` tracks the model.
// - `get`/`remove` agree with the model; removal hands back the stored value.
// - Cursor traversal yields each live key exactly once.
// - After each op: every node sits in `digest & (capacity - 1)`, capacity is a
//   power of two (or zero), and `len <= capacity`.
fn run_state_machine(
    sized: bool,
    pool: Vec<Vec<u8>>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut sut: ChainMap<i32> = ChainMap::new();
    let mut model: HashMap<Vec<u8>, i32> = HashMap::new();

    let set = |m: &mut ChainMap<i32>, k: &[u8], v: i32| {
        if sized { m.set_sized(k, v) } else { m.set(k, v) }
    };
    let get = |m: &ChainMap<i32>, k: &[u8]| -> Option<i32> {
        if sized { m.get_sized(k).copied() } else { m.get(k).copied() }
    };

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = pool[i].as_slice();
                let cap_before = sut.capacity();
                let len_before = sut.len();
                prop_assert!(set(&mut sut, k, v).is_ok());
                if model.insert(k.to_vec(), v).is_some() {
                    prop_assert_eq!(sut.capacity(), cap_before, "overwrite must not grow");
                    prop_assert_eq!(sut.len(), len_before);
                }
            }
            OpI::Remove(i) => {
                let k = pool[i].as_slice();
                let cap_before = sut.capacity();
                let got = if sized { sut.remove_sized(k) } else { sut.remove(k) };
                prop_assert_eq!(got, model.remove(k));
                prop_assert_eq!(sut.capacity(), cap_before, "remove must not shrink");
            }
            OpI::Get(i) => {
                let k = pool[i].as_slice();
                prop_assert_eq!(get(&sut, k), model.get(k).copied());
            }
            OpI::Mutate(i, d) => {
                let k = pool[i].as_slice();
                let slot = if sized { sut.get_sized_mut(k) } else { sut.get_mut(k) };
                match (slot, model.get_mut(k)) {
                    (Some(v), Some(mv)) => {
                        *v = v.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut disagrees with model"),
                }
            }
            OpI::Iterate => {
                let walked = cursor_keys(&sut);
                let s_keys: BTreeSet<_> = walked.iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(walked.len(), s_keys.len(), "cursor repeated a key");
                prop_assert_eq!(s_keys, m_keys);
            }
            OpI::Reserve(n) => {
                let cap_before = sut.capacity();
                prop_assert!(sut.reserve_buckets(n).is_ok());
                prop_assert!(sut.capacity() >= cap_before);
                prop_assert!(sut.capacity() >= n);
            }
        }

        sut.assert_consistent();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_string_keys((pool, ops) in arb_scenario(string_keys())) {
        run_state_machine(false, pool, ops)?;
    }

    #[test]
    fn prop_state_machine_sized_keys((pool, ops) in arb_scenario(sized_keys())) {
        run_state_machine(true, pool, ops)?;
    }
}
