use crate::error::Error;
use crate::game2048::{Model, Side};
use crate::{AnyMap, BSTMap, BuggyAList, HashMapConfig, Map, MyHashMap};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug)]
enum ListOp {
    AddLast(i32),
    RemoveLast,
    Get(usize),
}

fn list_ops_strategy() -> impl Strategy<Value = Vec<ListOp>> {
    // Remove-heavy mixes walk the capacity down through the shrink boundary.
    let op = prop_oneof![
        45 => any::<i32>().prop_map(ListOp::AddLast),
        40 => Just(ListOp::RemoveLast),
        15 => (0usize..64).prop_map(ListOp::Get),
    ];
    prop::collection::vec(op, 0..=2000)
}

#[derive(Clone, Debug)]
enum MapOp {
    Put(u16, u32),
    Remove(u16),
    RemoveEntry(u16, u32),
    Get(u16),
    Clear,
}

fn map_ops_strategy() -> impl Strategy<Value = Vec<MapOp>> {
    // A small key space keeps overwrites and hits on removal frequent.
    let key = 0u16..256;
    let value = 0u32..4;
    let op = prop_oneof![
        50 => (key.clone(), value.clone()).prop_map(|(k, v)| MapOp::Put(k, v)),
        20 => key.clone().prop_map(MapOp::Remove),
        10 => (key.clone(), value).prop_map(|(k, v)| MapOp::RemoveEntry(k, v)),
        19 => key.prop_map(MapOp::Get),
        1 => Just(MapOp::Clear),
    ];
    prop::collection::vec(op, 0..=2000)
}

/// Replays `ops` against `m` and a `BTreeMap`, asserting identical answers.
fn check_map_against_reference(
    m: &mut dyn Map<u16, u32>,
    ops: Vec<MapOp>,
) -> std::result::Result<BTreeMap<u16, u32>, TestCaseError> {
    let mut reference: BTreeMap<u16, u32> = BTreeMap::new();

    for op in ops {
        match op {
            MapOp::Put(k, v) => {
                prop_assert_eq!(m.put(k, v), reference.insert(k, v));
            }
            MapOp::Remove(k) => {
                prop_assert_eq!(m.remove(&k), Ok(reference.remove(&k)));
            }
            MapOp::RemoveEntry(k, v) => {
                let expected = match reference.get(&k) {
                    Some(current) if *current == v => reference.remove(&k),
                    _ => None,
                };
                prop_assert_eq!(m.remove_entry(&k, &v), Ok(expected));
            }
            MapOp::Get(k) => {
                prop_assert_eq!(m.get(&k), reference.get(&k));
                prop_assert_eq!(m.contains_key(&k), reference.contains_key(&k));
            }
            MapOp::Clear => {
                m.clear();
                reference.clear();
            }
        }

        prop_assert_eq!(m.size(), reference.len());
    }

    let keys: BTreeSet<u16> = m.keys().copied().collect();
    let expected: BTreeSet<u16> = reference.keys().copied().collect();
    prop_assert_eq!(keys, expected);
    Ok(reference)
}

/// Capacity the list should have after `remove_last` leaves `size` items in a
/// buffer of `capacity`.
fn capacity_after_remove(size: usize, capacity: usize) -> usize {
    if size <= capacity / 4 {
        (capacity / 2).max(1)
    } else {
        capacity
    }
}

fn board_strategy() -> impl Strategy<Value = Vec<Vec<u32>>> {
    (2usize..=5).prop_flat_map(|n| {
        let cell = prop_oneof![
            4 => Just(0u32),
            3 => Just(2u32),
            2 => Just(4u32),
            1 => Just(8u32),
        ];
        prop::collection::vec(prop::collection::vec(cell, n), n)
    })
}

/// Slides one line toward its first element with standard 2048 merging.
fn slide_line(line: &[u32]) -> (Vec<u32>, u32) {
    let tiles: Vec<u32> = line.iter().copied().filter(|v| *v != 0).collect();
    let mut out = Vec::with_capacity(line.len());
    let mut score = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out.push(tiles[i] * 2);
            score += tiles[i] * 2;
            i += 2;
        } else {
            out.push(tiles[i]);
            i += 1;
        }
    }
    out.resize(line.len(), 0);
    (out, score)
}

/// Canonical squares of every line seen when tilting toward `side`, each
/// ordered from the leading edge backward.
fn lines_toward(side: Side, n: usize) -> Vec<Vec<(usize, usize)>> {
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| match side {
                    Side::North => (i, n - 1 - j),
                    Side::South => (i, j),
                    Side::East => (n - 1 - j, i),
                    Side::West => (j, i),
                })
                .collect()
        })
        .collect()
}

fn value_at(m: &Model, col: usize, row: usize) -> u32 {
    m.tile(col, row).map_or(0, |t| t.value())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_alist_matches_vec(ops in list_ops_strategy()) {
        let mut l: BuggyAList<i32> = BuggyAList::new();
        let mut v: Vec<i32> = Vec::new();
        let mut expected_capacity = 1usize;

        for op in ops {
            match op {
                ListOp::AddLast(x) => {
                    if v.len() == expected_capacity {
                        expected_capacity = if v.is_empty() { 1 } else { v.len() * 2 };
                    }
                    l.add_last(x);
                    v.push(x);
                }
                ListOp::RemoveLast => {
                    match v.pop() {
                        Some(x) => {
                            prop_assert_eq!(l.remove_last(), Ok(x));
                            expected_capacity = capacity_after_remove(v.len(), expected_capacity);
                        }
                        None => prop_assert_eq!(l.remove_last(), Err(Error::Empty)),
                    }
                }
                ListOp::Get(i) => {
                    match v.get(i) {
                        Some(x) => prop_assert_eq!(l.get(i), Ok(x)),
                        None => prop_assert_eq!(
                            l.get(i),
                            Err(Error::IndexOutOfBounds { index: i, size: v.len() })
                        ),
                    }
                }
            }

            prop_assert_eq!(l.size(), v.len());
            prop_assert!(l.size() <= l.capacity());
            prop_assert_eq!(l.capacity(), expected_capacity);
            prop_assert_eq!(l.get_last().ok(), v.last());
        }

        let got: Vec<i32> = l.iter().copied().collect();
        prop_assert_eq!(got, v);
    }

    #[test]
    fn prop_bst_matches_btreemap(ops in map_ops_strategy()) {
        let mut t: BSTMap<u16, u32> = BSTMap::new();
        let reference = check_map_against_reference(&mut t, ops)?;

        let in_order: Vec<(u16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u16, u32)> = reference.into_iter().collect();
        prop_assert_eq!(in_order, expected);
    }

    #[test]
    fn prop_hashmap_matches_btreemap(
        ops in map_ops_strategy(),
        initial_size in 1usize..=32,
        max_load in 0.25f64..=4.0,
    ) {
        let config = HashMapConfig { initial_size, max_load };
        let mut h: MyHashMap<u16, u32> = MyHashMap::with_config(config).unwrap();
        let reference = check_map_against_reference(&mut h, ops)?;

        prop_assert!(h.load_factor() <= h.max_load());
        let mut pairs: Vec<(u16, u32)> = h.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort_unstable();
        let expected: Vec<(u16, u32)> = reference.into_iter().collect();
        prop_assert_eq!(pairs, expected);
    }

    #[test]
    fn prop_hashmap_load_factor_bounded(
        keys in prop::collection::vec(any::<u32>(), 0..=2000),
        max_load in 0.25f64..=2.0,
    ) {
        let mut h = MyHashMap::with_config(HashMapConfig { initial_size: 1, max_load }).unwrap();
        for k in keys {
            let size_before = h.size();
            let buckets_before = h.bucket_count();
            let existed = h.put(k, k).is_some();
            prop_assert!(h.load_factor() <= max_load);
            if existed {
                prop_assert_eq!(h.size(), size_before);
                prop_assert_eq!(h.bucket_count(), buckets_before);
            }
            prop_assert_eq!(h.get(&k), Some(&k));
        }
    }

    #[test]
    fn prop_map_variants_agree(ops in map_ops_strategy()) {
        let mut tree: AnyMap<u16, u32> = AnyMap::tree();
        let mut hash: AnyMap<u16, u32> = AnyMap::hash();
        let a = check_map_against_reference(&mut tree, ops.clone())?;
        let b = check_map_against_reference(&mut hash, ops)?;
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_tilt_matches_line_slide(rows in board_strategy(), side in any::<Side>()) {
        let mut m = Model::from_rows(rows.as_slice(), 0, 0).unwrap();
        let n = m.size();
        let before = m.clone();

        let mut expected_score = 0;
        let mut expected = Vec::new();
        for line in lines_toward(side, n) {
            let values: Vec<u32> = line
                .iter()
                .map(|&(c, r)| value_at(&before, c, r))
                .collect();
            let (slid, score) = slide_line(&values);
            expected_score += score;
            expected.push((line, slid));
        }

        let changed = m.tilt(side);

        for (line, slid) in expected {
            for (&(c, r), want) in line.iter().zip(slid) {
                prop_assert_eq!(value_at(&m, c, r), want);
            }
        }
        prop_assert_eq!(m.score(), expected_score);
        prop_assert_eq!(changed, m != before);
    }
}

#[test]
fn exhaustive_hibbard_removal_small_set() {
    let keys = [4u8, 2, 6, 1, 3, 5, 7];

    fn for_each_permutation(items: &[u8], f: &mut impl FnMut(&[u8])) {
        fn rec(items: &[u8], used: &mut [bool], out: &mut Vec<u8>, f: &mut impl FnMut(&[u8])) {
            if out.len() == items.len() {
                f(out.as_slice());
                return;
            }
            for i in 0..items.len() {
                if used[i] {
                    continue;
                }
                used[i] = true;
                out.push(items[i]);
                rec(items, used, out, f);
                out.pop();
                used[i] = false;
            }
        }
        let mut used = vec![false; items.len()];
        rec(items, &mut used, &mut Vec::new(), f);
    }

    for_each_permutation(&keys, &mut |perm: &[u8]| {
        let mut t: BSTMap<u8, u8> = BSTMap::new();
        for &k in &keys {
            t.put(k, k);
        }
        let mut remaining: BTreeSet<u8> = keys.iter().copied().collect();
        for k in perm {
            assert_eq!(t.remove(k), Some(*k));
            remaining.remove(k);
            assert_eq!(t.size(), remaining.len());
            let got: Vec<u8> = t.keys().copied().collect();
            let expected: Vec<u8> = remaining.iter().copied().collect();
            assert_eq!(got, expected);
        }
        assert!(t.is_empty());
    });
}
