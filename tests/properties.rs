//! Property tests for `keel::Vec` against `std::vec::Vec` as a model.

use keel::collections::vec::{erase_if, erase_value};
use keel::Vec;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    PopBack,
    Insert(usize, i32),
    InsertN(usize, usize, i32),
    Erase(usize),
    EraseRange(usize, usize),
    Resize(usize, i32),
    Reserve(usize),
    ShrinkToFit,
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        1 => Just(Op::PopBack),
        2 => (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        1 => (any::<usize>(), 0usize..20, any::<i32>()).prop_map(|(i, n, v)| Op::InsertN(i, n, v)),
        2 => any::<usize>().prop_map(Op::Erase),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::EraseRange(a, b)),
        1 => (0usize..64, any::<i32>()).prop_map(|(n, v)| Op::Resize(n, v)),
        1 => (0usize..200).prop_map(Op::Reserve),
        1 => Just(Op::ShrinkToFit),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn matches_std_vec(ops in proptest::collection::vec(arb_op(), 0..200)) {
        let mut vec = Vec::new();
        let mut model = std::vec::Vec::new();

        for op in ops {
            let old_cap = vec.capacity();
            match op {
                Op::Push(v) => {
                    vec.push(v);
                    model.push(v);
                }
                Op::PopBack => {
                    if !model.is_empty() {
                        vec.pop_back();
                        model.pop();
                    }
                }
                Op::Insert(i, v) => {
                    let i = i % (model.len() + 1);
                    prop_assert_eq!(vec.insert(i, v), i);
                    model.insert(i, v);
                }
                Op::InsertN(i, n, v) => {
                    let i = i % (model.len() + 1);
                    vec.insert_n(i, n, &v);
                    model.splice(i..i, core::iter::repeat(v).take(n));
                }
                Op::Erase(i) => {
                    if !model.is_empty() {
                        let i = i % model.len();
                        prop_assert_eq!(vec.erase(i), i);
                        model.remove(i);
                    }
                }
                Op::EraseRange(a, b) => {
                    let a = a % (model.len() + 1);
                    let b = a + b % (model.len() - a + 1);
                    prop_assert_eq!(vec.erase_range(a..b), a);
                    model.drain(a..b);
                    prop_assert_eq!(vec.capacity(), old_cap);
                }
                Op::Resize(n, v) => {
                    vec.resize_with_value(n, &v);
                    model.resize(n, v);
                }
                Op::Reserve(n) => {
                    vec.reserve(n);
                    prop_assert!(vec.capacity() >= n);
                    prop_assert!(vec.capacity() >= old_cap);
                    if n <= old_cap {
                        prop_assert_eq!(vec.capacity(), old_cap);
                    }
                }
                Op::ShrinkToFit => {
                    vec.shrink_to_fit();
                    prop_assert_eq!(vec.capacity(), model.len());
                }
                Op::Clear => {
                    vec.clear();
                    model.clear();
                    prop_assert_eq!(vec.capacity(), old_cap);
                }
            }

            prop_assert!(vec.len() <= vec.capacity());
            prop_assert_eq!(vec.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn insert_then_erase_restores(items in proptest::collection::vec(any::<u16>(), 0..50), at in any::<usize>(), v in any::<u16>()) {
        let original: Vec<u16> = items.iter().copied().collect();
        let mut vec = original.clone();
        let at = at % (vec.len() + 1);
        vec.insert(at, v);
        prop_assert_eq!(vec[at], v);
        vec.erase(at);
        prop_assert_eq!(vec, original);
    }

    #[test]
    fn clone_is_independent(items in proptest::collection::vec(any::<i64>(), 1..50)) {
        let original: Vec<i64> = items.iter().copied().collect();
        let mut copy = original.clone();
        copy[0] = copy[0].wrapping_add(1);
        copy.push(0);
        prop_assert_eq!(original.as_slice(), items.as_slice());
    }

    #[test]
    fn ordering_matches_slices(a in proptest::collection::vec(0u8..4, 0..8), b in proptest::collection::vec(0u8..4, 0..8)) {
        let va: Vec<u8> = a.iter().copied().collect();
        let vb: Vec<u8> = b.iter().copied().collect();
        prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
        prop_assert_eq!(va == vb, a == b);
    }

    #[test]
    fn erase_helpers_preserve_order(items in proptest::collection::vec(0u8..8, 0..64), needle in 0u8..8) {
        let mut vec: Vec<u8> = items.iter().copied().collect();
        let removed = erase_value(&mut vec, &needle);
        let expected: std::vec::Vec<u8> = items.iter().copied().filter(|&x| x != needle).collect();
        prop_assert_eq!(removed, items.len() - expected.len());
        prop_assert_eq!(vec.as_slice(), expected.as_slice());

        let mut vec: Vec<u8> = items.iter().copied().collect();
        erase_if(&mut vec, |&x| x % 2 == 0);
        prop_assert!(vec.iter().all(|x| x % 2 == 1));
    }
}

#[test]
fn appends_grow_geometrically() {
    let mut vec = Vec::new();
    let mut reallocations = 0;
    let mut cap = vec.capacity();
    for i in 0..100_000u32 {
        vec.push(i);
        if vec.capacity() != cap {
            reallocations += 1;
            cap = vec.capacity();
        }
    }
    assert!(reallocations < 30, "{} reallocations", reallocations);
}
