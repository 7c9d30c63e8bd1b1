//! Stress tests that push the heap through long random operation sequences
//!
//! Each run is checked against a plain `HashMap` model of tag -> key, and the
//! full structure check runs at regular intervals.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tagged_fibonacci_heap::{FibHeap, HeapError};

fn model_min(model: &HashMap<u32, i64>) -> Option<i64> {
    model.values().min().copied()
}

/// Random mix of every keyed operation, compared against the model
fn run_mixed(seed: u64, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut heap: FibHeap<u32, i64, u32> = FibHeap::new();
    let mut model: HashMap<u32, i64> = HashMap::new();
    let mut next_tag = 0u32;

    for step in 0..steps {
        match rng.random_range(0..100) {
            0..=34 => {
                let key = rng.random_range(-10_000..10_000);
                heap.insert(next_tag, key, next_tag).unwrap();
                model.insert(next_tag, key);
                next_tag += 1;
            }
            35..=49 => {
                let popped = heap.extract_min();
                match model_min(&model) {
                    None => assert_eq!(popped, None),
                    Some(expected) => {
                        let (tag, key, value) = popped.unwrap();
                        assert_eq!(key, expected);
                        assert_eq!(tag, value);
                        assert_eq!(model.remove(&tag), Some(key));
                    }
                }
            }
            50..=69 => {
                let tag = rng.random_range(0..next_tag.max(1));
                let key = rng.random_range(-20_000..10_000);
                let result = heap.decrease_key(&tag, key);
                match model.get_mut(&tag) {
                    None => assert_eq!(result, Err(HeapError::TagNotFound)),
                    Some(current) if key < *current => {
                        assert_eq!(result, Ok(()));
                        *current = key;
                    }
                    Some(_) => assert_eq!(result, Err(HeapError::InvalidKeyOrder)),
                }
            }
            70..=84 => {
                let tag = rng.random_range(0..next_tag.max(1));
                let key = rng.random_range(-10_000..20_000);
                let result = heap.increase_key(&tag, key);
                match model.get_mut(&tag) {
                    None => assert_eq!(result, Err(HeapError::TagNotFound)),
                    Some(current) if key > *current => {
                        assert_eq!(result, Ok(()));
                        *current = key;
                    }
                    Some(_) => assert_eq!(result, Err(HeapError::InvalidKeyOrder)),
                }
            }
            _ => {
                let tag = rng.random_range(0..next_tag.max(1));
                match model.remove(&tag) {
                    None => assert_eq!(heap.delete(&tag), Err(HeapError::TagNotFound)),
                    Some(key) => assert_eq!(heap.extract_tag(&tag), Some((key, tag))),
                }
            }
        }

        assert_eq!(heap.len(), model.len());
        assert_eq!(heap.minimum().map(|(_, key, _)| *key), model_min(&model));
        if step % 97 == 0 {
            assert!(heap.verify_structure(), "structure broken at step {step}");
        }
    }

    assert!(heap.verify_structure());
    for (tag, key) in &model {
        assert_eq!(heap.get_key(tag), Some(*key));
    }
}

#[test]
fn test_mixed_operations_small() {
    for seed in 0..20 {
        run_mixed(seed, 500);
    }
}

#[test]
fn test_mixed_operations_large() {
    run_mixed(0xfeed_beef, 20_000);
}

#[test]
fn test_random_float_minimum() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut heap: FibHeap<usize, f64, ()> = FibHeap::new();
    let mut min = f64::INFINITY;

    for i in 0..10_000 {
        let key: f64 = rng.random();
        heap.insert(i, key, ()).unwrap();
        min = min.min(key);
    }
    assert_eq!(heap.num(), 10_000);
    assert_eq!(heap.minimum().map(|(_, key, _)| *key), Some(min));

    let mut last = f64::NEG_INFINITY;
    for remaining in (0..10_000).rev() {
        let (_, key, _) = heap.extract_min().unwrap();
        assert!(key >= last);
        assert_eq!(heap.num(), remaining);
        last = key;
    }
}

/// Drives deep cascading cuts: a long run of decrease-keys on the largest keys
#[test]
fn test_many_decrease_keys() {
    let mut heap: FibHeap<i32, i32, ()> = FibHeap::new();
    for i in 0..4096 {
        heap.insert(i, 10_000 + i, ()).unwrap();
    }
    heap.insert(-1, 0, ()).unwrap();
    heap.extract_min();

    for i in (0..4096).rev() {
        heap.decrease_key(&i, i).unwrap();
    }
    assert!(heap.verify_structure());

    for i in 0..4096 {
        assert_eq!(heap.extract_min(), Some((i, i, ())));
    }
}

#[test]
fn test_alternating_ops() {
    let mut heap: FibHeap<i32, i32, ()> = FibHeap::new();

    for i in 0..200 {
        heap.insert(i * 2, i * 2, ()).unwrap();
        heap.insert(i * 2 + 1, i * 2 + 1, ()).unwrap();
        assert_eq!(heap.extract_min().map(|(_, key, _)| key), Some(i));
    }
    assert_eq!(heap.len(), 200);
    assert!(heap.verify_structure());
}

#[test]
fn test_repeated_union() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut heap: FibHeap<u32, i32, ()> = FibHeap::new();
    let mut total = 0;

    for round in 0..50u32 {
        let mut other = FibHeap::new();
        for j in 0..40u32 {
            other.insert(round * 1000 + j, rng.random_range(0..1000), ()).unwrap();
        }
        other.extract_min();
        total += 39;

        heap.union(&mut other).unwrap();
        assert!(other.is_empty());
        assert_eq!(heap.len(), total);
        if round % 10 == 0 {
            heap.extract_min();
            total -= 1;
        }
    }
    assert!(heap.verify_structure());

    let mut last = i32::MIN;
    while let Some((_, key, _)) = heap.extract_min() {
        assert!(key >= last);
        last = key;
    }
}
