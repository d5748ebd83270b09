// neurastep-data/src/samplers/random_sampler_test.rs

use super::*;
use std::collections::HashSet;

#[test]
fn test_random_sampler_len() {
    assert_eq!(RandomSampler::new(false, None).len(10), 10);
    assert_eq!(RandomSampler::new(false, Some(5)).len(10), 5);
}

#[test]
fn test_without_replacement_is_a_permutation() {
    let indices: Vec<usize> = RandomSampler::new(false, None).iter(10).collect();
    assert_eq!(indices.len(), 10);
    let unique: HashSet<usize> = indices.into_iter().collect();
    assert_eq!(unique, (0..10).collect::<HashSet<usize>>());
}

#[test]
fn test_without_replacement_subset() {
    let indices: Vec<usize> = RandomSampler::new(false, Some(4)).iter(10).collect();
    assert_eq!(indices.len(), 4);
    assert_eq!(indices.iter().collect::<HashSet<_>>().len(), 4);
    assert!(indices.iter().all(|&i| i < 10));
}

#[test]
fn test_too_many_without_replacement_yields_nothing() {
    assert_eq!(RandomSampler::new(false, Some(10)).iter(5).count(), 0);
}

#[test]
fn test_with_replacement_stays_in_range() {
    let indices: Vec<usize> = RandomSampler::new(true, Some(20)).iter(3).collect();
    assert_eq!(indices.len(), 20);
    assert!(indices.iter().all(|&i| i < 3));
}

#[test]
fn test_empty_dataset() {
    assert_eq!(RandomSampler::new(false, None).iter(0).count(), 0);
    assert_eq!(RandomSampler::new(true, Some(5)).iter(0).count(), 0);
}

#[test]
fn test_seeded_sampler_is_reproducible() {
    let a: Vec<usize> = RandomSampler::seeded(42).iter(50).collect();
    let b: Vec<usize> = RandomSampler::seeded(42).iter(50).collect();
    assert_eq!(a, b);
    let c: Vec<usize> = RandomSampler::seeded(43).iter(50).collect();
    assert_ne!(a, c);
}
