// neurastep-data/src/datasets/vec_dataset_test.rs

use super::*;
use neurastep_core::{NeuraStepError, Sample};

#[test]
fn test_vec_dataset_get_valid_index() {
    let dataset = VecDataset::new(vec![10, 20, 30]);
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.get(0).unwrap(), 10);
    assert_eq!(dataset.get(2).unwrap(), 30);
}

#[test]
fn test_vec_dataset_get_invalid_index() {
    let dataset = VecDataset::new(vec![10, 20, 30]);
    assert_eq!(
        dataset.get(3),
        Err(NeuraStepError::IndexOutOfBounds { index: 3, len: 3 })
    );
}

#[test]
fn test_vec_dataset_empty() {
    let dataset: VecDataset<i32> = VecDataset::new(Vec::new());
    assert!(dataset.is_empty());
    assert!(dataset.get(0).is_err());
}

#[test]
fn test_from_rows_pairs_inputs_and_targets() {
    let dataset = VecDataset::from_rows(
        vec![vec![0.0, 1.0], vec![1.0, 1.0]],
        vec![vec![1.0], vec![0.0]],
    )
    .unwrap();
    assert_eq!(dataset.get(1).unwrap(), Sample::new(vec![1.0, 1.0], vec![0.0]));
}

#[test]
fn test_from_rows_rejects_uneven_lists() {
    let err = VecDataset::from_rows(vec![vec![0.0]], vec![]).unwrap_err();
    assert!(err.is_dimension_mismatch());
}
