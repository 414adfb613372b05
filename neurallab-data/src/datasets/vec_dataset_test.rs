use super::*;
use neurallab_core::DatasetRow;

#[test]
fn test_vec_dataset_get_valid_index() {
    let dataset = VecDataset::new(vec![
        DatasetRow::new(vec![0.0], 1.0),
        DatasetRow::new(vec![1.0], 0.0),
    ]);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.get(1).unwrap(), DatasetRow::new(vec![1.0], 0.0));
}

#[test]
fn test_vec_dataset_get_invalid_index() {
    let dataset = VecDataset::new(vec![10, 20, 30]);
    match dataset.get(3) {
        Err(NeuraLabError::IndexOutOfBounds { index, len }) => {
            assert_eq!(index, 3);
            assert_eq!(len, 3);
        }
        other => panic!("Expected IndexOutOfBounds error, got {:?}", other),
    }
}

#[test]
fn test_vec_dataset_empty() {
    let dataset: VecDataset<i32> = Vec::new().into();
    assert!(dataset.is_empty());
    assert!(dataset.get(0).is_err());
}

#[test]
fn test_vec_dataset_into_inner() {
    let dataset = VecDataset::new(vec!["a", "b"]);
    assert_eq!(dataset.into_inner(), vec!["a", "b"]);
}
