use crate::dataset::Dataset;
use neurallab_core::NeuraLabError;

/// A dataset backed by a `Vec` of items. `get` clones the item.
#[derive(Debug, Clone)]
pub struct VecDataset<T: Clone + Send + 'static> {
    data: Vec<T>,
}

impl<T: Clone + Send + 'static> VecDataset<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone + Send + 'static> From<Vec<T>> for VecDataset<T> {
    fn from(data: Vec<T>) -> Self {
        VecDataset::new(data)
    }
}

impl<T: Clone + Send + 'static> Dataset for VecDataset<T> {
    type Item = T;

    fn get(&self, index: usize) -> Result<Self::Item, NeuraLabError> {
        self.data
            .get(index)
            .cloned()
            .ok_or(NeuraLabError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
#[path = "vec_dataset_test.rs"]
mod tests;
