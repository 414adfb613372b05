use crate::samplers::Sampler;
use neurallab_core::{DatasetRow, NeuraLabError};

/// Represents a dataset that can be accessed by index.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Errors
    ///
    /// Returns `NeuraLabError::IndexOutOfBounds` if the index is out of bounds.
    fn get(&self, index: usize) -> Result<Self::Item, NeuraLabError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Materialises a dataset into the ordered rows a full-batch epoch consumes.
///
/// Rows come out in the order the sampler yields indices.
pub fn collect_rows<D, S>(dataset: &D, sampler: &S) -> Result<Vec<DatasetRow>, NeuraLabError>
where
    D: Dataset<Item = DatasetRow>,
    S: Sampler + ?Sized,
{
    let mut rows = Vec::with_capacity(sampler.len(dataset.len()));
    for index in sampler.iter(dataset.len()) {
        rows.push(dataset.get(index)?);
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
