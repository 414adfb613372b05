// neurallab-data/src/samplers/traits.rs

use std::fmt::Debug;

/// Defines the order in which dataset indices are visited.
///
/// Training is full-batch and deterministic, so the only sampler shipped is
/// [`SequentialSampler`](super::SequentialSampler); the trait stays open for
/// subset or stratified orderings.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over the indices of a dataset of `dataset_len` items.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices [`iter`](Sampler::iter) will yield.
    fn len(&self, dataset_len: usize) -> usize;
}
