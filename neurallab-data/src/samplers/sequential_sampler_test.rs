// neurallab-data/src/samplers/sequential_sampler_test.rs

use super::*;

#[test]
fn test_sequential_sampler_len() {
    let sampler = SequentialSampler::new();
    assert_eq!(sampler.len(0), 0);
    assert_eq!(sampler.len(7), 7);
}

#[test]
fn test_sequential_sampler_iter_empty() {
    let mut iter = SequentialSampler::new().iter(0);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_sequential_sampler_is_stable_across_calls() {
    let sampler = SequentialSampler::new();
    let first: Vec<usize> = sampler.iter(4).collect();
    let second: Vec<usize> = sampler.iter(4).collect();
    assert_eq!(first, vec![0, 1, 2, 3]);
    assert_eq!(first, second);
}
