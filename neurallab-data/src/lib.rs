//! Dataset plumbing for Neural Lab: an indexable [`Dataset`] abstraction,
//! index samplers, and the CSV/JSON importers used by the training panel.

pub mod dataset;
pub mod datasets;
pub mod import;
pub mod samplers;

pub use dataset::{collect_rows, Dataset};
pub use datasets::VecDataset;
pub use import::{export_csv, load_dataset, parse_csv, parse_json, ImportFormat};
pub use samplers::{Sampler, SequentialSampler};
