//! Dataset adapters for continual learning data pipelines.

mod common;
pub mod config;
pub mod dataset;
pub mod sample;
pub mod transform;

pub use config::{DatasetConfig, DatasetKind};
pub use dataset::{
    ClassOrdered, ContinualDataset, IdxDataset, IdxKind, ImageFolderDataset, InMemoryDataset,
};
pub use sample::{
    decode_path, encode_paths, DataType, Overflow, PathEncoding, SampleSet, MAX_PATH_WIDTH,
};
pub use transform::TransformStep;
