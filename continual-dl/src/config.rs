//! Dataset configuration format.

use crate::{
    common::*,
    dataset::{ClassOrdered, ContinualDataset, IdxDataset, IdxKind, ImageFolderDataset},
    sample::PathEncoding,
};

/// The top level dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Optional explicit class presentation order.
    #[serde(default)]
    pub class_order: Option<Vec<i64>>,
    /// The dataset source selection.
    pub kind: DatasetKind,
}

/// Variants of dataset sources and their options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DatasetKind {
    /// IDX family dataset options.
    Idx {
        kind: IdxKind,
        data_path: PathBuf,
        #[serde(default = "default_download")]
        download: bool,
    },
    /// Labeled directory tree options.
    ImageFolder {
        folder: PathBuf,
        #[serde(default)]
        path_encoding: PathEncoding,
    },
}

impl DatasetConfig {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = json5::from_str(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Construct the configured dataset for the given split.
    pub fn build(&self, train: bool) -> Result<Box<dyn ContinualDataset>> {
        let dataset: Box<dyn ContinualDataset> = match &self.kind {
            DatasetKind::Idx {
                kind,
                data_path,
                download,
            } => Box::new(IdxDataset::new(*kind, data_path, *download, train)?),
            DatasetKind::ImageFolder {
                folder,
                path_encoding,
            } => {
                let split = if train { "train" } else { "test" };
                Box::new(ImageFolderDataset::with_encoding(
                    folder,
                    split,
                    true,
                    *path_encoding,
                )?)
            }
        };

        let dataset: Box<dyn ContinualDataset> = match &self.class_order {
            Some(order) => Box::new(ClassOrdered::new(dataset, order.clone())?),
            None => dataset,
        };

        Ok(dataset)
    }
}

fn default_download() -> bool {
    true
}
