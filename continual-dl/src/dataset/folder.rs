use super::*;
use crate::{
    common::*,
    sample::{self, DataType, PathEncoding, SampleSet},
};

/// The dataset built from a one-subfolder-per-class directory tree.
///
/// The tree is scanned at construction time; the scanned paths are packed
/// into the fixed-width byte matrix on first retrieval.
#[derive(Debug)]
pub struct ImageFolderDataset {
    pub folder: PathBuf,
    /// The split label this tree belongs to. Informational only.
    pub split: String,
    /// Accepted for contract symmetry, local trees have nothing to fetch.
    pub download: bool,
    pub encoding: PathEncoding,
    /// Class names in label order, taken from the subdirectory names.
    pub classes: IndexSet<String>,
    samples: Vec<image_folder::Sample>,
    set: OnceCell<SampleSet>,
}

impl ImageFolderDataset {
    pub fn new<P>(folder: P, split: &str, download: bool) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::with_encoding(folder, split, download, PathEncoding::default())
    }

    pub fn with_encoding<P>(
        folder: P,
        split: &str,
        download: bool,
        encoding: PathEncoding,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let folder = folder.as_ref().to_owned();
        let image_folder::ImageFolder { classes, samples } =
            image_folder::ImageFolder::scan(&folder)
                .with_context(|| format!("failed to scan image folder '{}'", folder.display()))?;
        info!(
            "found {} image files in {} classes under '{}'",
            samples.len(),
            classes.len(),
            folder.display()
        );

        Ok(Self {
            folder,
            split: split.to_owned(),
            download,
            encoding,
            classes,
            samples,
            set: OnceCell::new(),
        })
    }

    /// The scanned `(path, class)` pairs in label order.
    pub fn samples(&self) -> &[image_folder::Sample] {
        &self.samples
    }
}

impl ContinualDataset for ImageFolderDataset {
    fn get_data(&self, _train: bool) -> Result<&SampleSet> {
        self.set.get_or_try_init(|| {
            let (paths, labels): (Vec<_>, Vec<_>) = self
                .samples
                .iter()
                .map(|sample| (&sample.path, sample.class as i64))
                .unzip();

            let x = sample::encode_paths(&paths, &self.encoding)?;
            SampleSet::new(x.into_dyn(), Array1::from(labels), None)
        })
    }

    fn data_type(&self) -> DataType {
        DataType::ImagePath
    }
}
