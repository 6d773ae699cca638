use super::*;
use crate::{common::*, sample::SampleSet};

/// The dataset family identifier understood by the IDX reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
pub enum IdxKind {
    Mnist,
    FashionMnist,
    Kmnist,
}

impl IdxKind {
    /// The directory the dataset occupies under the data path.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Mnist => "MNIST",
            Self::FashionMnist => "FashionMNIST",
            Self::Kmnist => "KMNIST",
        }
    }
}

/// The adapter that bridges the IDX reader into the dataset contract.
///
/// Acquisition is delegated to the reader entirely. The split requested at
/// construction is loaded eagerly, the opposite one on first request.
#[derive(Debug)]
pub struct IdxDataset {
    pub kind: IdxKind,
    pub data_path: PathBuf,
    pub download: bool,
    train_set: OnceCell<SampleSet>,
    test_set: OnceCell<SampleSet>,
}

impl IdxDataset {
    pub fn new<P>(kind: IdxKind, data_path: P, download: bool, train: bool) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let dataset = Self {
            kind,
            data_path: data_path.as_ref().to_owned(),
            download,
            train_set: OnceCell::new(),
            test_set: OnceCell::new(),
        };
        dataset.get_data(train)?;
        Ok(dataset)
    }

    /// The directory holding the raw IDX files for this dataset.
    pub fn raw_dir(&self) -> PathBuf {
        self.data_path.join(self.kind.dir_name()).join("raw")
    }

    fn load_split(&self, split: idx_dataset::Split) -> Result<SampleSet> {
        let dir = self.raw_dir();
        let idx_dataset::DataSet { images, labels } =
            idx_dataset::DataSet::load(&dir, split, self.download).with_context(|| {
                format!(
                    "failed to load {} data from '{}'",
                    self.kind.as_ref(),
                    dir.display()
                )
            })?;

        let x = images.into_dyn();
        let y = labels.mapv(i64::from);
        let set = SampleSet::new(x, y, None)?;
        info!(
            "loaded {} {} samples from '{}'",
            set.len(),
            self.kind.as_ref(),
            dir.display()
        );
        Ok(set)
    }
}

impl ContinualDataset for IdxDataset {
    fn get_data(&self, train: bool) -> Result<&SampleSet> {
        let (cell, split) = if train {
            (&self.train_set, idx_dataset::Split::Train)
        } else {
            (&self.test_set, idx_dataset::Split::Test)
        };
        cell.get_or_try_init(|| self.load_split(split))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::DataType;
    use ndarray::array;
    use std::process;

    fn test_root(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("continual-dl-{}-{}", name, process::id()))
    }

    fn write_quartet(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;

        let train_images =
            Array3::from_shape_vec((3, 2, 2), (0..12).map(|value| value as u8).collect())?;
        let test_images =
            Array3::from_shape_vec((2, 2, 2), (0..8).map(|value| value as u8).collect())?;

        fs::write(
            dir.join("train-images-idx3-ubyte"),
            idx_dataset::build_idx3_bytes(&train_images),
        )?;
        fs::write(
            dir.join("train-labels-idx1-ubyte"),
            idx_dataset::build_idx1_bytes(&[0, 1, 2]),
        )?;
        fs::write(
            dir.join("t10k-images-idx3-ubyte"),
            idx_dataset::build_idx3_bytes(&test_images),
        )?;
        fs::write(
            dir.join("t10k-labels-idx1-ubyte"),
            idx_dataset::build_idx1_bytes(&[7, 1]),
        )?;
        Ok(())
    }

    #[test]
    fn loads_both_splits() -> Result<()> {
        let root = test_root("idx-loads-both-splits");
        write_quartet(&root.join("MNIST").join("raw"))?;

        let dataset = IdxDataset::new(IdxKind::Mnist, &root, false, true)?;
        assert_eq!(dataset.data_type(), DataType::ImageArray);

        let train = dataset.get_data(true)?;
        assert_eq!(train.x.shape(), &[3, 2, 2]);
        assert_eq!(train.y, array![0i64, 1, 2]);
        assert_eq!(train.t, None);

        let test = dataset.get_data(false)?;
        assert_eq!(test.x.shape(), &[2, 2, 2]);
        assert_eq!(test.y, array![7i64, 1]);
        assert_eq!(test.t, None);

        fs::remove_dir_all(&root)?;
        Ok(())
    }

    #[test]
    fn construction_fails_without_data() {
        let root = test_root("idx-construction-fails");
        fs::create_dir_all(&root).unwrap();

        let err = IdxDataset::new(IdxKind::Kmnist, &root, false, true).unwrap_err();
        assert!(err.to_string().contains("Kmnist"));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn kind_selects_directory() -> Result<()> {
        let root = test_root("idx-kind-directory");
        write_quartet(&root.join("FashionMNIST").join("raw"))?;

        let dataset = IdxDataset::new(IdxKind::FashionMnist, &root, false, false)?;
        assert_eq!(dataset.get_data(false)?.len(), 2);

        // nothing was written under MNIST/, the other kind stays unreachable
        assert!(IdxDataset::new(IdxKind::Mnist, &root, false, false).is_err());

        fs::remove_dir_all(&root)?;
        Ok(())
    }
}
