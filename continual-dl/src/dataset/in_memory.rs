use super::*;
use crate::{
    common::*,
    sample::{DataType, SampleSet},
};

/// The dataset over arrays that already live in memory.
///
/// The only adapter whose representation tag can change after construction:
/// `data_type` is a plain field, so consumers must read it again before every
/// use instead of caching it.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryDataset {
    /// The representation tag of the stored `x` array.
    pub data_type: DataType,
    /// The split label this data belongs to. Informational only, the content
    /// is not validated against it.
    pub split: String,
    set: SampleSet,
}

impl InMemoryDataset {
    /// Wrap existing arrays. No acquisition is performed.
    pub fn new(x: ArrayD<u8>, y: Array1<i64>, t: Option<Array1<i64>>) -> Result<Self> {
        Ok(Self {
            data_type: DataType::ImageArray,
            split: "train".to_owned(),
            set: SampleSet::new(x, y, t)?,
        })
    }
}

impl ContinualDataset for InMemoryDataset {
    fn get_data(&self, _train: bool) -> Result<&SampleSet> {
        Ok(&self.set)
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::ptr;

    #[test]
    fn identity_round_trip() -> Result<()> {
        let dataset = InMemoryDataset::new(array![1u8, 2, 3].into_dyn(), array![0i64, 1, 0], None)?;

        let set = dataset.get_data(true)?;
        assert_eq!(set.x, array![1u8, 2, 3].into_dyn());
        assert_eq!(set.y, array![0i64, 1, 0]);
        assert_eq!(set.t, None);
        Ok(())
    }

    #[test]
    fn returns_stored_arrays_unchanged() -> Result<()> {
        let x = array![[1u8, 2], [3, 4], [5, 6]].into_dyn();
        let y = array![0i64, 1, 2];
        let t = array![0i64, 0, 1];
        let dataset = InMemoryDataset::new(x.clone(), y.clone(), Some(t.clone()))?;

        let set = dataset.get_data(true)?;
        assert_eq!(set.x, x);
        assert_eq!(set.y, y);
        assert_eq!(set.t.as_ref(), Some(&t));

        // both flag values hand out the same storage
        assert!(ptr::eq(set, dataset.get_data(false)?));
        Ok(())
    }

    #[test]
    fn data_type_mutation_round_trip() -> Result<()> {
        let mut dataset = InMemoryDataset::new(
            Array3::<u8>::zeros((2, 1, 1)).into_dyn(),
            array![0i64, 1],
            None,
        )?;
        assert_eq!(dataset.data_type(), DataType::ImageArray);

        dataset.data_type = DataType::ImagePath;
        assert_eq!(dataset.data_type(), DataType::ImagePath);

        dataset.data_type = DataType::ImageArray;
        assert_eq!(dataset.data_type(), DataType::ImageArray);
        Ok(())
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = InMemoryDataset::new(
            Array3::<u8>::zeros((3, 1, 1)).into_dyn(),
            array![0i64, 1],
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not match"));

        let err = InMemoryDataset::new(
            Array3::<u8>::zeros((2, 1, 1)).into_dyn(),
            array![0i64, 1],
            Some(array![0i64]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("task ids"));
    }
}
