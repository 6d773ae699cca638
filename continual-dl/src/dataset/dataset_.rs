use super::*;
use crate::{
    common::*,
    sample::{DataType, SampleSet},
    transform::TransformStep,
};

/// The generic continual dataset trait.
///
/// Concrete adapters acquire their data at construction time; `get_data` only
/// hands out the stored or lazily cached sample set.
pub trait ContinualDataset
where
    Self: Debug + Send,
{
    /// Get the sample triple for the requested split.
    ///
    /// Deterministic per instance. Adapters whose content is fixed at
    /// construction return the same set for both flag values.
    fn get_data(&self, train: bool) -> Result<&SampleSet>;

    /// The explicit class presentation order, if the dataset defines one.
    fn class_order(&self) -> Option<&[i64]> {
        None
    }

    /// Whether class ids must be remapped before use.
    fn need_class_remapping(&self) -> bool {
        false
    }

    /// Map raw class ids to the values consumers should use.
    fn class_remapping(&self, class_ids: Array1<i64>) -> Array1<i64> {
        class_ids
    }

    /// The representation tag of the `x` array.
    fn data_type(&self) -> DataType {
        DataType::ImageArray
    }

    /// The preprocessing steps a consumer should apply to retrieved samples.
    fn transformations(&self) -> Vec<TransformStep> {
        vec![TransformStep::ToTensor]
    }
}

impl<D> ContinualDataset for Box<D>
where
    D: ContinualDataset + ?Sized,
{
    fn get_data(&self, train: bool) -> Result<&SampleSet> {
        (**self).get_data(train)
    }

    fn class_order(&self) -> Option<&[i64]> {
        (**self).class_order()
    }

    fn need_class_remapping(&self) -> bool {
        (**self).need_class_remapping()
    }

    fn class_remapping(&self, class_ids: Array1<i64>) -> Array1<i64> {
        (**self).class_remapping(class_ids)
    }

    fn data_type(&self) -> DataType {
        (**self).data_type()
    }

    fn transformations(&self) -> Vec<TransformStep> {
        (**self).transformations()
    }
}
