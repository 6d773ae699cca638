use super::*;
use crate::{
    common::*,
    sample::{DataType, SampleSet},
    transform::TransformStep,
};

/// The dataset wrapper that overrides the class presentation order.
///
/// Everything except `class_order` is delegated to the inner dataset.
#[derive(Debug)]
pub struct ClassOrdered<D>
where
    D: ContinualDataset,
{
    dataset: D,
    class_order: Vec<i64>,
}

impl<D> ClassOrdered<D>
where
    D: ContinualDataset,
{
    pub fn new(dataset: D, class_order: Vec<i64>) -> Result<Self> {
        ensure!(!class_order.is_empty(), "class order must not be empty");
        ensure!(
            class_order.iter().unique().count() == class_order.len(),
            "class order must not repeat classes"
        );

        Ok(Self {
            dataset,
            class_order,
        })
    }

    pub fn into_inner(self) -> D {
        self.dataset
    }
}

impl<D> ContinualDataset for ClassOrdered<D>
where
    D: ContinualDataset,
{
    fn get_data(&self, train: bool) -> Result<&SampleSet> {
        self.dataset.get_data(train)
    }

    fn class_order(&self) -> Option<&[i64]> {
        Some(&self.class_order)
    }

    fn need_class_remapping(&self) -> bool {
        self.dataset.need_class_remapping()
    }

    fn class_remapping(&self, class_ids: Array1<i64>) -> Array1<i64> {
        self.dataset.class_remapping(class_ids)
    }

    fn data_type(&self) -> DataType {
        self.dataset.data_type()
    }

    fn transformations(&self) -> Vec<TransformStep> {
        self.dataset.transformations()
    }
}
