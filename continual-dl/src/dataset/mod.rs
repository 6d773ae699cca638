//! Dataset adapters and the contract they share.

mod dataset_;
mod folder;
mod idx;
mod in_memory;
mod ordered;

pub use dataset_::*;
pub use folder::*;
pub use idx::*;
pub use in_memory::*;
pub use ordered::*;
