pub use anyhow::{bail, ensure, format_err, Context as _, Error, Result};
pub use indexmap::IndexSet;
pub use itertools::Itertools as _;
pub use log::{info, warn};
pub use ndarray::{Array1, Array2, Array3, ArrayD, Axis};
pub use once_cell::sync::OnceCell;
pub use serde::{Deserialize, Serialize};
pub use std::{
    fmt,
    fmt::Debug,
    fs, iter,
    path::{Path, PathBuf},
    str,
};
pub use strum::AsRefStr;
