//! Sample storage shared by every dataset adapter.

use crate::common::*;

/// The `(x, y, t)` triple returned by dataset adapters.
///
/// Index i refers to the same sample in all three arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    /// The input representation. Dense pixels for `image_array` data, an
    /// `[N, width]` matrix of zero-padded path bytes for `image_path` data.
    pub x: ArrayD<u8>,
    /// Integer class labels.
    pub y: Array1<i64>,
    /// Optional task identifiers, one per sample when present.
    pub t: Option<Array1<i64>>,
}

impl SampleSet {
    pub fn new(x: ArrayD<u8>, y: Array1<i64>, t: Option<Array1<i64>>) -> Result<Self> {
        ensure!(
            x.ndim() >= 1,
            "input array must have a leading sample dimension"
        );
        ensure!(
            x.shape()[0] == y.len(),
            "number of inputs {} does not match number of labels {}",
            x.shape()[0],
            y.len()
        );
        if let Some(t) = &t {
            ensure!(
                t.len() == y.len(),
                "number of task ids {} does not match number of labels {}",
                t.len(),
                y.len()
            );
        }

        Ok(Self { x, y, t })
    }

    /// The number of samples.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// The representation tag of the `x` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DataType {
    /// Dense pixel arrays.
    ImageArray,
    /// Fixed-width path bytes pointing at image files on disk.
    ImagePath,
}

/// The fixed-width byte encoding applied to path samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEncoding {
    /// The row width in bytes.
    #[serde(default = "default_path_width")]
    pub width: usize,
    /// The behavior when a path exceeds the row width.
    #[serde(default)]
    pub overflow: Overflow,
}

impl Default for PathEncoding {
    fn default() -> Self {
        Self {
            width: default_path_width(),
            overflow: Overflow::default(),
        }
    }
}

fn default_path_width() -> usize {
    255
}

/// Upper bound on the path encoding width, one `PATH_MAX` worth of bytes.
pub const MAX_PATH_WIDTH: usize = 4096;

/// The behavior when a path does not fit the encoding width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    /// Reject the path with an error.
    Error,
    /// Keep the leading bytes and drop the rest.
    Truncate,
}

impl Default for Overflow {
    fn default() -> Self {
        Self::Error
    }
}

/// Pack paths into an `[N, width]` matrix of zero-padded bytes.
pub fn encode_paths<P>(paths: &[P], encoding: &PathEncoding) -> Result<Array2<u8>>
where
    P: AsRef<Path>,
{
    let PathEncoding { width, overflow } = *encoding;
    ensure!(width > 0, "path encoding width must be positive");
    ensure!(
        width <= MAX_PATH_WIDTH,
        "path encoding width {} exceeds the {} byte limit",
        width,
        MAX_PATH_WIDTH
    );

    let mut bytes = Vec::with_capacity(paths.len() * width);
    for path in paths {
        let path = path.as_ref();
        let text = path
            .to_str()
            .ok_or_else(|| format_err!("path '{}' is not valid UTF-8", path.display()))?;
        let raw = text.as_bytes();

        let encoded = if raw.len() <= width {
            raw
        } else {
            match overflow {
                Overflow::Truncate => &raw[..width],
                Overflow::Error => bail!(
                    "path '{}' is {} bytes long but the encoding width is {}",
                    path.display(),
                    raw.len(),
                    width
                ),
            }
        };

        bytes.extend_from_slice(encoded);
        bytes.extend(iter::repeat(0).take(width - encoded.len()));
    }

    let array = Array2::from_shape_vec((paths.len(), width), bytes)?;
    Ok(array)
}

/// Read one fixed-width row back into a path, stopping at the first padding
/// byte.
pub fn decode_path(row: &[u8]) -> Result<PathBuf> {
    let end = row.iter().position(|&byte| byte == 0).unwrap_or(row.len());
    let text = str::from_utf8(&row[..end]).context("path bytes are not valid UTF-8")?;
    Ok(PathBuf::from(text))
}
