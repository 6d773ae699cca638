//! Reader for the IDX image/label files used by the MNIST dataset family.
//!
//! MNIST, Fashion-MNIST and KMNIST all ship the same quartet of files per
//! directory: `train-images-idx3-ubyte`, `train-labels-idx1-ubyte`,
//! `t10k-images-idx3-ubyte` and `t10k-labels-idx1-ubyte`, optionally
//! gzip-compressed with a `.gz` suffix.

use anyhow::{bail, ensure, format_err, Context as _, Result};
use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::GzDecoder;
use log::info;
use ndarray::{Array1, Array3};
use std::{
    fs::{self, File},
    io::Read,
    path::Path,
};

/// Magic number of idx3-ubyte image files.
pub const IMAGE_MAGIC: u32 = 2051;
/// Magic number of idx1-ubyte label files.
pub const LABEL_MAGIC: u32 = 2049;

/// The train or evaluation half of an IDX dataset directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    /// The standard (image, label) file names of the split.
    pub fn file_names(&self) -> (&'static str, &'static str) {
        match self {
            Self::Train => ("train-images-idx3-ubyte", "train-labels-idx1-ubyte"),
            Self::Test => ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte"),
        }
    }
}

/// One loaded split of an IDX dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSet {
    /// Image pixels, `[count, rows, cols]`.
    pub images: Array3<u8>,
    /// Class labels, one per image.
    pub labels: Array1<u8>,
}

impl DataSet {
    /// Load one split from a directory holding the standard file quartet.
    ///
    /// A missing raw file is materialized from its `.gz` sibling when
    /// `download` is set; with `download` unset only raw files are accepted.
    pub fn load(dir: impl AsRef<Path>, split: Split, download: bool) -> Result<Self> {
        let dir = dir.as_ref();
        let (image_name, label_name) = split.file_names();

        let image_bytes = read_or_extract(dir, image_name, download)?;
        let label_bytes = read_or_extract(dir, label_name, download)?;

        Self::from_bytes(&image_bytes, &label_bytes)
    }

    /// Build a dataset from already-read IDX file contents.
    pub fn from_bytes(image_bytes: &[u8], label_bytes: &[u8]) -> Result<Self> {
        let images = parse_idx3_images(image_bytes)?;
        let labels = parse_idx1_labels(label_bytes)?;

        ensure!(
            images.shape()[0] == labels.len(),
            "image/label count mismatch: {} images but {} labels",
            images.shape()[0],
            labels.len()
        );

        Ok(Self { images, labels })
    }

    /// The number of samples in the split.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the split holds no samples.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Read `dir/name`, falling back to extracting `dir/name.gz` beside it.
///
/// Extraction stages the decompressed bytes in a temp file next to the raw
/// path and renames it into place, so later loads read the raw file directly
/// and an interrupted extraction leaves no partial raw file behind.
fn read_or_extract(dir: &Path, name: &str, download: bool) -> Result<Vec<u8>> {
    let raw_path = dir.join(name);
    if raw_path.is_file() {
        return fs::read(&raw_path)
            .with_context(|| format!("failed to read '{}'", raw_path.display()));
    }

    let gz_path = dir.join(format!("{}.gz", name));
    if gz_path.is_file() {
        if !download {
            bail!(
                "'{}' does not exist and extraction is disabled; \
                 set download to true to extract '{}'",
                raw_path.display(),
                gz_path.display()
            );
        }

        let file = File::open(&gz_path)
            .with_context(|| format!("failed to open '{}'", gz_path.display()))?;
        let mut bytes = Vec::new();
        GzDecoder::new(file)
            .read_to_end(&mut bytes)
            .with_context(|| format!("failed to decompress '{}'", gz_path.display()))?;

        let tmp_path = dir.join(format!("{}.tmp", name));
        fs::write(&tmp_path, &bytes)
            .with_context(|| format!("failed to write '{}'", tmp_path.display()))?;
        fs::rename(&tmp_path, &raw_path)
            .with_context(|| format!("failed to rename '{}'", tmp_path.display()))?;
        info!("extracted '{}'", raw_path.display());

        return Ok(bytes);
    }

    bail!(
        "neither '{}' nor '{}' exists",
        raw_path.display(),
        gz_path.display()
    );
}

/// Parse an idx3-ubyte image file: magic, count, rows, cols, then
/// `count * rows * cols` pixel bytes.
pub fn parse_idx3_images(bytes: &[u8]) -> Result<Array3<u8>> {
    let mut rest = bytes;
    let magic = rest
        .read_u32::<BigEndian>()
        .context("truncated IDX image header")?;
    ensure!(
        magic == IMAGE_MAGIC,
        "invalid IDX image magic {}, expected {}",
        magic,
        IMAGE_MAGIC
    );

    let count = rest
        .read_u32::<BigEndian>()
        .context("truncated IDX image header")? as usize;
    let rows = rest
        .read_u32::<BigEndian>()
        .context("truncated IDX image header")? as usize;
    let cols = rest
        .read_u32::<BigEndian>()
        .context("truncated IDX image header")? as usize;

    let expected = count
        .checked_mul(rows)
        .and_then(|pixels| pixels.checked_mul(cols))
        .ok_or_else(|| {
            format_err!(
                "IDX image header dimensions {}x{}x{} overflow the payload size",
                count,
                rows,
                cols
            )
        })?;
    ensure!(
        rest.len() == expected,
        "IDX image payload holds {} bytes, expected {} ({} images of {}x{})",
        rest.len(),
        expected,
        count,
        rows,
        cols
    );

    let images = Array3::from_shape_vec((count, rows, cols), rest.to_vec())?;
    Ok(images)
}

/// Parse an idx1-ubyte label file: magic, count, then `count` label bytes.
pub fn parse_idx1_labels(bytes: &[u8]) -> Result<Array1<u8>> {
    let mut rest = bytes;
    let magic = rest
        .read_u32::<BigEndian>()
        .context("truncated IDX label header")?;
    ensure!(
        magic == LABEL_MAGIC,
        "invalid IDX label magic {}, expected {}",
        magic,
        LABEL_MAGIC
    );

    let count = rest
        .read_u32::<BigEndian>()
        .context("truncated IDX label header")? as usize;
    ensure!(
        rest.len() == count,
        "IDX label payload holds {} bytes, expected {}",
        rest.len(),
        count
    );

    Ok(Array1::from_vec(rest.to_vec()))
}

/// Serialize images into idx3-ubyte bytes.
pub fn build_idx3_bytes(images: &Array3<u8>) -> Vec<u8> {
    let (count, rows, cols) = images.dim();
    let mut bytes = Vec::with_capacity(16 + count * rows * cols);
    bytes.extend_from_slice(&IMAGE_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&(count as u32).to_be_bytes());
    bytes.extend_from_slice(&(rows as u32).to_be_bytes());
    bytes.extend_from_slice(&(cols as u32).to_be_bytes());
    bytes.extend(images.iter().copied());
    bytes
}

/// Serialize labels into idx1-ubyte bytes.
pub fn build_idx1_bytes(labels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + labels.len());
    bytes.extend_from_slice(&LABEL_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(labels);
    bytes
}
