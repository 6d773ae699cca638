//! Scanner for one-subfolder-per-class image directory trees.
//!
//! Class names are the immediate subdirectories of the root, labels their
//! position in sorted order. Image files are collected recursively below
//! each class directory.

use anyhow::{ensure, Context as _, Result};
use indexmap::IndexSet;
use log::warn;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Recognized image file extensions, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["bmp", "gif", "jpeg", "jpg", "png", "tif", "tiff", "webp"];

/// One discovered image file with its folder-inferred class index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sample {
    pub path: PathBuf,
    pub class: usize,
}

/// The scanned content of a labeled directory tree.
#[derive(Debug, Clone)]
pub struct ImageFolder {
    /// Class names in label order.
    pub classes: IndexSet<String>,
    /// Discovered files, ordered by class then path.
    pub samples: Vec<Sample>,
}

impl ImageFolder {
    /// Scan `root`, one class per immediate subdirectory.
    ///
    /// Fails if `root` is not a directory, holds no subdirectories, or no
    /// image file is found anywhere below them.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        ensure!(root.is_dir(), "'{}' is not a directory", root.display());

        let mut class_dirs: Vec<(String, PathBuf)> = fs::read_dir(root)
            .with_context(|| format!("failed to read directory '{}'", root.display()))?
            .map(|entry| -> Result<_> {
                let path = entry?.path();
                let name = match (path.is_dir(), path.file_name()) {
                    (true, Some(name)) => name.to_str().map(ToOwned::to_owned),
                    _ => None,
                };
                Ok(name.map(|name| (name, path)))
            })
            .filter_map(|result| result.transpose())
            .collect::<Result<_>>()?;
        class_dirs.sort_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));

        ensure!(
            !class_dirs.is_empty(),
            "no class subdirectories under '{}'",
            root.display()
        );

        let mut samples = Vec::new();
        for (class, (name, dir)) in class_dirs.iter().enumerate() {
            let mut paths = Vec::new();
            collect_images(dir, &mut paths)?;
            paths.sort();

            if paths.is_empty() {
                warn!("class directory '{}' holds no image files", name);
            }
            samples.extend(paths.into_iter().map(|path| Sample { path, class }));
        }

        ensure!(
            !samples.is_empty(),
            "no image files under '{}'",
            root.display()
        );

        let classes = class_dirs.into_iter().map(|(name, _)| name).collect();
        Ok(Self { classes, samples })
    }

    /// The number of discovered files.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the scan found no files.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn collect_images(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory '{}'", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_images(&path, paths)?;
        } else if is_image(&path) {
            paths.push(path);
        }
    }

    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_labeled_tree() -> Result<()> {
        let root = test_dir("scan_labeled_tree");
        touch(&root.join("cat/a.png"))?;
        touch(&root.join("cat/b.jpg"))?;
        touch(&root.join("dog/nested/c.png"))?;
        touch(&root.join("dog/d.PNG"))?;
        touch(&root.join("dog/notes.txt"))?;

        let folder = ImageFolder::scan(&root)?;
        assert_eq!(
            folder.classes.iter().collect::<Vec<_>>(),
            vec!["cat", "dog"]
        );
        assert_eq!(folder.len(), 4);
        assert!(folder.samples[..2].iter().all(|sample| sample.class == 0));
        assert!(folder.samples[2..].iter().all(|sample| sample.class == 1));

        fs::remove_dir_all(&root)?;
        Ok(())
    }

    #[test]
    fn scan_is_deterministic() -> Result<()> {
        let root = test_dir("scan_is_deterministic");
        touch(&root.join("b/2.png"))?;
        touch(&root.join("b/1.png"))?;
        touch(&root.join("a/3.png"))?;

        let folder = ImageFolder::scan(&root)?;
        let paths: Vec<_> = folder.samples.iter().map(|sample| &sample.path).collect();
        assert_eq!(
            paths,
            vec![
                &root.join("a/3.png"),
                &root.join("b/1.png"),
                &root.join("b/2.png"),
            ]
        );

        fs::remove_dir_all(&root)?;
        Ok(())
    }

    #[test]
    fn missing_root() {
        let root = std::env::temp_dir().join("image-folder-does-not-exist");
        let err = ImageFolder::scan(&root).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn no_class_subdirectories() {
        let root = test_dir("no_class_subdirectories");
        let err = ImageFolder::scan(&root).unwrap_err();
        assert!(err.to_string().contains("no class subdirectories"));
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn no_image_files() -> Result<()> {
        let root = test_dir("no_image_files");
        touch(&root.join("cat/notes.txt"))?;
        let err = ImageFolder::scan(&root).unwrap_err();
        assert!(err.to_string().contains("no image files"));
        fs::remove_dir_all(&root)?;
        Ok(())
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("image-folder-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(path: &Path) -> Result<()> {
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(path, b"")?;
        Ok(())
    }
}
