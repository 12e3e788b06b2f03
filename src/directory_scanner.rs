// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for finding taggable photos.
//!
//! This module lists the files of a single directory whose extension is one
//! of the configured photo extensions, sorted by file name.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// The photos of one directory, sorted by file name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhotoList {
    directory: PathBuf,
    photos: Vec<PathBuf>,
}

impl PhotoList {
    /// Creates a new empty PhotoList.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `directory` (not recursively) for files whose extension matches
    /// one of `extensions`, ignoring case.
    ///
    /// Returns an error if `directory` is not a readable directory.
    pub fn scan(directory: &Path, extensions: &[String]) -> Result<Self> {
        if !directory.is_dir() {
            return Err(Error::Io(format!(
                "Not a directory: {}",
                directory.display()
            )));
        }

        let mut photos = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && has_extension(&path, extensions) {
                photos.push(path);
            }
        }
        photos.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(Self {
            directory: directory.to_path_buf(),
            photos,
        })
    }

    /// Returns the scanned directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the photo paths in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.photos
    }

    /// Returns the full path of the photo named `file_name`.
    pub fn find(&self, file_name: &str) -> Option<&Path> {
        self.photos
            .iter()
            .find(|p| p.file_name().is_some_and(|n| n == file_name))
            .map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn jpeg_extensions() -> Vec<String> {
        vec!["jpg".to_string(), "jpeg".to_string()]
    }

    fn create_test_image(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("failed to create test file");
        file.write_all(b"fake image data")
            .expect("failed to write test file");
        path
    }

    #[test]
    fn scan_finds_only_jpegs() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_test_image(temp_dir.path(), "a.jpg");
        create_test_image(temp_dir.path(), "b.JPEG");
        create_test_image(temp_dir.path(), "c.png");
        create_test_image(temp_dir.path(), "notes.txt");
        create_test_image(temp_dir.path(), "jpg");

        let list =
            PhotoList::scan(temp_dir.path(), &jpeg_extensions()).expect("failed to scan directory");

        assert_eq!(list.len(), 2);
    }

    #[test]
    fn scan_sorts_by_file_name() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img_c = create_test_image(temp_dir.path(), "c.jpg");
        let img_a = create_test_image(temp_dir.path(), "a.jpg");
        let img_b = create_test_image(temp_dir.path(), "b.jpg");

        let list =
            PhotoList::scan(temp_dir.path(), &jpeg_extensions()).expect("failed to scan directory");

        assert_eq!(list.paths(), &[img_a, img_b, img_c]);
    }

    #[test]
    fn scan_skips_subdirectories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::create_dir(temp_dir.path().join("nested.jpg")).expect("create dir");
        create_test_image(temp_dir.path(), "a.jpg");

        let list =
            PhotoList::scan(temp_dir.path(), &jpeg_extensions()).expect("failed to scan directory");

        assert_eq!(list.len(), 1);
    }

    #[test]
    fn scan_of_file_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let file = create_test_image(temp_dir.path(), "a.jpg");

        assert!(PhotoList::scan(&file, &jpeg_extensions()).is_err());
    }

    #[test]
    fn find_by_file_name() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img_a = create_test_image(temp_dir.path(), "a.jpg");

        let list =
            PhotoList::scan(temp_dir.path(), &jpeg_extensions()).expect("failed to scan directory");

        assert_eq!(list.find("a.jpg"), Some(img_a.as_path()));
        assert_eq!(list.find("missing.jpg"), None);
        assert_eq!(list.directory(), temp_dir.path());
    }

    #[test]
    fn new_list_is_empty() {
        assert!(PhotoList::new().is_empty());
    }
}
