// SPDX-License-Identifier: MPL-2.0
//! Photo library: the photos of one directory and their positions.
//!
//! [`PhotoLibrary`] ties the directory listing to the GPS adapters. Positions
//! are read lazily through a [`PositionCache`] and refreshed after each
//! successful write.

use crate::application::port::{GpsTagReader, GpsTagWriter};
use crate::directory_scanner::PhotoList;
use crate::domain::metadata::DecimalCoordinate;
use crate::error::Result;
use crate::media::gps_codec::CoordinateCodec;
use crate::media::position::{read_position, write_position};
use crate::media::position_cache::PositionCache;
use crate::media::{ExifGpsReader, ExifGpsWriter};
use std::fmt;
use std::path::{Path, PathBuf};

/// One photo of the library, as listed to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub has_position: bool,
}

/// Result of setting the position of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    Written { file_name: String },
    Failed { file_name: String },
    /// The name does not belong to a photo of the library.
    UnknownFile { file_name: String },
}

impl SetOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, SetOutcome::Written { .. })
    }
}

impl fmt::Display for SetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetOutcome::Written { file_name } => write!(f, "{file_name}: written"),
            SetOutcome::Failed { file_name } => write!(f, "{file_name}: failed"),
            SetOutcome::UnknownFile { file_name } => write!(f, "{file_name}: not in library"),
        }
    }
}

pub struct PhotoLibrary {
    photos: PhotoList,
    extensions: Vec<String>,
    cache: PositionCache,
    codec: CoordinateCodec,
    reader: Box<dyn GpsTagReader>,
    writer: Box<dyn GpsTagWriter>,
}

impl PhotoLibrary {
    /// Creates an empty library backed by the given adapters.
    pub fn new(
        reader: Box<dyn GpsTagReader>,
        writer: Box<dyn GpsTagWriter>,
        codec: CoordinateCodec,
        extensions: Vec<String>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            photos: PhotoList::new(),
            extensions,
            cache: PositionCache::new(cache_capacity),
            codec,
            reader,
            writer,
        }
    }

    /// Creates an empty library using the EXIF adapters.
    pub fn with_exif(
        codec: CoordinateCodec,
        extensions: Vec<String>,
        cache_capacity: usize,
    ) -> Self {
        Self::new(
            Box::new(ExifGpsReader::new()),
            Box::new(ExifGpsWriter::new()),
            codec,
            extensions,
            cache_capacity,
        )
    }

    /// Replaces the library contents with the photos of `directory`.
    ///
    /// Cached positions are dropped. On error the library is left empty.
    pub fn reload(&mut self, directory: &Path) -> Result<()> {
        self.cache.clear();
        self.photos = PhotoList::new();
        self.photos = PhotoList::scan(directory, &self.extensions)?;
        tracing::info!(
            "Loaded {} photos from {}",
            self.photos.len(),
            directory.display()
        );
        Ok(())
    }

    /// Lists the photos with whether each one has a readable position.
    pub fn entries(&mut self) -> Vec<PhotoEntry> {
        let paths = self.photos.paths().to_vec();
        paths
            .into_iter()
            .map(|path| {
                let has_position = self.position(&path).is_some();
                let file_name = display_name(&path);
                PhotoEntry {
                    path,
                    file_name,
                    has_position,
                }
            })
            .collect()
    }

    pub fn paths(&self) -> &[PathBuf] {
        self.photos.paths()
    }

    /// Returns the full path of the photo named `file_name`.
    pub fn full_path_for(&self, file_name: &str) -> Option<PathBuf> {
        self.photos.find(file_name).map(Path::to_path_buf)
    }

    /// Returns the position of `path`, reading the file only on a cache miss.
    pub fn position(&mut self, path: &Path) -> Option<DecimalCoordinate> {
        if let Some(cached) = self.cache.get(path) {
            return cached;
        }
        let position = read_position(self.reader.as_ref(), &self.codec, path);
        self.cache.insert(path, position);
        position
    }

    fn position_of(&mut self, file_name: &str) -> Option<DecimalCoordinate> {
        self.full_path_for(file_name)
            .and_then(|path| self.position(&path))
    }

    /// Describes a selection of file names as two lines: the selection, then
    /// `File position: ...`.
    pub fn describe_selection(&mut self, file_names: &[String]) -> String {
        let (selection, position) = match file_names {
            [] => ("No file selected".to_string(), "-".to_string()),
            [single] => (single.clone(), format_position(self.position_of(single))),
            [first, rest @ ..] => {
                // Positions match when they display the same.
                let first_position = format_position(self.position_of(first));
                let all_equal = rest
                    .iter()
                    .all(|name| format_position(self.position_of(name)) == first_position);
                let position = if all_equal {
                    first_position
                } else {
                    "Multiple positions".to_string()
                };
                ("Multiple files selected".to_string(), position)
            }
        };
        format!("{selection}\nFile position: {position}")
    }

    /// Writes `position` into every named file.
    ///
    /// A `None` position is refused: nothing is written and the report is
    /// empty.
    pub fn set_positions(
        &mut self,
        position: Option<DecimalCoordinate>,
        file_names: &[String],
    ) -> Vec<SetOutcome> {
        let Some(position) = position else {
            tracing::warn!("Refusing to set an empty position, nothing written");
            return Vec::new();
        };

        file_names
            .iter()
            .map(|name| {
                let file_name = name.clone();
                let Some(path) = self.full_path_for(name) else {
                    tracing::warn!("{name} is not part of the library");
                    return SetOutcome::UnknownFile { file_name };
                };
                if write_position(self.writer.as_ref(), &self.codec, &path, &position) {
                    // Cache the position as it reads back from the tags.
                    let stored = self.codec.decode(&self.codec.encode(&position)).ok();
                    self.cache.insert(&path, stored);
                    SetOutcome::Written { file_name }
                } else {
                    self.cache.invalidate(&path);
                    SetOutcome::Failed { file_name }
                }
            })
            .collect()
    }

    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }

    pub fn codec(&self) -> &CoordinateCodec {
        &self.codec
    }
}

impl fmt::Debug for PhotoLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoLibrary")
            .field("directory", &self.photos.directory())
            .field("photos", &self.photos.len())
            .field("cache", &self.cache)
            .finish()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn format_position(position: Option<DecimalCoordinate>) -> String {
    position.map_or_else(|| "None".to_string(), |p| p.to_string())
}
