// SPDX-License-Identifier: MPL-2.0
//! GPS metadata reading and writing port definitions.
//!
//! This module defines the two narrow interfaces the position codec needs
//! from a metadata library. Infrastructure adapters implement these traits
//! using `kamadak-exif` (read) and `little_exif` (write).
//!
//! Tag values cross this boundary in their textual EXIF form: rationals as
//! `"n/d n/d n/d"` and references as single letters. Validation is left to
//! the codec so that every adapter rejects the same inputs.

use std::fmt;
use std::path::Path;

// =============================================================================
// MetadataError
// =============================================================================

/// Errors that can occur during metadata operations.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataError {
    /// Failed to read metadata from file.
    ReadFailed(String),

    /// Failed to write metadata to file.
    WriteFailed(String),

    /// The file format doesn't support metadata.
    UnsupportedFormat,

    /// The metadata in the file is corrupted.
    CorruptedMetadata(String),

    /// A specific metadata field was not found.
    FieldNotFound(String),

    /// The file could not be accessed.
    IoError(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::ReadFailed(msg) => write!(f, "Failed to read metadata: {msg}"),
            MetadataError::WriteFailed(msg) => write!(f, "Failed to write metadata: {msg}"),
            MetadataError::UnsupportedFormat => write!(f, "Format does not support metadata"),
            MetadataError::CorruptedMetadata(msg) => write!(f, "Corrupted metadata: {msg}"),
            MetadataError::FieldNotFound(field) => write!(f, "Metadata field not found: {field}"),
            MetadataError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for MetadataError {}

impl From<std::io::Error> for MetadataError {
    fn from(err: std::io::Error) -> Self {
        MetadataError::IoError(err.to_string())
    }
}

// =============================================================================
// GpsTags
// =============================================================================

/// The four EXIF GPS tags that carry a position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpsTags {
    /// `GPSLatitude` as `"n/d n/d n/d"`.
    pub latitude: String,

    /// `GPSLongitude` as `"n/d n/d n/d"`.
    pub longitude: String,

    /// `GPSLatitudeRef`, `N` or `S` in valid files.
    pub latitude_ref: String,

    /// `GPSLongitudeRef`, `E` or `W` in valid files.
    pub longitude_ref: String,
}

// =============================================================================
// GpsTagReader Trait
// =============================================================================

/// Port for reading GPS tags from image files.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` for concurrent reading.
///
/// # Example
///
/// ```ignore
/// use geotagger::application::port::GpsTagReader;
/// use std::path::Path;
///
/// fn print_latitude(reader: &impl GpsTagReader, path: &Path) {
///     if let Ok(tags) = reader.read_gps_tags(path) {
///         println!("{} {}", tags.latitude, tags.latitude_ref);
///     }
/// }
/// ```
pub trait GpsTagReader: Send + Sync {
    /// Reads the four GPS position tags.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::FieldNotFound`] when any tag is absent and
    /// [`MetadataError::IoError`] / [`MetadataError::ReadFailed`] when the
    /// file cannot be opened or parsed.
    fn read_gps_tags(&self, path: &Path) -> Result<GpsTags, MetadataError>;
}

// =============================================================================
// GpsTagWriter Trait
// =============================================================================

/// Port for writing GPS tags to image files.
///
/// Implementations must leave the file untouched when they fail: either all
/// four tags land or none do.
pub trait GpsTagWriter: Send + Sync {
    /// Writes the four GPS position tags, preserving all other metadata.
    ///
    /// # Errors
    ///
    /// Returns a [`MetadataError`] if writing fails.
    fn write_gps_tags(&self, path: &Path, tags: &GpsTags) -> Result<(), MetadataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_error_display() {
        let err = MetadataError::ReadFailed("invalid format".to_string());
        assert!(format!("{err}").contains("invalid format"));

        let err = MetadataError::FieldNotFound("GPSLatitude".to_string());
        assert!(format!("{err}").contains("GPSLatitude"));

        let err = MetadataError::UnsupportedFormat;
        assert!(format!("{err}").contains("does not support"));
    }

    #[test]
    fn io_error_converts_to_io_variant() {
        let err: MetadataError = std::io::Error::other("boom").into();
        assert!(matches!(err, MetadataError::IoError(msg) if msg.contains("boom")));
    }

    #[test]
    fn gps_tags_default_is_empty() {
        let tags = GpsTags::default();
        assert!(tags.latitude.is_empty());
        assert!(tags.longitude_ref.is_empty());
    }

    // Test that traits are object-safe
    fn _assert_reader_object_safe(_: &dyn GpsTagReader) {}
    fn _assert_writer_object_safe(_: &dyn GpsTagWriter) {}
}
