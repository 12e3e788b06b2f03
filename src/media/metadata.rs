// SPDX-License-Identifier: MPL-2.0
//! GPS tag extraction from image files.
//!
//! This module implements [`GpsTagReader`] on top of `kamadak-exif`. Tag
//! values are rendered into their textual form without validation; the
//! position codec decides whether they make a usable position.

use crate::application::port::{GpsTagReader, GpsTags, MetadataError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads GPS tags with `kamadak-exif`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifGpsReader;

impl ExifGpsReader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GpsTagReader for ExifGpsReader {
    fn read_gps_tags(&self, path: &Path) -> Result<GpsTags, MetadataError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let exif = match exif::Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => {
                return Err(MetadataError::FieldNotFound("Exif".to_string()))
            }
            Err(exif::Error::Io(e)) => return Err(MetadataError::IoError(e.to_string())),
            Err(e) => return Err(MetadataError::ReadFailed(e.to_string())),
        };

        Ok(GpsTags {
            latitude: rational_field(&exif, exif::Tag::GPSLatitude)?,
            longitude: rational_field(&exif, exif::Tag::GPSLongitude)?,
            latitude_ref: ascii_field(&exif, exif::Tag::GPSLatitudeRef)?,
            longitude_ref: ascii_field(&exif, exif::Tag::GPSLongitudeRef)?,
        })
    }
}

fn field<'a>(exif: &'a exif::Exif, tag: exif::Tag) -> Result<&'a exif::Field, MetadataError> {
    exif.get_field(tag, exif::In::PRIMARY)
        .ok_or_else(|| MetadataError::FieldNotFound(tag.to_string()))
}

/// Renders a rational field as space-separated `n/d` tokens.
fn rational_field(exif: &exif::Exif, tag: exif::Tag) -> Result<String, MetadataError> {
    match &field(exif, tag)?.value {
        exif::Value::Rational(rationals) => Ok(rationals
            .iter()
            .map(|r| format!("{}/{}", r.num, r.denom))
            .collect::<Vec<_>>()
            .join(" ")),
        exif::Value::SRational(rationals) => Ok(rationals
            .iter()
            .map(|r| format!("{}/{}", r.num, r.denom))
            .collect::<Vec<_>>()
            .join(" ")),
        other => Err(MetadataError::CorruptedMetadata(format!(
            "{tag} is not a rational: {other:?}"
        ))),
    }
}

/// Returns the first ASCII string of a field, without trailing NULs.
fn ascii_field(exif: &exif::Exif, tag: exif::Tag) -> Result<String, MetadataError> {
    let field = field(exif, tag)?;
    match &field.value {
        exif::Value::Ascii(strings) => Ok(strings
            .first()
            .map(|s| String::from_utf8_lossy(s).trim_end_matches('\0').to_string())
            .unwrap_or_default()),
        _ => Ok(field.display_value().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_io_error() {
        let result = ExifGpsReader::new().read_gps_tags(Path::new("/nonexistent/path/image.jpg"));
        assert!(matches!(result, Err(MetadataError::IoError(_))));
    }

    #[test]
    fn file_without_exif_is_not_found_or_read_failure() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("test.jpg");
        let mut file = File::create(&path).expect("create file");
        writeln!(file, "not an image").expect("write");

        let result = ExifGpsReader::new().read_gps_tags(&path);
        assert!(matches!(
            result,
            Err(MetadataError::FieldNotFound(_)) | Err(MetadataError::ReadFailed(_))
        ));
    }
}
