// SPDX-License-Identifier: MPL-2.0
//! GPS tag writing for JPEG files.
//!
//! This module implements [`GpsTagWriter`] using the `little_exif` crate.
//! Writes go to a temporary sibling file which then replaces the original,
//! so a failed write never leaves a half-tagged file behind.

use crate::application::port::{GpsTagWriter, GpsTags, MetadataError};
use crate::domain::metadata::{Axis, HemisphereRef, RationalSexagesimal};
use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;
use little_exif::rational::uR64;
use std::fs;
use std::path::Path;

/// JPEG start-of-image marker.
const SOI: [u8; 2] = [0xFF, 0xD8];

/// Identifier at the start of an EXIF APP1 payload.
const EXIF_MARKER: &[u8] = b"Exif\0\0";

/// Minimal little-endian TIFF block: IFD0 with a single Orientation = 1 entry.
const EMPTY_TIFF: [u8; 26] = [
    0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, // header, IFD0 at offset 8
    0x01, 0x00, // one entry
    0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, // Orientation
    0x00, 0x00, 0x00, 0x00, // no next IFD
];

/// Writes GPS tags with `little_exif`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifGpsWriter;

impl ExifGpsWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GpsTagWriter for ExifGpsWriter {
    fn write_gps_tags(&self, path: &Path, tags: &GpsTags) -> Result<(), MetadataError> {
        if !is_format_supported(path) {
            return Err(MetadataError::UnsupportedFormat);
        }

        let latitude = to_exif_rationals(&tags.latitude)?;
        let longitude = to_exif_rationals(&tags.longitude)?;
        let latitude_ref = checked_ref(Axis::Latitude, &tags.latitude_ref)?;
        let longitude_ref = checked_ref(Axis::Longitude, &tags.longitude_ref)?;

        let original = fs::read(path)?;
        if !original.starts_with(&SOI) {
            return Err(MetadataError::CorruptedMetadata(
                "Not a valid JPEG file".to_string(),
            ));
        }
        // little_exif cannot write into a file that has no EXIF block yet.
        let staged = if has_exif_segment(&original) {
            original
        } else {
            insert_empty_exif(&original)
        };

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp = tempfile::Builder::new()
            .prefix(".geotagger-")
            .suffix(".jpg")
            .tempfile_in(parent)?;
        fs::write(temp.path(), &staged)?;
        let temp_path = temp.into_temp_path();

        let mut metadata = Metadata::new_from_path(&temp_path).map_err(|e| {
            MetadataError::ReadFailed(format!(
                "Could not read existing EXIF from '{}': {e}",
                path.display()
            ))
        })?;
        metadata.set_tag(ExifTag::GPSLatitudeRef(latitude_ref.to_string()));
        metadata.set_tag(ExifTag::GPSLatitude(latitude));
        metadata.set_tag(ExifTag::GPSLongitudeRef(longitude_ref.to_string()));
        metadata.set_tag(ExifTag::GPSLongitude(longitude));
        metadata.write_to_file(&temp_path).map_err(|e| {
            MetadataError::WriteFailed(format!(
                "Failed to write EXIF metadata for '{}': {e}",
                path.display()
            ))
        })?;

        if let Ok(original_meta) = fs::metadata(path) {
            fs::set_permissions(&temp_path, original_meta.permissions())?;
        }
        temp_path.persist(path).map_err(|e| {
            MetadataError::WriteFailed(format!("Failed to replace '{}': {e}", path.display()))
        })?;

        Ok(())
    }
}

fn to_exif_rationals(encoded: &str) -> Result<Vec<uR64>, MetadataError> {
    let rational: RationalSexagesimal = encoded
        .parse()
        .map_err(|e| MetadataError::WriteFailed(format!("{e}")))?;
    Ok(rational
        .components()
        .iter()
        .map(|r| uR64 {
            nominator: r.numerator(),
            denominator: r.denominator(),
        })
        .collect())
}

fn checked_ref(axis: Axis, raw: &str) -> Result<HemisphereRef, MetadataError> {
    HemisphereRef::parse(axis, raw).map_err(|e| MetadataError::WriteFailed(format!("{e}")))
}

/// Returns `true` if an APP1 segment with an EXIF payload precedes the scan data.
fn has_exif_segment(data: &[u8]) -> bool {
    let mut pos = 2; // Skip SOI

    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return false;
        }
        let marker_type = data[pos + 1];
        match marker_type {
            0xD9 | 0xDA => return false, // EOI or SOS
            0x00 | 0x01 | 0xD0..=0xD8 | 0xFF => {
                pos += if marker_type == 0xFF { 1 } else { 2 };
                continue;
            }
            _ => {}
        }

        let segment_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let segment_end = pos + 2 + segment_len;
        if segment_len < 2 || segment_end > data.len() {
            return false;
        }

        let payload = &data[pos + 4..segment_end];
        if marker_type == 0xE1 && payload.starts_with(EXIF_MARKER) {
            return true;
        }
        pos = segment_end;
    }
    false
}

/// Returns a copy of `data` with a minimal EXIF APP1 segment inserted after
/// SOI, or after a leading JFIF APP0 segment when there is one.
fn insert_empty_exif(data: &[u8]) -> Vec<u8> {
    let mut insert_pos = 2;
    if data.len() >= 6 && data[2] == 0xFF && data[3] == 0xE0 {
        let app0_len = u16::from_be_bytes([data[4], data[5]]) as usize;
        if 4 + app0_len <= data.len() {
            insert_pos = 4 + app0_len;
        }
    }

    let segment_len = (2 + EXIF_MARKER.len() + EMPTY_TIFF.len()) as u16;
    let mut segment = Vec::with_capacity(2 + segment_len as usize);
    segment.extend_from_slice(&[0xFF, 0xE1]);
    segment.extend_from_slice(&segment_len.to_be_bytes());
    segment.extend_from_slice(EXIF_MARKER);
    segment.extend_from_slice(&EMPTY_TIFF);

    let mut out = Vec::with_capacity(data.len() + segment.len());
    out.extend_from_slice(&data[..insert_pos]);
    out.extend_from_slice(&segment);
    out.extend_from_slice(&data[insert_pos..]);
    out
}

/// Returns the list of file extensions that support GPS writing.
pub fn supported_extensions() -> &'static [&'static str] {
    &["jpg", "jpeg"]
}

/// Checks if a file format supports GPS writing.
pub fn is_format_supported<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| supported_extensions().contains(&ext.to_lowercase().as_str()))
}
