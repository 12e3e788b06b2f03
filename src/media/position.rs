// SPDX-License-Identifier: MPL-2.0
//! Reading and writing a file's GPS position.
//!
//! These are the boundary operations used by the photo library and the CLI.
//! Every failure is logged here and collapsed into `None` / `false`; callers
//! treat `None` as "position unknown", never as a fatal error.

use crate::application::port::{GpsTagReader, GpsTagWriter, MetadataError};
use crate::domain::metadata::DecimalCoordinate;
use crate::media::gps_codec::CoordinateCodec;
use std::path::Path;

/// Reads the position stored in `path`.
///
/// Returns `None` when the file cannot be read, any of the four GPS tags is
/// missing, a rational is malformed or (in strict mode) a reference is
/// invalid.
pub fn read_position(
    reader: &dyn GpsTagReader,
    codec: &CoordinateCodec,
    path: &Path,
) -> Option<DecimalCoordinate> {
    let tags = match reader.read_gps_tags(path) {
        Ok(tags) => tags,
        Err(MetadataError::FieldNotFound(field)) => {
            tracing::debug!("No position in {}: {field} missing", path.display());
            return None;
        }
        Err(e) => {
            tracing::warn!("Error loading metadata for {}: {e}", path.display());
            return None;
        }
    };

    match codec.decode(&tags) {
        Ok(position) => Some(position),
        Err(e) => {
            tracing::warn!("Error loading position for {}: {e}", path.display());
            None
        }
    }
}

/// Writes `coord` into the GPS tags of `path`.
///
/// Returns `false` (and logs) if the write failed; the file is left as it was.
pub fn write_position(
    writer: &dyn GpsTagWriter,
    codec: &CoordinateCodec,
    path: &Path,
    coord: &DecimalCoordinate,
) -> bool {
    let tags = codec.encode(coord);
    match writer.write_gps_tags(path, &tags) {
        Ok(()) => {
            tracing::info!("Set {} to position {coord}", path.display());
            true
        }
        Err(e) => {
            tracing::warn!(
                "Failed setting {} to position {coord}: {e}",
                path.display()
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::GpsTags;
    use crate::media::gps_codec::ValidationMode;
    use std::sync::Mutex;

    struct FixedReader(Result<GpsTags, MetadataError>);

    impl GpsTagReader for FixedReader {
        fn read_gps_tags(&self, _path: &Path) -> Result<GpsTags, MetadataError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        written: Mutex<Vec<GpsTags>>,
        fail: bool,
    }

    impl GpsTagWriter for RecordingWriter {
        fn write_gps_tags(&self, _path: &Path, tags: &GpsTags) -> Result<(), MetadataError> {
            if self.fail {
                return Err(MetadataError::WriteFailed("disk full".to_string()));
            }
            self.written.lock().unwrap().push(tags.clone());
            Ok(())
        }
    }

    fn tags(lat_ref: &str, lon_ref: &str) -> GpsTags {
        GpsTags {
            latitude: "37/1 17/1 135197/10000".to_string(),
            longitude: "22/1 21/1 160339/10000".to_string(),
            latitude_ref: lat_ref.to_string(),
            longitude_ref: lon_ref.to_string(),
        }
    }

    #[test]
    fn read_position_decodes_valid_tags() {
        let reader = FixedReader(Ok(tags("N", "E")));
        let position =
            read_position(&reader, &CoordinateCodec::default(), Path::new("a.jpg")).unwrap();
        assert_eq!(position.to_string(), "37.28709N 22.35445E");
    }

    #[test]
    fn read_position_rejects_invalid_latitude_ref() {
        let reader = FixedReader(Ok(tags("X", "E")));
        assert!(read_position(&reader, &CoordinateCodec::default(), Path::new("a.jpg")).is_none());
    }

    #[test]
    fn read_position_lenient_accepts_invalid_ref() {
        let reader = FixedReader(Ok(tags("X", "E")));
        let codec = CoordinateCodec::new(ValidationMode::Lenient, 1_000_000);
        assert!(read_position(&reader, &codec, Path::new("a.jpg")).is_some());
    }

    #[test]
    fn read_position_missing_tag_is_none() {
        let reader = FixedReader(Err(MetadataError::FieldNotFound("GPSLatitude".into())));
        assert!(read_position(&reader, &CoordinateCodec::default(), Path::new("a.jpg")).is_none());
    }

    #[test]
    fn read_position_io_failure_is_none() {
        let reader = FixedReader(Err(MetadataError::IoError("permission denied".into())));
        assert!(read_position(&reader, &CoordinateCodec::default(), Path::new("a.jpg")).is_none());
    }

    #[test]
    fn read_position_malformed_rational_is_none() {
        let mut malformed = tags("N", "E");
        malformed.latitude = "10/1 30/1".to_string();
        let reader = FixedReader(Ok(malformed));
        assert!(read_position(&reader, &CoordinateCodec::default(), Path::new("a.jpg")).is_none());
    }

    #[test]
    fn write_position_derives_hemispheres() {
        let writer = RecordingWriter::default();
        let ok = write_position(
            &writer,
            &CoordinateCodec::default(),
            Path::new("a.jpg"),
            &DecimalCoordinate::new(-10.0, 5.0),
        );
        assert!(ok);

        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].latitude_ref, "S");
        assert_eq!(written[0].longitude_ref, "E");
        assert_eq!(written[0].latitude, "10/1 0/1 0/1");
    }

    #[test]
    fn write_position_failure_is_false() {
        let writer = RecordingWriter {
            fail: true,
            ..Default::default()
        };
        let ok = write_position(
            &writer,
            &CoordinateCodec::default(),
            Path::new("a.jpg"),
            &DecimalCoordinate::new(1.0, 1.0),
        );
        assert!(!ok);
    }
}
