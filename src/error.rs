// SPDX-License-Identifier: MPL-2.0
use crate::application::port::MetadataError;
use crate::domain::error::GpsError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(String),
    Metadata(MetadataError),
    Gps(GpsError),
    /// Invalid command-line usage.
    Usage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Metadata(e) => write!(f, "Metadata Error: {}", e),
            Error::Gps(e) => write!(f, "GPS Error: {}", e),
            Error::Usage(e) => write!(f, "Usage Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MetadataError> for Error {
    fn from(err: MetadataError) -> Self {
        Error::Metadata(err)
    }
}

impl From<GpsError> for Error {
    fn from(err: GpsError) -> Self {
        Error::Gps(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Usage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn metadata_error_is_wrapped() {
        let err: Error = MetadataError::UnsupportedFormat.into();
        assert!(matches!(err, Error::Metadata(MetadataError::UnsupportedFormat)));
        assert!(format!("{}", err).starts_with("Metadata Error:"));
    }

    #[test]
    fn gps_error_is_wrapped() {
        let err: Error = GpsError::MalformedRational("1/1".into()).into();
        assert!(matches!(err, Error::Gps(_)));
    }
}
