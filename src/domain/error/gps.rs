// SPDX-License-Identifier: MPL-2.0
//! Errors raised while decoding or validating GPS positions.

use crate::domain::metadata::Axis;
use std::fmt;

/// Specific error types for GPS coordinate decoding and validation.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsError {
    /// A rational string is not exactly three `n/d` tokens.
    MalformedRational(String),

    /// A hemisphere reference is outside `{N, S}` or `{E, W}`.
    InvalidHemisphereRef { axis: Axis, value: String },

    /// Latitude or longitude is outside its valid range, or not finite.
    OutOfRange { latitude: f64, longitude: f64 },
}

impl fmt::Display for GpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsError::MalformedRational(raw) => write!(f, "Malformed GPS rational: {raw:?}"),
            GpsError::InvalidHemisphereRef { axis, value } => {
                write!(f, "Invalid {axis} reference: {value:?}")
            }
            GpsError::OutOfRange {
                latitude,
                longitude,
            } => write!(f, "Coordinates out of range: {latitude}, {longitude}"),
        }
    }
}

impl std::error::Error for GpsError {}
