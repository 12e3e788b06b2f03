// SPDX-License-Identifier: MPL-2.0
//! Conversion between decimal degrees and the EXIF GPS encoding.
//!
//! EXIF stores a position as two unsigned magnitudes, each written as three
//! rationals (degrees, minutes, seconds), plus two single-letter hemisphere
//! references. This module converts in both directions and produces the
//! `"37.28709N 22.35447E"` summary shown to the user.
//!
//! All functions are pure and safe to call from any thread.

use crate::application::port::GpsTags;
use crate::domain::error::GpsError;
use crate::domain::metadata::{
    Axis, DecimalCoordinate, ExifRational, HemisphereRef, RationalSexagesimal, SexagesimalAngle,
    DEFAULT_MAX_DENOMINATOR,
};
use serde::{Deserialize, Serialize};

/// Seconds are kept to this many decimal places.
const SECONDS_SCALE: f64 = 10_000.0;

/// How strictly hemisphere references are checked when decoding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Invalid references and out-of-range values fail the decode.
    #[default]
    Strict,
    /// Invalid references are read as `N`/`E` and values are clamped.
    Lenient,
}

// =============================================================================
// Pure conversions
// =============================================================================

/// Splits the magnitude of `x` into degrees, minutes and seconds.
///
/// The sign of `x` is dropped. Seconds are rounded to four decimals; when the
/// rounding reaches 60 the overflow is carried into minutes and degrees, so
/// the result never holds 60 seconds or 60 minutes.
#[must_use]
pub fn decimal_to_sexagesimal(x: f64) -> SexagesimalAngle {
    let x = x.abs();
    if !x.is_finite() {
        return SexagesimalAngle::default();
    }

    let degrees = x.floor();
    let minutes = (60.0 * (x - degrees)).floor();
    let mut seconds = round_seconds(((x - degrees) * 60.0 - minutes) * 60.0);

    let mut degrees = degrees as u32;
    let mut minutes = minutes as u32;
    if seconds >= 60.0 {
        seconds = round_seconds(seconds - 60.0);
        minutes += 1;
    }
    if minutes >= 60 {
        minutes -= 60;
        degrees += 1;
    }

    SexagesimalAngle::new(degrees, minutes, seconds)
}

/// Returns the unsigned decimal value of a sexagesimal angle.
#[must_use]
pub fn sexagesimal_to_decimal(angle: &SexagesimalAngle) -> f64 {
    dms_to_decimal(
        f64::from(angle.degrees()),
        f64::from(angle.minutes()),
        angle.seconds(),
    )
}

/// Encodes the magnitude of `x` as three EXIF rationals.
#[must_use]
pub fn decimal_to_rational(x: f64) -> RationalSexagesimal {
    decimal_to_rational_bounded(x, DEFAULT_MAX_DENOMINATOR)
}

/// Encodes the magnitude of `x` with denominators up to `max_denominator`.
#[must_use]
pub fn decimal_to_rational_bounded(x: f64, max_denominator: u32) -> RationalSexagesimal {
    let angle = decimal_to_sexagesimal(x);
    RationalSexagesimal::new(
        ExifRational::new(angle.degrees(), 1),
        ExifRational::new(angle.minutes(), 1),
        ExifRational::approximate(angle.seconds(), max_denominator),
    )
}

/// Decodes an `"n/d n/d n/d"` string into an unsigned decimal value.
///
/// A zero denominator is read as 1.
///
/// # Errors
///
/// Returns [`GpsError::MalformedRational`] unless the input is exactly three
/// `n/d` tokens of unsigned integers.
pub fn rational_to_decimal(encoded: &str) -> Result<f64, GpsError> {
    let rational: RationalSexagesimal = encoded.parse()?;
    Ok(rational_sexagesimal_to_decimal(&rational))
}

/// Returns the unsigned decimal value of a rational sexagesimal triple.
#[must_use]
pub fn rational_sexagesimal_to_decimal(rational: &RationalSexagesimal) -> f64 {
    dms_to_decimal(
        rational.degrees().to_f64(),
        rational.minutes().to_f64(),
        rational.seconds().to_f64(),
    )
}

/// Formats a position as `"{|lat|:.5}{latRef} {|lon|:.5}{lonRef}"`.
///
/// # Errors
///
/// Returns [`GpsError::InvalidHemisphereRef`] when `lat_ref` is not `N`/`S`
/// or `lon_ref` is not `E`/`W`.
pub fn format_position(
    latitude: f64,
    longitude: f64,
    lat_ref: &str,
    lon_ref: &str,
) -> Result<String, GpsError> {
    let lat_ref = HemisphereRef::parse(Axis::Latitude, lat_ref)?;
    let lon_ref = HemisphereRef::parse(Axis::Longitude, lon_ref)?;
    Ok(format!(
        "{:.5}{} {:.5}{}",
        latitude.abs(),
        lat_ref,
        longitude.abs(),
        lon_ref
    ))
}

fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + (minutes + seconds / 60.0) / 60.0
}

fn round_seconds(seconds: f64) -> f64 {
    (seconds * SECONDS_SCALE).round() / SECONDS_SCALE
}

// =============================================================================
// CoordinateCodec
// =============================================================================

/// Encodes and decodes whole positions to and from [`GpsTags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateCodec {
    mode: ValidationMode,
    max_denominator: u32,
}

impl Default for CoordinateCodec {
    fn default() -> Self {
        Self::new(ValidationMode::default(), DEFAULT_MAX_DENOMINATOR)
    }
}

impl CoordinateCodec {
    #[must_use]
    pub fn new(mode: ValidationMode, max_denominator: u32) -> Self {
        Self {
            mode,
            max_denominator: max_denominator.max(1),
        }
    }

    #[must_use]
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Builds the four tags for a coordinate.
    ///
    /// References come from the signs: `S` for negative latitude, `W` for
    /// negative longitude.
    #[must_use]
    pub fn encode(&self, coord: &DecimalCoordinate) -> GpsTags {
        GpsTags {
            latitude: decimal_to_rational_bounded(coord.latitude(), self.max_denominator)
                .to_string(),
            longitude: decimal_to_rational_bounded(coord.longitude(), self.max_denominator)
                .to_string(),
            latitude_ref: coord.latitude_ref().to_string(),
            longitude_ref: coord.longitude_ref().to_string(),
        }
    }

    /// Decodes the four tags into a signed coordinate.
    ///
    /// # Errors
    ///
    /// Malformed rationals always fail. In [`ValidationMode::Strict`] an
    /// invalid reference or an out-of-range value also fails.
    pub fn decode(&self, tags: &GpsTags) -> Result<DecimalCoordinate, GpsError> {
        let latitude = rational_to_decimal(&tags.latitude)?;
        let longitude = rational_to_decimal(&tags.longitude)?;
        let lat_ref = self.hemisphere(Axis::Latitude, &tags.latitude_ref)?;
        let lon_ref = self.hemisphere(Axis::Longitude, &tags.longitude_ref)?;

        match self.mode {
            ValidationMode::Strict => {
                DecimalCoordinate::from_magnitudes(latitude, lat_ref, longitude, lon_ref)
            }
            ValidationMode::Lenient => Ok(DecimalCoordinate::new(
                latitude * lat_ref.sign(),
                longitude * lon_ref.sign(),
            )),
        }
    }

    fn hemisphere(&self, axis: Axis, raw: &str) -> Result<HemisphereRef, GpsError> {
        match (HemisphereRef::parse(axis, raw), self.mode) {
            (Ok(hemisphere), _) => Ok(hemisphere),
            (Err(err), ValidationMode::Strict) => Err(err),
            (Err(err), ValidationMode::Lenient) => {
                tracing::warn!("{err}, reading it as {}", HemisphereRef::positive(axis));
                Ok(HemisphereRef::positive(axis))
            }
        }
    }
}
