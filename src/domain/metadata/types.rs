// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! Pure domain types for GPS positions with no external dependencies.

use crate::domain::error::GpsError;
use std::fmt;

// =============================================================================
// Axis
// =============================================================================

/// Which half of a coordinate pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

// =============================================================================
// HemisphereRef
// =============================================================================

/// Hemisphere reference stored alongside an unsigned EXIF GPS magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HemisphereRef {
    North,
    South,
    East,
    West,
}

impl HemisphereRef {
    /// Returns the reference for a signed latitude (`S` when negative).
    #[must_use]
    pub fn for_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            HemisphereRef::South
        } else {
            HemisphereRef::North
        }
    }

    /// Returns the reference for a signed longitude (`W` when negative).
    #[must_use]
    pub fn for_longitude(longitude: f64) -> Self {
        if longitude < 0.0 {
            HemisphereRef::West
        } else {
            HemisphereRef::East
        }
    }

    /// Parses a reference tag for the given axis.
    ///
    /// Matching ignores case and surrounding whitespace, so `" s"` is `South`.
    /// A reference from the other axis (e.g. `E` for a latitude) is rejected.
    pub fn parse(axis: Axis, raw: &str) -> Result<Self, GpsError> {
        let parsed = match (axis, raw.trim().to_ascii_uppercase().as_str()) {
            (Axis::Latitude, "N") => Some(HemisphereRef::North),
            (Axis::Latitude, "S") => Some(HemisphereRef::South),
            (Axis::Longitude, "E") => Some(HemisphereRef::East),
            (Axis::Longitude, "W") => Some(HemisphereRef::West),
            _ => None,
        };
        parsed.ok_or_else(|| GpsError::InvalidHemisphereRef {
            axis,
            value: raw.to_string(),
        })
    }

    /// Returns the positive reference of an axis (`N` or `E`).
    #[must_use]
    pub fn positive(axis: Axis) -> Self {
        match axis {
            Axis::Latitude => HemisphereRef::North,
            Axis::Longitude => HemisphereRef::East,
        }
    }

    /// Returns `-1.0` for the southern and western hemispheres, `1.0` otherwise.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            HemisphereRef::South | HemisphereRef::West => -1.0,
            HemisphereRef::North | HemisphereRef::East => 1.0,
        }
    }

    /// Returns the single-character tag value.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            HemisphereRef::North => 'N',
            HemisphereRef::South => 'S',
            HemisphereRef::East => 'E',
            HemisphereRef::West => 'W',
        }
    }
}

impl fmt::Display for HemisphereRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =============================================================================
// SexagesimalAngle
// =============================================================================

/// Unsigned angle as degrees, minutes and seconds.
///
/// The hemisphere is never part of this value; it travels separately as a
/// [`HemisphereRef`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SexagesimalAngle {
    degrees: u32,
    minutes: u32,
    seconds: f64,
}

impl SexagesimalAngle {
    #[must_use]
    pub fn new(degrees: u32, minutes: u32, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    #[must_use]
    pub fn degrees(&self) -> u32 {
        self.degrees
    }

    #[must_use]
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

impl fmt::Display for SexagesimalAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° {}' {:.4}\"", self.degrees, self.minutes, self.seconds)
    }
}

// =============================================================================
// DecimalCoordinate
// =============================================================================

/// Zoom level used by [`DecimalCoordinate::map_url`] when none is given.
pub const DEFAULT_MAP_ZOOM: u8 = 15;

/// GPS coordinates in signed decimal degrees.
///
/// Negative latitude is South, negative longitude is West.
///
/// # Example
///
/// ```ignore
/// let coords = DecimalCoordinate::try_new(37.287088, 22.354472)?;
/// assert_eq!(coords.to_string(), "37.28709N 22.35447E");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalCoordinate {
    /// Latitude in decimal degrees (-90.0 to 90.0)
    latitude: f64,
    /// Longitude in decimal degrees (-180.0 to 180.0)
    longitude: f64,
}

impl DecimalCoordinate {
    /// Creates new coordinates, clamping out-of-range values:
    /// - Latitude: -90.0 to 90.0
    /// - Longitude: -180.0 to 180.0
    ///
    /// Non-finite values become 0.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: finite_or_zero(latitude).clamp(-90.0, 90.0),
            longitude: finite_or_zero(longitude).clamp(-180.0, 180.0),
        }
    }

    /// Creates new coordinates, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, GpsError> {
        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if in_range {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(GpsError::OutOfRange {
                latitude,
                longitude,
            })
        }
    }

    /// Builds coordinates from unsigned magnitudes and their references.
    pub fn from_magnitudes(
        latitude: f64,
        latitude_ref: HemisphereRef,
        longitude: f64,
        longitude_ref: HemisphereRef,
    ) -> Result<Self, GpsError> {
        Self::try_new(
            latitude.abs() * latitude_ref.sign(),
            longitude.abs() * longitude_ref.sign(),
        )
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn latitude_ref(&self) -> HemisphereRef {
        HemisphereRef::for_latitude(self.latitude)
    }

    #[must_use]
    pub fn longitude_ref(&self) -> HemisphereRef {
        HemisphereRef::for_longitude(self.longitude)
    }

    /// Generates a map URL centred on these coordinates.
    ///
    /// The URL uses the `maps/@lat,lon,zoomz` form that
    /// [`coordinates_from_map_url`](crate::media::map_url::coordinates_from_map_url)
    /// reads back.
    #[must_use]
    pub fn map_url(&self, zoom: u8) -> String {
        format!(
            "https://www.google.com/maps/@{},{},{}z",
            self.latitude, self.longitude, zoom
        )
    }
}

impl Default for DecimalCoordinate {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

/// Display format: `"37.28709N 22.35447E"`.
impl fmt::Display for DecimalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.5}{} {:.5}{}",
            self.latitude.abs(),
            self.latitude_ref(),
            self.longitude.abs(),
            self.longitude_ref()
        )
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// =============================================================================
// Tests
// =============================================================================
