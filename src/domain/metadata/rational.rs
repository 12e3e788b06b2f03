// SPDX-License-Identifier: MPL-2.0
//! EXIF rational encoding of GPS angles.
//!
//! EXIF stores each GPS magnitude as three unsigned rationals (degrees,
//! minutes, seconds). The textual wire form used at the metadata boundary is
//! three space-separated `numerator/denominator` tokens, e.g.
//! `"37/1 17/1 135197/10000"`.

use crate::domain::error::GpsError;
use std::fmt;
use std::str::FromStr;

/// Largest denominator tried when approximating a real value.
pub const DEFAULT_MAX_DENOMINATOR: u32 = 1_000_000;

// =============================================================================
// ExifRational
// =============================================================================

/// Unsigned EXIF rational (`RATIONAL` tag type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExifRational {
    numerator: u32,
    denominator: u32,
}

impl ExifRational {
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Best rational approximation of `value` with a bounded denominator.
    ///
    /// Walks the continued fraction expansion of `value` and stops at the
    /// first convergent that equals it within floating-point precision, or at
    /// the last one whose denominator fits `max_denominator`. In the latter
    /// case the closest semiconvergent is also considered. Negative and
    /// non-finite inputs give `0/1`.
    #[must_use]
    pub fn approximate(value: f64, max_denominator: u32) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::new(0, 1);
        }

        let max_den = u64::from(max_denominator.max(1));
        let tolerance = value * f64::EPSILON;
        let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
        let mut x = value;
        let mut bounded = false;

        loop {
            let a = x.floor();
            // Compare in floating point first: `a` is unbounded once the
            // remainder gets tiny.
            if q0 as f64 + a * q1 as f64 > max_den as f64 {
                bounded = true;
                break;
            }
            let a = a as u64;
            let (p2, q2) = (
                p0.saturating_add(a.saturating_mul(p1)),
                q0.saturating_add(a.saturating_mul(q1)),
            );
            (p0, q0, p1, q1) = (p1, q1, p2, q2);

            let remainder = x - a as f64;
            if remainder <= 0.0 || (p1 as f64 / q1 as f64 - value).abs() <= tolerance {
                break;
            }
            x = 1.0 / remainder;
        }

        // The first partial quotient always fits since its denominator is 1.
        let (mut p, mut q) = (p1, q1.max(1));
        if bounded {
            let k = (max_den - q0) / q;
            let (sp, sq) = (
                p0.saturating_add(k.saturating_mul(p1)),
                q0.saturating_add(k * q1),
            );
            let semi_err = (sp as f64 / sq as f64 - value).abs();
            let conv_err = (p as f64 / q as f64 - value).abs();
            if semi_err < conv_err {
                (p, q) = (sp, sq);
            }
        }

        Self::new(
            u32::try_from(p).unwrap_or(u32::MAX),
            u32::try_from(q).unwrap_or(u32::MAX),
        )
    }

    #[must_use]
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    #[must_use]
    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Returns the real value, reading a zero denominator as 1.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let denominator = if self.denominator == 0 {
            1
        } else {
            self.denominator
        };
        f64::from(self.numerator) / f64::from(denominator)
    }
}

impl fmt::Display for ExifRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for ExifRational {
    type Err = GpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GpsError::MalformedRational(s.to_string());
        let (numerator, denominator) = s.split_once('/').ok_or_else(malformed)?;
        let numerator = numerator.trim().parse::<u32>().map_err(|_| malformed())?;
        let denominator = denominator.trim().parse::<u32>().map_err(|_| malformed())?;
        Ok(Self::new(numerator, denominator))
    }
}

// =============================================================================
// RationalSexagesimal
// =============================================================================

/// Degrees, minutes and seconds as three EXIF rationals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RationalSexagesimal {
    components: [ExifRational; 3],
}

impl RationalSexagesimal {
    #[must_use]
    pub const fn new(degrees: ExifRational, minutes: ExifRational, seconds: ExifRational) -> Self {
        Self {
            components: [degrees, minutes, seconds],
        }
    }

    #[must_use]
    pub fn degrees(&self) -> ExifRational {
        self.components[0]
    }

    #[must_use]
    pub fn minutes(&self) -> ExifRational {
        self.components[1]
    }

    #[must_use]
    pub fn seconds(&self) -> ExifRational {
        self.components[2]
    }

    #[must_use]
    pub fn components(&self) -> &[ExifRational; 3] {
        &self.components
    }
}

impl fmt::Display for RationalSexagesimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [degrees, minutes, seconds] = &self.components;
        write!(f, "{degrees} {minutes} {seconds}")
    }
}

/// Parses the `"n/d n/d n/d"` wire form. Anything other than exactly three
/// tokens is rejected, so a partial value is never produced.
impl FromStr for RationalSexagesimal {
    type Err = GpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [degrees, minutes, seconds] = tokens.as_slice() else {
            return Err(GpsError::MalformedRational(s.to_string()));
        };
        Ok(Self::new(
            degrees.parse()?,
            minutes.parse()?,
            seconds.parse()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximate_integers_use_unit_denominator() {
        assert_eq!(
            ExifRational::approximate(37.0, DEFAULT_MAX_DENOMINATOR),
            ExifRational::new(37, 1)
        );
        assert_eq!(
            ExifRational::approximate(0.0, DEFAULT_MAX_DENOMINATOR),
            ExifRational::new(0, 1)
        );
    }

    #[test]
    fn approximate_four_decimal_seconds_is_exact() {
        assert_eq!(
            ExifRational::approximate(13.5197, DEFAULT_MAX_DENOMINATOR),
            ExifRational::new(135_197, 10_000)
        );
        assert_eq!(
            ExifRational::approximate(23.76, DEFAULT_MAX_DENOMINATOR),
            ExifRational::new(594, 25)
        );
        assert_eq!(
            ExifRational::approximate(0.5, DEFAULT_MAX_DENOMINATOR),
            ExifRational::new(1, 2)
        );
    }

    #[test]
    fn approximate_respects_denominator_bound() {
        let pi = ExifRational::approximate(std::f64::consts::PI, 1000);
        assert_eq!(pi, ExifRational::new(355, 113));

        let third = ExifRational::approximate(1.0 / 3.0, 10);
        assert_eq!(third, ExifRational::new(1, 3));

        let bounded = ExifRational::approximate(std::f64::consts::E, 10);
        assert!(bounded.denominator() <= 10);
        assert_eq!(bounded, ExifRational::new(19, 7));
    }

    #[test]
    fn approximate_rejects_negative_and_nan() {
        assert_eq!(ExifRational::approximate(-1.5, 100), ExifRational::new(0, 1));
        assert_eq!(
            ExifRational::approximate(f64::NAN, 100),
            ExifRational::new(0, 1)
        );
    }

    #[test]
    fn to_f64_substitutes_zero_denominator() {
        assert!((ExifRational::new(10, 0).to_f64() - 10.0).abs() < f64::EPSILON);
        assert!((ExifRational::new(1, 4).to_f64() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_single_rational() {
        assert_eq!("135197/10000".parse(), Ok(ExifRational::new(135_197, 10_000)));
        assert!("12".parse::<ExifRational>().is_err());
        assert!("a/1".parse::<ExifRational>().is_err());
        assert!("-1/2".parse::<ExifRational>().is_err());
    }

    #[test]
    fn parse_requires_exactly_three_tokens() {
        assert!("10/1 30/1".parse::<RationalSexagesimal>().is_err());
        assert!("10/1 30/1 0/1 5/1".parse::<RationalSexagesimal>().is_err());
        assert!("".parse::<RationalSexagesimal>().is_err());

        let parsed: RationalSexagesimal = "37/1 17/1 135197/10000".parse().unwrap();
        assert_eq!(parsed.degrees(), ExifRational::new(37, 1));
        assert_eq!(parsed.seconds(), ExifRational::new(135_197, 10_000));
    }

    #[test]
    fn display_uses_wire_format() {
        let value = RationalSexagesimal::new(
            ExifRational::new(37, 1),
            ExifRational::new(17, 1),
            ExifRational::new(135_197, 10_000),
        );
        assert_eq!(value.to_string(), "37/1 17/1 135197/10000");
    }
}
