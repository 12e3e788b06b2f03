// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **GPS**: Rational encoding precision
//! - **Library**: Photo extensions and position cache size
//! - **Preview**: Preview box dimensions

pub use crate::domain::metadata::DEFAULT_MAX_DENOMINATOR;
pub use crate::media::position_cache::{
    DEFAULT_POSITION_CACHE_CAPACITY, MAX_POSITION_CACHE_CAPACITY, MIN_POSITION_CACHE_CAPACITY,
};

// ==========================================================================
// GPS Defaults
// ==========================================================================

/// Smallest accepted bound on rational denominators.
pub const MIN_MAX_DENOMINATOR: u32 = 100;

// ==========================================================================
// Library Defaults
// ==========================================================================

/// File extensions scanned for photos (matched ignoring case).
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

// ==========================================================================
// Preview Defaults
// ==========================================================================

/// Default preview width in pixels.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 120;

/// Default preview height in pixels.
pub const DEFAULT_PREVIEW_HEIGHT: u32 = 67;

/// Maximum preview edge in pixels.
pub const MAX_PREVIEW_EDGE: u32 = 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_defaults_fit_bounds() {
        assert!(DEFAULT_PREVIEW_WIDTH <= MAX_PREVIEW_EDGE);
        assert!(DEFAULT_PREVIEW_HEIGHT <= MAX_PREVIEW_EDGE);
    }

    #[test]
    fn denominator_default_fits_bounds() {
        assert!(DEFAULT_MAX_DENOMINATOR >= MIN_MAX_DENOMINATOR);
    }

    #[test]
    fn cache_default_fits_bounds() {
        assert!(DEFAULT_POSITION_CACHE_CAPACITY >= MIN_POSITION_CACHE_CAPACITY);
        assert!(DEFAULT_POSITION_CACHE_CAPACITY <= MAX_POSITION_CACHE_CAPACITY);
    }
}
