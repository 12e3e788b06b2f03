// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! This module provides pure domain types for GPS positions as they are
//! shown to the user and as they are stored in EXIF tags:
//! - [`DecimalCoordinate`]: signed latitude/longitude in decimal degrees
//! - [`SexagesimalAngle`]: degrees/minutes/seconds magnitude
//! - [`HemisphereRef`]: the N/S/E/W tag stored next to each magnitude
//! - [`ExifRational`] and [`RationalSexagesimal`]: the on-file rational encoding

mod rational;
mod types;

pub use rational::{ExifRational, RationalSexagesimal, DEFAULT_MAX_DENOMINATOR};
pub use types::{Axis, DecimalCoordinate, HemisphereRef, SexagesimalAngle, DEFAULT_MAP_ZOOM};
