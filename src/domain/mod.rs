// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`GpsError`](error::GpsError))
//! - [`metadata`]: GPS position types ([`DecimalCoordinate`](metadata::DecimalCoordinate),
//!   [`SexagesimalAngle`](metadata::SexagesimalAngle), [`HemisphereRef`](metadata::HemisphereRef),
//!   [`RationalSexagesimal`](metadata::RationalSexagesimal))

pub mod error;
pub mod metadata;
