// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`metadata`]: GPS tag reading and writing (EXIF)
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` for thread-safe usage
//! - Methods return `Result` with port error types
//! - Adapters never panic on malformed files

pub mod metadata;

// Re-export main types for convenience
pub use metadata::{GpsTagReader, GpsTagWriter, GpsTags, MetadataError};
