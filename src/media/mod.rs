// SPDX-License-Identifier: MPL-2.0
//! Photo file handling.
//!
//! This module holds the adapters that touch image files: GPS tag reading
//! and writing, the coordinate codec that sits between tags and positions,
//! and preview generation.

pub mod gps_codec;
pub mod map_url;
pub mod metadata;
pub mod metadata_writer;
pub mod position;
pub mod position_cache;
pub mod preview;

// Re-export commonly used types
pub use gps_codec::{CoordinateCodec, ValidationMode};
pub use map_url::coordinates_from_map_url;
pub use metadata::ExifGpsReader;
pub use metadata_writer::ExifGpsWriter;
pub use position::{read_position, write_position};
pub use position_cache::PositionCache;
pub use preview::{generate_preview, PreviewEvent, PreviewLoader, PreviewSize};
