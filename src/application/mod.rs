// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer (the CLI) uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use geotagger::application::port::GpsTagReader;
//!
//! // Infrastructure implements the port trait
//! struct ExifGpsReader;
//! impl GpsTagReader for ExifGpsReader { /* ... */ }
//! ```

pub mod port;
