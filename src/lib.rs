// SPDX-License-Identifier: MPL-2.0
//! `geotagger` reads and writes the GPS position stored in the EXIF block of
//! JPEG photos.
//!
//! Positions move between three forms: signed decimal degrees, degrees /
//! minutes / seconds, and the EXIF rational triple `"d/1 m/1 s/den"` with a
//! hemisphere reference. [`media::gps_codec`] converts between them,
//! [`media::position`] applies the conversion to files, and [`library`]
//! manages the photos of one directory with a position cache.

#![doc(html_root_url = "https://docs.rs/geotagger/0.3.0")]

pub mod app;
pub mod application;
pub mod directory_scanner;
pub mod domain;
pub mod error;
pub mod library;
pub mod media;
