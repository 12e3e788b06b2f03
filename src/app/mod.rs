// SPDX-License-Identifier: MPL-2.0
//! Command execution for the `geotagger` binary.
//!
//! [`App`] owns the loaded settings and turns each [`Command`] into library
//! calls, printing user-facing results to the given writer. Diagnostics go
//! through `tracing` instead.

pub mod cli;
pub mod config;
pub mod logging;
pub mod paths;

pub use cli::{Command, Flags, PositionSource};

use crate::domain::metadata::{DecimalCoordinate, DEFAULT_MAP_ZOOM};
use crate::error::{Error, Result};
use crate::library::PhotoLibrary;
use crate::media::gps_codec::{CoordinateCodec, ValidationMode};
use crate::media::map_url::coordinates_from_map_url;
use crate::media::preview::{PreviewEvent, PreviewLoader};
use config::Config;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// How a command ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Success,
    /// Some files could not be processed.
    PartialFailure,
}

pub struct App {
    config: Config,
    codec: CoordinateCodec,
}

impl App {
    /// Builds an app from settings; `lenient` forces lenient validation.
    #[must_use]
    pub fn new(config: Config, lenient: bool) -> Self {
        let mut codec = config.codec();
        if lenient {
            codec = CoordinateCodec::new(ValidationMode::Lenient, config.max_denominator());
        }
        Self { config, codec }
    }

    /// Loads settings from the resolved config directory.
    pub fn from_flags(flags: &Flags) -> Self {
        paths::init_cli_override(flags.config_dir.clone());
        let (config, warning) = config::load();
        if let Some(warning) = warning {
            tracing::warn!("{warning}");
        }
        Self::new(config, flags.lenient)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn library(&self) -> PhotoLibrary {
        PhotoLibrary::with_exif(
            self.codec,
            self.config.extensions(),
            self.config.position_cache_capacity(),
        )
    }

    /// Runs `command`, writing its report to `out`.
    pub fn run(&self, command: &Command, out: &mut dyn Write) -> Result<Completion> {
        match command {
            Command::Show { files } => self.show(files, out),
            Command::Set { source, files } => {
                let position = resolve_source(source)?;
                self.set(position, files, out)
            }
            Command::Scan {
                directory,
                previews,
            } => self.scan(directory, previews.as_deref(), out),
            Command::Url { url } => self.url(url, out),
            Command::Help => {
                write!(out, "{}", cli::HELP)?;
                Ok(Completion::Success)
            }
        }
    }

    fn show(&self, files: &[PathBuf], out: &mut dyn Write) -> Result<Completion> {
        let mut library = self.library();
        let mut completion = Completion::Success;

        for (directory, names) in group_by_directory(files) {
            if let Err(e) = library.reload(&directory) {
                tracing::warn!("{e}");
                completion = Completion::PartialFailure;
                continue;
            }
            writeln!(out, "{}", library.describe_selection(&names))?;
        }
        Ok(completion)
    }

    fn set(
        &self,
        position: DecimalCoordinate,
        files: &[PathBuf],
        out: &mut dyn Write,
    ) -> Result<Completion> {
        let mut library = self.library();
        let mut completion = Completion::Success;
        writeln!(out, "Position: {position}")?;

        for (directory, names) in group_by_directory(files) {
            if let Err(e) = library.reload(&directory) {
                tracing::warn!("{e}");
                completion = Completion::PartialFailure;
                continue;
            }
            for outcome in library.set_positions(Some(position), &names) {
                if !outcome.is_success() {
                    completion = Completion::PartialFailure;
                }
                writeln!(out, "{outcome}")?;
            }
        }
        Ok(completion)
    }

    fn scan(
        &self,
        directory: &Path,
        previews: Option<&Path>,
        out: &mut dyn Write,
    ) -> Result<Completion> {
        let mut library = self.library();
        library.reload(directory)?;

        for entry in library.entries() {
            let position = if entry.has_position {
                library
                    .position(&entry.path)
                    .map_or_else(|| "-".to_string(), |p| p.to_string())
            } else {
                "-".to_string()
            };
            let flag = if entry.has_position { 'Y' } else { 'N' };
            writeln!(out, "{flag} {} {position}", entry.file_name)?;
        }

        match previews {
            Some(target) => self.write_previews(library.paths().to_vec(), target, out),
            None => Ok(Completion::Success),
        }
    }

    fn write_previews(
        &self,
        paths: Vec<PathBuf>,
        target: &Path,
        out: &mut dyn Write,
    ) -> Result<Completion> {
        fs::create_dir_all(target)?;
        let mut completion = Completion::Success;

        let loader = PreviewLoader::spawn(paths, self.config.preview_size());
        for event in loader.join() {
            match event {
                PreviewEvent::Loaded { path, image, .. } => {
                    let stem = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let destination = target.join(format!("{stem}.png"));
                    image.save(&destination)?;
                    writeln!(out, "Preview {}", destination.display())?;
                }
                PreviewEvent::Failed { .. } => completion = Completion::PartialFailure,
                PreviewEvent::Finished => {}
            }
        }
        Ok(completion)
    }

    fn url(&self, url: &str, out: &mut dyn Write) -> Result<Completion> {
        let position = coordinates_from_map_url(url)
            .ok_or_else(|| Error::Usage(format!("no map position in '{url}'")))?;
        let tags = self.codec.encode(&position);

        writeln!(out, "Position: {position}")?;
        writeln!(out, "GPSLatitude: {} {}", tags.latitude, tags.latitude_ref)?;
        writeln!(out, "GPSLongitude: {} {}", tags.longitude, tags.longitude_ref)?;
        writeln!(out, "Map: {}", position.map_url(DEFAULT_MAP_ZOOM))?;
        Ok(Completion::Success)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("codec", &self.codec)
            .finish()
    }
}

fn resolve_source(source: &PositionSource) -> Result<DecimalCoordinate> {
    match source {
        PositionSource::Coordinates {
            latitude,
            longitude,
        } => DecimalCoordinate::try_new(*latitude, *longitude)
            .map_err(|e| Error::Usage(e.to_string())),
        PositionSource::MapUrl(url) => coordinates_from_map_url(url)
            .ok_or_else(|| Error::Usage(format!("no map position in '{url}'"))),
    }
}

/// Splits file arguments into (directory, file names), keeping the order in
/// which directories first appear.
fn group_by_directory(files: &[PathBuf]) -> Vec<(PathBuf, Vec<String>)> {
    let mut groups: Vec<(PathBuf, Vec<String>)> = Vec::new();
    for file in files {
        let directory = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match groups.iter_mut().find(|(dir, _)| *dir == directory) {
            Some((_, names)) => names.push(name),
            None => groups.push((directory, vec![name])),
        }
    }
    groups
}
