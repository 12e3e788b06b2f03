// SPDX-License-Identifier: MPL-2.0
//! Command-line parsing.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;

pub const HELP: &str = "\
geotagger - read and write GPS positions in JPEG files

USAGE:
  geotagger [OPTIONS] show <FILE>...
  geotagger [OPTIONS] set --lat <LAT> --lon <LON> <FILE>...
  geotagger [OPTIONS] set --url <MAP_URL> <FILE>...
  geotagger [OPTIONS] scan [--previews <OUT_DIR>] <DIR>
  geotagger [OPTIONS] url <MAP_URL>

OPTIONS:
  --config-dir <DIR>  Read settings.toml from DIR
  --lenient           Accept invalid hemisphere references when reading
  -v, --verbose       Log debug messages
  -h, --help          Print this help
";

/// Where the position for `set` comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionSource {
    Coordinates { latitude: f64, longitude: f64 },
    MapUrl(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the position of each file.
    Show { files: Vec<PathBuf> },
    /// Write one position into every file.
    Set {
        source: PositionSource,
        files: Vec<PathBuf>,
    },
    /// List the photos of a directory, optionally writing previews.
    Scan {
        directory: PathBuf,
        previews: Option<PathBuf>,
    },
    /// Print the position encoded in a map URL.
    Url { url: String },
    Help,
}

/// Runtime flags parsed from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `GEOTAGGER_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Forces lenient validation regardless of settings.
    pub lenient: bool,
    pub verbose: bool,
    pub command: Command,
}

impl Flags {
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let help = args.contains(["-h", "--help"]);
        let config_dir = args.opt_value_from_str("--config-dir")?;
        let lenient = args.contains("--lenient");
        let verbose = args.contains(["-v", "--verbose"]);

        let command = if help {
            Command::Help
        } else {
            match args.subcommand()?.as_deref() {
                Some("show") => Command::Show {
                    files: non_empty(free_paths(args)?, "show needs at least one file")?,
                },
                Some("set") => parse_set(args)?,
                Some("scan") => {
                    let previews = args.opt_value_from_str("--previews")?;
                    let mut rest = free_paths(args)?;
                    if rest.len() != 1 {
                        return Err(Error::Usage("scan needs exactly one directory".into()));
                    }
                    Command::Scan {
                        directory: rest.remove(0),
                        previews,
                    }
                }
                Some("url") => {
                    let url: String = args.free_from_str()?;
                    reject_leftovers(args)?;
                    Command::Url { url }
                }
                Some("help") | None => Command::Help,
                Some(other) => return Err(Error::Usage(format!("unknown command '{other}'"))),
            }
        };

        Ok(Self {
            config_dir,
            lenient,
            verbose,
            command,
        })
    }
}

fn parse_set(mut args: pico_args::Arguments) -> Result<Command> {
    let latitude: Option<f64> = args.opt_value_from_str("--lat")?;
    let longitude: Option<f64> = args.opt_value_from_str("--lon")?;
    let url: Option<String> = args.opt_value_from_str("--url")?;

    let source = match (latitude, longitude, url) {
        (Some(latitude), Some(longitude), None) => PositionSource::Coordinates {
            latitude,
            longitude,
        },
        (None, None, Some(url)) => PositionSource::MapUrl(url),
        _ => {
            return Err(Error::Usage(
                "set needs either --lat and --lon, or --url".into(),
            ))
        }
    };
    let files = non_empty(free_paths(args)?, "set needs at least one file")?;
    Ok(Command::Set { source, files })
}

fn free_paths(args: pico_args::Arguments) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for arg in args.finish() {
        if arg.to_str().is_some_and(|a| a.starts_with("--")) {
            return Err(Error::Usage(format!(
                "unexpected option '{}'",
                arg.to_string_lossy()
            )));
        }
        paths.push(PathBuf::from(arg));
    }
    Ok(paths)
}

fn reject_leftovers(args: pico_args::Arguments) -> Result<()> {
    let rest = args.finish();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::Usage(format!("unexpected arguments: {rest:?}")))
    }
}

fn non_empty(paths: Vec<PathBuf>, message: &str) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        Err(Error::Usage(message.to_string()))
    } else {
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Flags> {
        Flags::from_vec(args.iter().map(OsString::from).collect())
    }

    #[test]
    fn show_collects_files() {
        let flags = parse(&["show", "a.jpg", "b.jpg"]).unwrap();
        assert_eq!(
            flags.command,
            Command::Show {
                files: vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]
            }
        );
        assert!(!flags.lenient);
    }

    #[test]
    fn global_options_anywhere() {
        let flags = parse(&["show", "a.jpg", "--lenient", "--config-dir", "/tmp/cfg"]).unwrap();
        assert!(flags.lenient);
        assert_eq!(flags.config_dir.as_deref(), Some("/tmp/cfg"));
    }

    #[test]
    fn set_with_coordinates() {
        let flags = parse(&["set", "--lat", "-10.5", "--lon", "5", "a.jpg"]).unwrap();
        assert_eq!(
            flags.command,
            Command::Set {
                source: PositionSource::Coordinates {
                    latitude: -10.5,
                    longitude: 5.0
                },
                files: vec![PathBuf::from("a.jpg")]
            }
        );
    }

    #[test]
    fn set_with_url() {
        let flags = parse(&[
            "set",
            "--url",
            "https://www.google.nl/maps/@37.2870888,22.3544721,4z",
            "a.jpg",
        ])
        .unwrap();
        assert!(matches!(
            flags.command,
            Command::Set {
                source: PositionSource::MapUrl(_),
                ..
            }
        ));
    }

    #[test]
    fn set_needs_a_source() {
        assert!(matches!(parse(&["set", "a.jpg"]), Err(Error::Usage(_))));
        assert!(matches!(
            parse(&["set", "--lat", "1", "a.jpg"]),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn set_needs_files() {
        assert!(matches!(
            parse(&["set", "--lat", "1", "--lon", "2"]),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn bad_number_is_usage_error() {
        assert!(matches!(
            parse(&["set", "--lat", "north", "--lon", "2", "a.jpg"]),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn scan_with_previews() {
        let flags = parse(&["scan", "--previews", "out", "photos"]).unwrap();
        assert_eq!(
            flags.command,
            Command::Scan {
                directory: PathBuf::from("photos"),
                previews: Some(PathBuf::from("out"))
            }
        );
    }

    #[test]
    fn scan_needs_one_directory() {
        assert!(matches!(parse(&["scan"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["scan", "a", "b"]), Err(Error::Usage(_))));
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(matches!(
            parse(&["show", "--bogus", "a.jpg"]),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(matches!(parse(&["frobnicate"]), Err(Error::Usage(_))));
    }

    #[test]
    fn no_command_is_help() {
        assert_eq!(parse(&[]).unwrap().command, Command::Help);
        assert_eq!(parse(&["url", "--help"]).unwrap().command, Command::Help);
    }
}
