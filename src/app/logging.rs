// SPDX-License-Identifier: MPL-2.0
//! Diagnostic logging setup.
//!
//! Library code logs through `tracing` macros; the binary installs one
//! subscriber writing to stderr. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "geotagger=info";

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "geotagger=debug";

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber already set by the embedding program wins.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
