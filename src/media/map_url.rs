// SPDX-License-Identifier: MPL-2.0
//! Extraction of map coordinates from a web map URL.
//!
//! Web maps encode the view centre in the path, e.g.
//! `https://www.google.nl/maps/@37.2870888,22.3544721,4z`. The centre is
//! what the user sees under the crosshair, so it is the position to tag.

use crate::domain::metadata::DecimalCoordinate;

const CENTRE_MARKER: &str = "maps/@";

/// Returns the map centre encoded in `url`.
///
/// Returns `None` if the `maps/@` marker is absent, the latitude and
/// longitude are not both followed by a comma, either number does not parse,
/// or the pair is out of range.
pub fn coordinates_from_map_url(url: &str) -> Option<DecimalCoordinate> {
    let parsed = url
        .find(CENTRE_MARKER)
        .map(|start| &url[start + CENTRE_MARKER.len()..])
        .and_then(|rest| rest.split_once(','))
        .and_then(|(lat, rest)| rest.split_once(',').map(|(lon, _zoom)| (lat, lon)))
        .and_then(|(lat, lon)| {
            let lat = lat.trim().parse::<f64>().ok()?;
            let lon = lon.trim().parse::<f64>().ok()?;
            DecimalCoordinate::try_new(lat, lon).ok()
        });

    if parsed.is_none() {
        tracing::warn!("Can't extract coordinates from this url: {url}");
    }
    parsed
}
