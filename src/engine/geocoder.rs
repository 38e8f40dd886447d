use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::model::location::Location;

const SEARCH_URL: &str = "https://geocode.maps.co/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("geocoding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("geocoding response was not understood: {0}")]
    Malformed(String),

    #[error("no match found for \"{0}\"")]
    NoMatch(String),
}

/// The provider returns coordinates as JSON strings, but numbers have
/// been observed from compatible endpoints. Accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn to_f64(&self) -> Option<f64> {
        match self {
            Coordinate::Number(n) => Some(*n),
            Coordinate::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
struct SearchHit {
    lat: Coordinate,
    lon: Coordinate,
    #[serde(default)]
    display_name: String,
}

/// Resolve a free-text address to a location.
///
/// One outbound call, first match wins, no retries. Every failure mode
/// (transport, empty result set, undecodable body) is fatal to the
/// current analysis attempt.
pub fn geocode_address(address: &str) -> Result<Location, GeocodingError> {
    let url = format!("{}?q={}", SEARCH_URL, urlencoding::encode(address));

    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let body = client.get(&url).send()?.error_for_status()?.text()?;

    parse_search_response(address, &body)
}

fn parse_search_response(address: &str, body: &str) -> Result<Location, GeocodingError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| GeocodingError::Malformed(e.to_string()))?;

    let Some(hit) = hits.into_iter().next() else {
        return Err(GeocodingError::NoMatch(address.to_string()));
    };

    let latitude = hit
        .lat
        .to_f64()
        .ok_or_else(|| GeocodingError::Malformed("unparseable latitude".to_string()))?;
    let longitude = hit
        .lon
        .to_f64()
        .ok_or_else(|| GeocodingError::Malformed("unparseable longitude".to_string()))?;

    Ok(Location {
        latitude,
        longitude,
        display_name: hit.display_name,
    })
}
