use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;
use thiserror::Error;

use crate::model::seismic::{SeismicEvent, SeismicReport};

const QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed lookup radius around the analyzed site.
pub const SEARCH_RADIUS_KM: f64 = 100.0;

#[derive(Debug, Error)]
pub enum SeismicFetchError {
    #[error("earthquake catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("earthquake catalog response was not understood: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: FeatureGeometry,
}

#[derive(Deserialize)]
struct FeatureProperties {
    place: Option<String>,
    mag: Option<f64>,
    /// Epoch milliseconds.
    time: i64,
}

#[derive(Deserialize)]
struct FeatureGeometry {
    /// GeoJSON order: [longitude, latitude, depth].
    coordinates: Vec<f64>,
}

/// Fetch recent events within [`SEARCH_RADIUS_KM`] of the coordinates,
/// newest first (the catalog's `orderby=time`).
pub fn fetch_nearby_quakes(
    latitude: f64,
    longitude: f64,
) -> Result<SeismicReport, SeismicFetchError> {
    let url = format!(
        "{}?format=geojson&latitude={}&longitude={}&maxradiuskm={}&orderby=time",
        QUERY_URL, latitude, longitude, SEARCH_RADIUS_KM
    );

    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let body = client.get(&url).send()?.error_for_status()?.text()?;

    parse_query_response(&body)
}

fn parse_query_response(body: &str) -> Result<SeismicReport, SeismicFetchError> {
    let collection: FeatureCollection =
        serde_json::from_str(body).map_err(|e| SeismicFetchError::Malformed(e.to_string()))?;

    let mut events = Vec::with_capacity(collection.features.len());

    for feature in collection.features {
        let coords = &feature.geometry.coordinates;
        if coords.len() < 2 {
            return Err(SeismicFetchError::Malformed(format!(
                "feature geometry has {} coordinates, expected at least 2",
                coords.len()
            )));
        }

        let occurred_at = DateTime::from_timestamp_millis(feature.properties.time)
            .ok_or_else(|| {
                SeismicFetchError::Malformed(format!(
                    "event time {} ms is out of range",
                    feature.properties.time
                ))
            })?;

        events.push(SeismicEvent {
            place: feature.properties.place.unwrap_or_default(),
            magnitude: feature.properties.mag.unwrap_or(f64::NAN),
            occurred_at,
            // GeoJSON stores [lon, lat]; the record stores them by name.
            latitude: coords[1],
            longitude: coords[0],
        });
    }

    Ok(SeismicReport::new(events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const TWO_FEATURES: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"generated": 1709294400000, "count": 2},
        "features": [
            {
                "type": "Feature",
                "properties": {"mag": 2.43, "place": "6 km NW of The Geysers, CA", "time": 1709294400000, "status": "reviewed"},
                "geometry": {"type": "Point", "coordinates": [-122.8164, 38.8091, 2.18]}
            },
            {
                "type": "Feature",
                "properties": {"mag": 1.1, "place": "3 km S of Gilroy, CA", "time": 1709208000000},
                "geometry": {"type": "Point", "coordinates": [-121.5683, 36.9788, 5.0]}
            }
        ]
    }"#;

    #[test]
    fn one_record_per_feature() {
        let report = parse_query_response(TWO_FEATURES).unwrap();
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn coordinates_are_swapped_into_named_fields() {
        let report = parse_query_response(TWO_FEATURES).unwrap();
        let first = &report.events()[0];
        assert_eq!(first.latitude, 38.8091);
        assert_eq!(first.longitude, -122.8164);
    }

    #[test]
    fn epoch_millis_become_calendar_time() {
        let report = parse_query_response(TWO_FEATURES).unwrap();
        let first = &report.events()[0];
        assert_eq!(
            first.occurred_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn source_order_is_preserved() {
        let report = parse_query_response(TWO_FEATURES).unwrap();
        assert_eq!(report.events()[0].place, "6 km NW of The Geysers, CA");
        assert_eq!(report.events()[1].place, "3 km S of Gilroy, CA");
    }

    #[test]
    fn null_place_and_magnitude_keep_their_slot() {
        let body = r#"{"features": [
            {"properties": {"mag": null, "place": null, "time": 0},
             "geometry": {"coordinates": [10.0, 20.0, 1.0]}}
        ]}"#;
        let report = parse_query_response(body).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.events()[0].place, "");
        assert!(report.events()[0].magnitude.is_nan());
    }

    #[test]
    fn empty_collection_is_an_empty_report() {
        let report = parse_query_response(r#"{"features": []}"#).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn garbage_body_is_malformed() {
        let err = parse_query_response("service unavailable").unwrap_err();
        assert!(matches!(err, SeismicFetchError::Malformed(_)));
    }

    #[test]
    fn short_coordinate_array_is_malformed() {
        let body = r#"{"features": [
            {"properties": {"mag": 1.0, "place": "x", "time": 0},
             "geometry": {"coordinates": [10.0]}}
        ]}"#;
        let err = parse_query_response(body).unwrap_err();
        assert!(matches!(err, SeismicFetchError::Malformed(_)));
    }
}
