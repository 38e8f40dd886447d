use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDateTime;

use crate::model::seismic::{SeismicEvent, SeismicReport};

pub const CSV_FILE_NAME: &str = "seismic_report.csv";

const HEADER: [&str; 5] = ["place", "magnitude", "time", "lat", "lon"];
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serialize a report to UTF-8 CSV with a header row.
pub fn report_to_csv(report: &SeismicReport) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(HEADER)?;

    for event in report.events() {
        writer.write_record([
            event.place.clone(),
            event.magnitude.to_string(),
            event.occurred_at.format(TIME_FORMAT).to_string(),
            event.latitude.to_string(),
            event.longitude.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV writer: {}", e))
}

/// Reparse an exported report. Counterpart of [`report_to_csv`]; used
/// to verify the export stays faithful to the in-memory data.
pub fn parse_report_csv(bytes: &[u8]) -> Result<SeismicReport> {
    let mut reader = csv::ReaderBuilder::new().from_reader(bytes);

    let mut events = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != HEADER.len() {
            bail!("expected {} columns, got {}", HEADER.len(), record.len());
        }

        let occurred_at = NaiveDateTime::parse_from_str(&record[2], TIME_FORMAT)
            .with_context(|| format!("bad time value {:?}", &record[2]))?
            .and_utc();

        events.push(SeismicEvent {
            place: record[0].to_string(),
            magnitude: record[1].parse().context("bad magnitude value")?,
            occurred_at,
            latitude: record[3].parse().context("bad lat value")?,
            longitude: record[4].parse().context("bad lon value")?,
        });
    }

    Ok(SeismicReport::new(events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_report() -> SeismicReport {
        SeismicReport::new(vec![
            SeismicEvent {
                place: "6 km NW of The Geysers, CA".to_string(),
                magnitude: 2.43,
                occurred_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
                latitude: 38.8091,
                longitude: -122.8164,
            },
            SeismicEvent {
                place: "offshore, \"the trench\"".to_string(),
                magnitude: 4.6,
                occurred_at: Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap(),
                latitude: 36.9788,
                longitude: -121.5683,
            },
        ])
    }

    #[test]
    fn header_row_is_first() {
        let bytes = report_to_csv(&SeismicReport::empty()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().next(), Some("place,magnitude,time,lat,lon"));
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let report = sample_report();
        let bytes = report_to_csv(&report).unwrap();
        let reparsed = parse_report_csv(&bytes).unwrap();
        assert_eq!(reparsed, report);
    }

    #[test]
    fn quoted_places_survive() {
        let report = sample_report();
        let bytes = report_to_csv(&report).unwrap();
        let reparsed = parse_report_csv(&bytes).unwrap();
        assert_eq!(reparsed.events()[1].place, "offshore, \"the trench\"");
    }

    #[test]
    fn empty_report_is_header_only() {
        let bytes = report_to_csv(&SeismicReport::empty()).unwrap();
        let reparsed = parse_report_csv(&bytes).unwrap();
        assert!(reparsed.is_empty());
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
