use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded earthquake from the catalog.
///
/// `magnitude` is NaN when the catalog reported no magnitude for the
/// event; the record still counts toward the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicEvent {
    pub place: String,
    pub magnitude: f64,
    pub occurred_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

/// The events found near one analyzed location, in the order the
/// catalog returned them (newest first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeismicReport {
    events: Vec<SeismicEvent>,
}

impl SeismicReport {
    pub fn new(events: Vec<SeismicEvent>) -> Self {
        Self { events }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SeismicEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Largest known magnitude in the report. None when the report is
    /// empty or no event carries a magnitude.
    pub fn max_magnitude(&self) -> Option<f64> {
        self.events
            .iter()
            .map(|e| e.magnitude)
            .filter(|m| !m.is_nan())
            .fold(None, |acc: Option<f64>, m| {
                Some(acc.map_or(m, |a| a.max(m)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(magnitude: f64) -> SeismicEvent {
        SeismicEvent {
            place: "10km NE of Somewhere".to_string(),
            magnitude,
            occurred_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            latitude: 37.4,
            longitude: -122.08,
        }
    }

    #[test]
    fn max_magnitude_picks_largest() {
        let report = SeismicReport::new(vec![event(2.1), event(4.6), event(3.3)]);
        assert_eq!(report.max_magnitude(), Some(4.6));
    }

    #[test]
    fn max_magnitude_skips_missing_values() {
        let report = SeismicReport::new(vec![event(f64::NAN), event(1.8)]);
        assert_eq!(report.max_magnitude(), Some(1.8));
    }

    #[test]
    fn max_magnitude_empty_report() {
        assert_eq!(SeismicReport::empty().max_magnitude(), None);
        let unmeasured = SeismicReport::new(vec![event(f64::NAN)]);
        assert_eq!(unmeasured.max_magnitude(), None);
    }
}
