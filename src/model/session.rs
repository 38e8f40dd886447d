use crate::model::location::Location;
use crate::model::seismic::SeismicReport;

/// Everything the user has produced in the current sitting.
///
/// The engine owns the one live value; the UI only ever sees clones
/// delivered through responses. The three states are the full life
/// cycle: nothing yet, analysis done, analysis plus generated summary.
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Idle,

    Analyzed {
        location: Location,
        report: SeismicReport,
    },

    Narrated {
        location: Location,
        report: SeismicReport,
        summary: String,
    },
}

impl Session {
    pub fn location(&self) -> Option<&Location> {
        match self {
            Session::Idle => None,
            Session::Analyzed { location, .. } | Session::Narrated { location, .. } => {
                Some(location)
            }
        }
    }

    pub fn report(&self) -> Option<&SeismicReport> {
        match self {
            Session::Idle => None,
            Session::Analyzed { report, .. } | Session::Narrated { report, .. } => Some(report),
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            Session::Narrated { summary, .. } => Some(summary),
            _ => None,
        }
    }

    /// Install a fresh analysis. Any previously generated summary is
    /// dropped: it described a different (location, report) pair.
    pub fn set_analysis(&mut self, location: Location, report: SeismicReport) {
        *self = Session::Analyzed { location, report };
    }

    /// Attach a summary to the current analysis. Does nothing while
    /// idle; there is no report for the text to describe.
    pub fn set_summary(&mut self, summary: String) {
        match std::mem::take(self) {
            Session::Idle => {}
            Session::Analyzed { location, report }
            | Session::Narrated {
                location, report, ..
            } => {
                *self = Session::Narrated {
                    location,
                    report,
                    summary,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn somewhere() -> Location {
        Location {
            latitude: 37.4,
            longitude: -122.08,
            display_name: "Mountain View, CA".to_string(),
        }
    }

    #[test]
    fn starts_idle() {
        let session = Session::default();
        assert!(session.location().is_none());
        assert!(session.report().is_none());
        assert!(session.summary().is_none());
    }

    #[test]
    fn analysis_then_summary() {
        let mut session = Session::default();
        session.set_analysis(somewhere(), SeismicReport::empty());
        assert!(session.location().is_some());
        assert!(session.summary().is_none());

        session.set_summary("Quiet area.".to_string());
        assert_eq!(session.summary(), Some("Quiet area."));
        assert!(session.report().is_some());
    }

    #[test]
    fn new_analysis_drops_stale_summary() {
        let mut session = Session::default();
        session.set_analysis(somewhere(), SeismicReport::empty());
        session.set_summary("Old text about the old site.".to_string());

        session.set_analysis(somewhere(), SeismicReport::empty());
        assert!(session.summary().is_none());
        assert!(session.location().is_some());
    }

    #[test]
    fn summary_while_idle_is_ignored() {
        let mut session = Session::default();
        session.set_summary("Orphaned text.".to_string());
        assert!(session.summary().is_none());
        assert!(matches!(session, Session::Idle));
    }

    #[test]
    fn regenerating_replaces_summary() {
        let mut session = Session::default();
        session.set_analysis(somewhere(), SeismicReport::empty());
        session.set_summary("First take.".to_string());
        session.set_summary("Second take.".to_string());
        assert_eq!(session.summary(), Some("Second take."));
    }
}
