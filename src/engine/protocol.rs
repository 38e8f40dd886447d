use crate::model::session::Session;

pub enum EngineCommand {
    AnalyzeSite { address: String },
    GenerateSummary,
}

pub enum EngineResponse {
    /// Geocoding and the catalog lookup both ran. `warning` carries the
    /// degraded-lookup notice when the catalog call failed and the
    /// analysis continued with an empty report.
    AnalysisComplete {
        session: Session,
        warning: Option<String>,
    },

    /// Geocoding failed; the session was left untouched.
    AnalysisFailed { error: String },

    SummaryReady { session: Session },
}
