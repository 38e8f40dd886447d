use std::sync::mpsc::{Receiver, Sender};

use crate::engine::llm_client::{self, GeminiClient};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::quake_client::{self, SEARCH_RADIUS_KM};
use crate::engine::geocoder;
use crate::model::seismic::SeismicReport;
use crate::model::session::Session;

/// Owns the session and performs the blocking outbound calls, one
/// command at a time, on its own thread.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    llm: Option<GeminiClient>,
    session: Session,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            rx,
            tx,
            llm: api_key.map(GeminiClient::new),
            session: Session::default(),
        }
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::AnalyzeSite { address } => self.analyze_site(&address),
                EngineCommand::GenerateSummary => self.generate_summary(),
            }
        }
    }

    fn analyze_site(&mut self, address: &str) {
        log::info!("analyzing site: {}", address);

        let location = match geocoder::geocode_address(address) {
            Ok(location) => location,
            Err(e) => {
                log::error!("geocoding failed: {}", e);
                let _ = self.tx.send(EngineResponse::AnalysisFailed {
                    error: format!("Geocoding API failed: {}", e),
                });
                return;
            }
        };

        log::info!(
            "resolved to {:.4}, {:.4} ({})",
            location.latitude,
            location.longitude,
            location.display_name
        );

        // A catalog failure degrades to an empty report; the analysis
        // itself still lands.
        let (report, warning) =
            match quake_client::fetch_nearby_quakes(location.latitude, location.longitude) {
                Ok(report) => {
                    log::info!(
                        "{} events within {:.0} km",
                        report.len(),
                        SEARCH_RADIUS_KM
                    );
                    (report, None)
                }
                Err(e) => {
                    log::warn!("earthquake catalog lookup failed: {}", e);
                    (
                        SeismicReport::empty(),
                        Some(format!("USGS Earthquake API failed: {}", e)),
                    )
                }
            };

        self.session.set_analysis(location, report);

        let _ = self.tx.send(EngineResponse::AnalysisComplete {
            session: self.session.clone(),
            warning,
        });
    }

    fn generate_summary(&mut self) {
        let (display_name, report) = match &self.session {
            Session::Analyzed { location, report }
            | Session::Narrated {
                location, report, ..
            } => (location.display_name.clone(), report.clone()),
            Session::Idle => {
                log::warn!("summary requested before any analysis; ignoring");
                let _ = self.tx.send(EngineResponse::SummaryReady {
                    session: self.session.clone(),
                });
                return;
            }
        };

        log::info!("generating summary for {}", display_name);
        let summary = llm_client::generate_summary(self.llm.as_ref(), &display_name, &report);

        self.session.set_summary(summary);

        let _ = self.tx.send(EngineResponse::SummaryReady {
            session: self.session.clone(),
        });
    }
}
