use eframe::egui;
use std::sync::mpsc;
use std::time::Duration;

use crate::engine::engine::Engine;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::session::Session;
use crate::ui::settings::AppSettings;
use crate::ui::{address_panel, report_panel, settings_io};

pub const DEFAULT_ADDRESS: &str = "1600 Amphitheatre Parkway, Mountain View, CA";

/* =========================
   Status line
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/* =========================
   UI State
   ========================= */

pub struct UiState {
    pub address_input: String,
    pub session: Session,
    pub status: Option<StatusLine>,

    /// Label shown next to the spinner while a command is in flight.
    /// Action buttons are inert while this is set.
    pub busy: Option<&'static str>,

    pub ai_configured: bool,
    pub settings: AppSettings,
}

/* =========================
   App
   ========================= */

pub struct SiteApp {
    pub ui: UiState,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl SiteApp {
    pub fn new() -> Self {
        let settings = settings_io::load_settings();
        let api_key = settings.resolve_api_key();
        let ai_configured = api_key.is_some();

        if !ai_configured {
            log::warn!("no Gemini API key found; AI summary disabled");
        }

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, api_key);
            engine.run();
        });

        Self {
            ui: UiState {
                address_input: DEFAULT_ADDRESS.to_string(),
                session: Session::default(),
                status: None,
                busy: None,
                ai_configured,
                settings,
            },
            cmd_tx,
            resp_rx,
        }
    }

    fn handle_response(&mut self, resp: EngineResponse) {
        self.ui.busy = None;

        match resp {
            EngineResponse::AnalysisComplete { session, warning } => {
                let display_name = session
                    .location()
                    .map(|l| l.display_name.clone())
                    .unwrap_or_default();

                self.ui.session = session;
                self.ui.status = Some(match warning {
                    Some(text) => StatusLine::warning(text),
                    None => StatusLine::success(format!(
                        "Successfully analyzed: {}",
                        display_name
                    )),
                });
            }

            EngineResponse::AnalysisFailed { error } => {
                self.ui.status = Some(StatusLine::error(error));
            }

            EngineResponse::SummaryReady { session } => {
                self.ui.session = session;
            }
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for SiteApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.settings.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            self.handle_response(resp);
        }

        // Responses arrive from the engine thread; keep repainting
        // until the in-flight command resolves.
        if self.ui.busy.is_some() {
            ctx.request_repaint_after(Duration::from_millis(150));
        }

        address_panel::draw_address_panel(ctx, &mut self.ui, &self.cmd_tx);
        report_panel::draw_report_panel(ctx, &mut self.ui, &self.cmd_tx);
    }
}
