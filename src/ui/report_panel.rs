use eframe::egui;
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::engine::quake_client::SEARCH_RADIUS_KM;
use crate::engine::report_export::{self, CSV_FILE_NAME};
use crate::model::seismic::SeismicReport;
use crate::model::session::Session;
use crate::ui::app::{StatusKind, StatusLine, UiState};
use crate::ui::map_panel;

const TABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn draw_report_panel(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    cmd_tx: &Sender<EngineCommand>,
) {
    let session = ui_state.session.clone();

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            draw_status_line(ui, ui_state);

            let (Some(location), Some(report)) = (session.location(), session.report()) else {
                return;
            };

            ui.add_space(8.0);
            ui.heading("Seismic Activity Report");

            if report.is_empty() {
                ui.label("No recent seismic activity found in the vicinity.");
            } else {
                ui.label(
                    egui::RichText::new(format!(
                        "Found {} recent seismic events within {:.0}km.",
                        report.len(),
                        SEARCH_RADIUS_KM
                    ))
                    .strong(),
                );

                ui.add_space(6.0);
                draw_event_table(ui, report);
            }

            ui.add_space(8.0);
            map_panel::draw_map(ui, location, report);

            if !report.is_empty() {
                ui.add_space(8.0);
                let download = ui.add_enabled(
                    ui_state.busy.is_none(),
                    egui::Button::new("Download Report as CSV"),
                );
                if download.clicked() {
                    export_report(ui_state, report);
                }
            }

            draw_summary_section(ui, ui_state, cmd_tx, &session);
        });
    });
}

/* =========================
   Status line
   ========================= */

fn draw_status_line(ui: &mut egui::Ui, ui_state: &UiState) {
    if let Some(label) = ui_state.busy {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(label);
        });
        return;
    }

    if let Some(status) = &ui_state.status {
        let color = match status.kind {
            StatusKind::Success => egui::Color32::from_rgb(80, 160, 90),
            StatusKind::Warning => egui::Color32::from_rgb(200, 160, 60),
            StatusKind::Error => egui::Color32::from_rgb(200, 90, 80),
        };
        ui.colored_label(color, &status.text);
    }
}

/* =========================
   Event table
   ========================= */

fn draw_event_table(ui: &mut egui::Ui, report: &SeismicReport) {
    egui::Grid::new("event_table")
        .striped(true)
        .min_col_width(60.0)
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Place").strong());
            ui.label(egui::RichText::new("Magnitude").strong());
            ui.label(egui::RichText::new("Time (UTC)").strong());
            ui.label(egui::RichText::new("Lat").strong());
            ui.label(egui::RichText::new("Lon").strong());
            ui.end_row();

            for event in report.events() {
                ui.label(&event.place);
                if event.magnitude.is_nan() {
                    ui.label("–");
                } else {
                    ui.label(format!("{:.2}", event.magnitude));
                }
                ui.label(event.occurred_at.format(TABLE_TIME_FORMAT).to_string());
                ui.label(format!("{:.4}", event.latitude));
                ui.label(format!("{:.4}", event.longitude));
                ui.end_row();
            }
        });
}

/* =========================
   CSV export
   ========================= */

fn export_report(ui_state: &mut UiState, report: &SeismicReport) {
    let bytes = match report_export::report_to_csv(report) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            ui_state.status = Some(StatusLine::error(format!("CSV export failed: {}", e)));
            return;
        }
    };

    let Some(path) = rfd::FileDialog::new()
        .set_file_name(CSV_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    match std::fs::write(&path, bytes) {
        Ok(()) => {
            log::info!("report saved to {}", path.display());
            ui_state.status = Some(StatusLine::success(format!(
                "Report saved to {}",
                path.display()
            )));
        }
        Err(e) => {
            log::error!("saving report failed: {}", e);
            ui_state.status = Some(StatusLine::error(format!("Saving report failed: {}", e)));
        }
    }
}

/* =========================
   AI summary
   ========================= */

fn draw_summary_section(
    ui: &mut egui::Ui,
    ui_state: &mut UiState,
    cmd_tx: &Sender<EngineCommand>,
    session: &Session,
) {
    ui.add_space(12.0);
    ui.heading("AI-Powered Summary");

    if !ui_state.ai_configured {
        ui.colored_label(
            egui::Color32::from_rgb(200, 160, 60),
            "AI features are disabled. Set GEMINI_API_KEY or add the key to the settings file.",
        );
    } else {
        let generate = ui.add_enabled(
            ui_state.busy.is_none(),
            egui::Button::new("Generate AI Summary"),
        );
        if generate.clicked() {
            ui_state.busy = Some("AI is thinking…");
            let _ = cmd_tx.send(EngineCommand::GenerateSummary);
        }
    }

    if let Some(summary) = session.summary() {
        ui.add_space(6.0);
        ui.group(|ui| {
            ui.label(summary);
        });
    }
}
