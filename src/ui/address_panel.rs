use eframe::egui;
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::ui::app::UiState;
use crate::ui::settings_io;

pub fn draw_address_panel(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    cmd_tx: &Sender<EngineCommand>,
) {
    egui::TopBottomPanel::top("address").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.heading("Instant Site Analysis Report");
        ui.label(
            "Enter a U.S. address to pull live earthquake data and generate \
             an AI-powered summary.",
        );

        ui.add_space(4.0);

        let mut analyze_now = false;

        ui.horizontal(|ui| {
            ui.label("Address:");

            let response = ui.add_sized(
                [ui.available_width() - 120.0, 20.0],
                egui::TextEdit::singleline(&mut ui_state.address_input)
                    .hint_text("Street, city, state"),
            );

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                analyze_now = true;
            }

            let button = ui.add_enabled(
                ui_state.busy.is_none(),
                egui::Button::new("Analyze Site"),
            );
            if button.clicked() {
                analyze_now = true;
            }
        });

        if analyze_now && ui_state.busy.is_none() {
            let address = ui_state.address_input.trim().to_string();

            if !address.is_empty() {
                ui_state.busy = Some("Analyzing…");
                ui_state.status = None;
                let _ = cmd_tx.send(EngineCommand::AnalyzeSite { address });
            }
        }

        ui.collapsing("Options", |ui| {
            ui.horizontal(|ui| {
                ui.label("UI Scale");
                let slider =
                    ui.add(egui::Slider::new(&mut ui_state.settings.ui_scale, 0.75..=2.0));
                if slider.changed() {
                    settings_io::save_settings(&ui_state.settings);
                }
            });

            if ui_state.ai_configured {
                ui.label("AI summary: configured");
            } else {
                ui.label("AI summary: no API key");
            }
        });

        ui.add_space(6.0);
    });
}
