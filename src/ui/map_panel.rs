use eframe::egui;

use crate::engine::quake_client::SEARCH_RADIUS_KM;
use crate::model::location::Location;
use crate::model::seismic::SeismicReport;

const MAP_HEIGHT: f32 = 320.0;

/// Smallest span drawn, in degrees. Keeps the projection sane when the
/// report is empty and only the site marker is on the map.
const MIN_SPAN_DEG: f64 = 0.9;
const EDGE_PADDING: f64 = 0.1;

/// Scatter map of the report around the resolved site. Plain painter
/// widget, no tiles: event positions relative to the site are all the
/// report needs to show.
pub fn draw_map(ui: &mut egui::Ui, location: &Location, report: &SeismicReport) {
    let width = ui.available_width();
    let (response, painter) =
        ui.allocate_painter(egui::vec2(width, MAP_HEIGHT), egui::Sense::hover());
    let rect = response.rect;

    painter.rect_filled(
        rect,
        egui::CornerRadius::same(4),
        egui::Color32::from_rgb(24, 36, 48),
    );

    let bounds = MapBounds::around(location, report);
    let site = bounds.project(location.latitude, location.longitude, rect);

    // Crosshair through the site
    let faint = egui::Stroke::new(1.0, egui::Color32::from_rgb(50, 66, 82));
    painter.line_segment(
        [egui::pos2(rect.left(), site.y), egui::pos2(rect.right(), site.y)],
        faint,
    );
    painter.line_segment(
        [egui::pos2(site.x, rect.top()), egui::pos2(site.x, rect.bottom())],
        faint,
    );

    for event in report.events() {
        let center = bounds.project(event.latitude, event.longitude, rect);
        painter.circle_filled(
            center,
            magnitude_radius(event.magnitude),
            magnitude_color(event.magnitude),
        );
    }

    // Site marker drawn last so it stays visible under dense clusters
    painter.circle_filled(site, 5.0, egui::Color32::from_rgb(70, 140, 240));
    painter.circle_stroke(site, 8.0, egui::Stroke::new(2.0, egui::Color32::WHITE));

    ui.label(
        egui::RichText::new(format!(
            "Map centered on {:.4}, {:.4} — events within {:.0} km",
            location.latitude, location.longitude, SEARCH_RADIUS_KM
        ))
        .weak(),
    );
}

fn magnitude_radius(magnitude: f64) -> f32 {
    if magnitude.is_nan() {
        return 3.0;
    }
    (2.0 + magnitude).clamp(2.0, 12.0) as f32
}

fn magnitude_color(magnitude: f64) -> egui::Color32 {
    if magnitude.is_nan() {
        egui::Color32::from_rgb(130, 130, 130)
    } else if magnitude < 2.0 {
        egui::Color32::from_rgb(110, 170, 120)
    } else if magnitude < 4.0 {
        egui::Color32::from_rgb(210, 180, 80)
    } else if magnitude < 6.0 {
        egui::Color32::from_rgb(220, 130, 60)
    } else {
        egui::Color32::from_rgb(220, 70, 60)
    }
}

/* =========================
   Projection
   ========================= */

struct MapBounds {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl MapBounds {
    fn around(location: &Location, report: &SeismicReport) -> Self {
        let mut bounds = Self {
            min_lat: location.latitude - MIN_SPAN_DEG / 2.0,
            max_lat: location.latitude + MIN_SPAN_DEG / 2.0,
            min_lon: location.longitude - MIN_SPAN_DEG / 2.0,
            max_lon: location.longitude + MIN_SPAN_DEG / 2.0,
        };

        for event in report.events() {
            bounds.min_lat = bounds.min_lat.min(event.latitude);
            bounds.max_lat = bounds.max_lat.max(event.latitude);
            bounds.min_lon = bounds.min_lon.min(event.longitude);
            bounds.max_lon = bounds.max_lon.max(event.longitude);
        }

        let lat_pad = (bounds.max_lat - bounds.min_lat) * EDGE_PADDING;
        let lon_pad = (bounds.max_lon - bounds.min_lon) * EDGE_PADDING;
        bounds.min_lat -= lat_pad;
        bounds.max_lat += lat_pad;
        bounds.min_lon -= lon_pad;
        bounds.max_lon += lon_pad;

        bounds
    }

    fn project(&self, latitude: f64, longitude: f64, rect: egui::Rect) -> egui::Pos2 {
        let x = (longitude - self.min_lon) / (self.max_lon - self.min_lon);
        let y = (self.max_lat - latitude) / (self.max_lat - self.min_lat);

        egui::pos2(
            rect.left() + (x * rect.width() as f64) as f32,
            rect.top() + (y * rect.height() as f64) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seismic::SeismicEvent;
    use chrono::{TimeZone, Utc};

    fn site() -> Location {
        Location {
            latitude: 37.4,
            longitude: -122.08,
            display_name: "Mountain View, CA".to_string(),
        }
    }

    #[test]
    fn every_point_projects_inside_the_rect() {
        let report = SeismicReport::new(vec![SeismicEvent {
            place: "far corner".to_string(),
            magnitude: 3.0,
            occurred_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            latitude: 38.2,
            longitude: -121.3,
        }]);

        let location = site();
        let bounds = MapBounds::around(&location, &report);
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(600.0, 320.0));

        for (lat, lon) in [
            (location.latitude, location.longitude),
            (38.2, -121.3),
        ] {
            let p = bounds.project(lat, lon, rect);
            assert!(rect.contains(p), "({lat}, {lon}) projected to {p:?}");
        }
    }

    #[test]
    fn empty_report_still_has_a_usable_span() {
        let location = site();
        let bounds = MapBounds::around(&location, &SeismicReport::empty());
        assert!(bounds.max_lat - bounds.min_lat >= MIN_SPAN_DEG);
        assert!(bounds.max_lon - bounds.min_lon >= MIN_SPAN_DEG);
    }
}
