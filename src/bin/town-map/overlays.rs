//! Drawing functions for zone labels, the hover highlight and the moon.

use crate::colors;
use crate::constants::{LABEL_FONT_MAX, LABEL_FONT_MIN, MOON_RADIUS};
use crate::coordinates::MapProjection;
use eframe::egui;
use town_map::{MoonPhase, ZoneRegion};

const MOON_SAMPLES: usize = 48;

fn region_rect(projection: &MapProjection, region: &ZoneRegion) -> egui::Rect {
    let bounds = region.bounds;
    egui::Rect::from_min_max(
        projection.to_screen(egui::pos2(bounds.min_x, bounds.min_y)),
        projection.to_screen(egui::pos2(bounds.max_x, bounds.max_y)),
    )
}

/// Draws each zone's name at the centre of its region.
pub fn draw_labels(ui: &egui::Ui, projection: &MapProjection, regions: &[ZoneRegion]) {
    let painter = ui.painter();
    let clip = painter.clip_rect();
    let font_size = (12.0 * projection.scale()).clamp(LABEL_FONT_MIN, LABEL_FONT_MAX);
    let font_id = egui::FontId::proportional(font_size);

    for region in regions {
        let rect = region_rect(projection, region);
        if !clip.expand(50.0).intersects(rect) {
            continue;
        }
        let pos = rect.center();

        // Shadow
        painter.text(
            pos + egui::vec2(1.0, 1.0),
            egui::Align2::CENTER_CENTER,
            &region.id,
            font_id.clone(),
            colors::LABEL_SHADOW,
        );

        // Main text
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            &region.id,
            font_id.clone(),
            colors::LABEL_TEXT,
        );
    }
}

/// Outlines the region under the pointer.
pub fn draw_zone_highlight(ui: &egui::Ui, projection: &MapProjection, region: &ZoneRegion) {
    let rect = region_rect(projection, region);
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, colors::ZONE_HOVER_FILL);
    painter.rect_stroke(
        rect,
        4.0,
        egui::Stroke::new(2.0, colors::ZONE_HOVER_STROKE),
        egui::StrokeKind::Outside,
    );
}

/// Draws the decorative moon for `phase` centred at `center`.
pub fn draw_moon(ui: &egui::Ui, center: egui::Pos2, phase: MoonPhase) {
    let painter = ui.painter();
    painter.circle_filled(center, MOON_RADIUS, colors::MOON_DARK);

    let rows = phase.lit_rows(MOON_SAMPLES);
    let mut mesh = egui::Mesh::default();
    for [limb, terminator] in &rows {
        mesh.colored_vertex(
            center + egui::vec2(limb.0, limb.1) * MOON_RADIUS,
            colors::MOON_LIT,
        );
        mesh.colored_vertex(
            center + egui::vec2(terminator.0, terminator.1) * MOON_RADIUS,
            colors::MOON_LIT,
        );
    }
    for i in 0..rows.len().saturating_sub(1) {
        let base = (i * 2) as u32;
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base + 1, base + 3, base + 2);
    }
    painter.add(egui::Shape::mesh(mesh));

    painter.circle_stroke(
        center,
        MOON_RADIUS,
        egui::Stroke::new(1.5, colors::MOON_OUTLINE),
    );
}
