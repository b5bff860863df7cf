//! Conversion between SVG user units and screen positions.

use eframe::egui;
use town_map::{PanPoint, Transform};

/// Frame-local mapping from SVG coordinates to the screen.
///
/// At scale 1 the map is fitted into the viewport and centred. The viewport
/// transform is then applied to positions relative to the map centre:
/// `screen = viewport_center + pan + scale * local`.
#[derive(Debug, Clone, Copy)]
pub struct MapProjection {
    viewport_center: egui::Pos2,
    fit_scale: f32,
    logical_size: egui::Vec2,
    transform: Transform,
}

impl MapProjection {
    pub fn new(viewport_rect: egui::Rect, logical_size: [f32; 2], transform: Transform) -> Self {
        let logical_size = egui::vec2(logical_size[0], logical_size[1]);
        let viewport_size = viewport_rect.size();
        let fit_scale = (viewport_size.x / logical_size.x).min(viewport_size.y / logical_size.y);

        Self {
            viewport_center: viewport_rect.center(),
            fit_scale,
            logical_size,
            transform,
        }
    }

    /// Converts a point in SVG user units to a screen position.
    pub fn to_screen(&self, svg_pos: egui::Pos2) -> egui::Pos2 {
        let local = (svg_pos.to_vec2() - self.logical_size * 0.5) * self.fit_scale;
        let moved = self.transform.apply(PanPoint::new(local.x, local.y));
        self.viewport_center + egui::vec2(moved.x, moved.y)
    }

    /// Converts a screen position back to SVG user units.
    pub fn to_svg(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        let relative = screen_pos - self.viewport_center;
        let local = self.transform.invert(PanPoint::new(relative.x, relative.y));
        (egui::vec2(local.x, local.y) / self.fit_scale + self.logical_size * 0.5).to_pos2()
    }

    /// Screen rectangle covered by the whole map image.
    pub fn map_rect(&self) -> egui::Rect {
        egui::Rect::from_min_max(
            self.to_screen(egui::Pos2::ZERO),
            self.to_screen(self.logical_size.to_pos2()),
        )
    }

    /// Combined SVG-to-screen scale factor.
    pub fn scale(&self) -> f32 {
        self.fit_scale * self.transform.scale
    }
}
