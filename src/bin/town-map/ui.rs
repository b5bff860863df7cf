//! UI rendering methods for the Town Map application.

use crate::TownMapApp;
use crate::assets::AssetLoadState;
use crate::constants::MOON_RADIUS;
use crate::coordinates::MapProjection;
use crate::overlays::{draw_labels, draw_moon, draw_zone_highlight};
use eframe::egui;
use town_map::{MapInput, dispatch, svg::zone_at};

impl TownMapApp {
    /// Renders the bottom status bar with the controls hint and hovered zone.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Drag: Pan | − / + / Reset: Zoom | Click a zone for details");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(phase) = self.moon_phase {
                        ui.label(phase.name());
                    }
                    if let Some(zone) = &self.hovered_zone {
                        ui.strong(zone);
                    }
                });
            });
        });
    }

    /// Renders the central panel containing the map view.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let panel_rect = ui.max_rect();
            self.show_map(ui, ctx);
            self.show_zoom_controls(ctx, panel_rect);
        });
    }

    /// Renders the floating zoom controls panel.
    fn show_zoom_controls(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let margin = 12.0;
        let panel_width = 250.0;
        let panel_height = 36.0;

        let anchor_pos = egui::pos2(
            panel_rect.right() - panel_width - margin,
            panel_rect.bottom() - panel_height - margin,
        );

        egui::Area::new(egui::Id::new("zoom_controls"))
            .fixed_pos(anchor_pos)
            .interactable(true)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(ui.style().visuals.window_fill.gamma_multiply(0.95))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            if ui.button("−").on_hover_text("Zoom out").clicked() {
                                self.viewport.on_zoom_out();
                            }
                            ui.label(format!("{:.0}%", self.viewport.scale() * 100.0));
                            if ui.button("+").on_hover_text("Zoom in").clicked() {
                                self.viewport.on_zoom_in();
                            }
                            if ui.button("Reset").on_hover_text("Reset view").clicked() {
                                self.viewport.on_reset();
                            }
                            ui.separator();
                            ui.checkbox(&mut self.show_labels, "Labels");
                        });
                    });
            });
    }

    /// Renders the map image, overlays and moon, and feeds input to the viewport.
    fn show_map(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        // Check loading state - errors are shown via toasts
        let decoded = match &self.map_state {
            AssetLoadState::Loading(_) => {
                ui.centered_and_justified(|ui| ui.spinner());
                return;
            }
            AssetLoadState::Error(msg) => {
                ui.centered_and_justified(|ui| {
                    ui.label(format!("Failed to load map: {msg}"));
                });
                return;
            }
            AssetLoadState::Ready(decoded) => decoded,
        };

        let Some(texture) = &self.texture else {
            ui.label("Failed to create texture");
            return;
        };
        let texture_id = texture.id();

        let (viewport_rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // Handle panning
        let map_hovered = response.contains_pointer();
        let modal_open = self.modal.is_open();
        let events = ctx.input(|i| i.events.clone());
        let pointer_events = self.pointer.translate(&events, |pos| {
            !modal_open && map_hovered && viewport_rect.contains(pos)
        });
        for event in pointer_events {
            dispatch(&mut self.viewport, event);
        }

        let projection =
            MapProjection::new(viewport_rect, decoded.logical_size, self.viewport.transform());

        ui.set_clip_rect(viewport_rect);

        // Draw map image
        ui.painter().image(
            texture_id,
            projection.map_rect(),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let hovered = response
            .hover_pos()
            .filter(|_| !self.viewport.is_panning())
            .and_then(|pos| {
                let svg_pos = projection.to_svg(pos);
                zone_at(&decoded.regions, svg_pos.x, svg_pos.y)
            });

        if let Some(region) = hovered {
            draw_zone_highlight(ui, &projection, region);
        }
        self.hovered_zone = hovered.map(|region| region.id.clone());

        if self.show_labels {
            draw_labels(ui, &projection, &decoded.regions);
        }

        if let Some(phase) = self.moon_phase {
            let center = viewport_rect.right_top()
                + egui::vec2(-MOON_RADIUS - 16.0, MOON_RADIUS + 16.0);
            draw_moon(ui, center, phase);
        }

        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            let svg_pos = projection.to_svg(pos);
            if let Some(region) = zone_at(&decoded.regions, svg_pos.x, svg_pos.y) {
                let id = region.id.clone();
                self.open_zone(&id);
            }
        }
    }
}
