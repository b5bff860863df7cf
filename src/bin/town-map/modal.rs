//! Modal that presents a zone's description and contact.

use crate::colors;
use eframe::egui;

const MODAL_WIDTH: f32 = 320.0;

/// Text currently bound to the modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDetails {
    pub title: String,
    pub description: String,
    pub contact: String,
}

/// Show/hide state of the zone modal.
#[derive(Debug, Default)]
pub struct ZoneModal {
    shown: Option<ZoneDetails>,
    /// Set by `show` and cleared by the next `ui`. The click that opened the
    /// modal must not also dismiss it.
    just_opened: bool,
}

impl ZoneModal {
    /// Binds new text and opens the modal, replacing whatever was shown.
    pub fn show(&mut self, title: &str, description: &str, contact: &str) {
        self.shown = Some(ZoneDetails {
            title: title.to_owned(),
            description: description.to_owned(),
            contact: contact.to_owned(),
        });
        self.just_opened = true;
    }

    pub fn hide(&mut self) {
        self.shown = None;
        self.just_opened = false;
    }

    pub fn is_open(&self) -> bool {
        self.shown.is_some()
    }

    pub fn details(&self) -> Option<&ZoneDetails> {
        self.shown.as_ref()
    }

    /// A press while the modal is open dismisses it unless it landed inside.
    pub fn pointer_pressed(&mut self, inside_modal: bool) {
        if self.is_open() && !inside_modal {
            log::debug!("Zone modal dismissed by outside click");
            self.hide();
        }
    }

    /// Renders the modal if it's open and applies the dismissal rules.
    pub fn ui(&mut self, ctx: &egui::Context) {
        let Some(details) = self.details() else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("zone_modal")).show(ctx, |ui| {
            ui.set_width(MODAL_WIDTH);
            ui.heading(&details.title);
            ui.add_space(6.0);
            ui.label(&details.description);
            if !details.contact.is_empty() {
                ui.add_space(4.0);
                ui.colored_label(colors::CONTACT_TEXT, &details.contact);
            }
            ui.add_space(10.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.button("Close").clicked()
            })
            .inner
        });

        if modal.inner {
            self.hide();
            return;
        }
        if std::mem::take(&mut self.just_opened) {
            return;
        }

        let pressed_at = ctx.input(|i| {
            i.pointer
                .any_pressed()
                .then(|| i.pointer.interact_pos())
                .flatten()
        });
        if let Some(pos) = pressed_at {
            self.pointer_pressed(modal.response.rect.contains(pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_binds_text() {
        let mut modal = ZoneModal::default();
        assert!(!modal.is_open());

        modal.show("City Park", "Swings and trees.", "Park Office: 98291-11234");

        let details = modal.details().unwrap();
        assert_eq!(details.title, "City Park");
        assert_eq!(details.description, "Swings and trees.");
        assert_eq!(details.contact, "Park Office: 98291-11234");
    }

    #[test]
    fn test_show_replaces_previous_zone() {
        let mut modal = ZoneModal::default();
        modal.show("House 1", "a", "b");
        modal.show("House 2", "c", "");
        assert_eq!(modal.details().map(|d| d.title.as_str()), Some("House 2"));
        assert_eq!(modal.details().map(|d| d.contact.as_str()), Some(""));
    }

    #[test]
    fn test_outside_press_dismisses() {
        let mut modal = ZoneModal::default();
        modal.show("Post Office", "Letters.", "Desk");

        modal.pointer_pressed(true);
        assert!(modal.is_open());

        modal.pointer_pressed(false);
        assert!(!modal.is_open());
    }

    fn run_frame(
        ctx: &egui::Context,
        events: Vec<egui::Event>,
        mut ui: impl FnMut(&egui::Context),
    ) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| ui(ctx));
    }

    fn click(x: f32, y: f32) -> Vec<egui::Event> {
        let pos = egui::pos2(x, y);
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        vec![egui::Event::PointerMoved(pos), button(true), button(false)]
    }

    #[test]
    fn test_opening_click_does_not_dismiss() {
        let ctx = egui::Context::default();
        let mut modal = ZoneModal::default();

        run_frame(&ctx, vec![egui::Event::PointerMoved(egui::pos2(20.0, 20.0))], |_| {});
        // The click on the map lands outside the modal's frame.
        run_frame(&ctx, click(20.0, 20.0), |ctx| {
            if !modal.is_open() {
                modal.show("Bus Stand", "Buses.", "Depot");
            }
            modal.ui(ctx);
        });
        assert!(modal.is_open());

        // A later click in the same spot does dismiss it.
        run_frame(&ctx, click(20.0, 20.0), |ctx| modal.ui(ctx));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_press_inside_frame_keeps_modal_open() {
        let ctx = egui::Context::default();
        let mut modal = ZoneModal::default();
        modal.show("Water Tank", "Storage.", "");

        for _ in 0..3 {
            run_frame(&ctx, Vec::new(), |ctx| modal.ui(ctx));
        }
        // The modal is centred on the 800x600 screen.
        run_frame(&ctx, click(400.0, 300.0), |ctx| modal.ui(ctx));
        assert!(modal.is_open());

        run_frame(&ctx, click(790.0, 590.0), |ctx| modal.ui(ctx));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_hide_closes() {
        let mut modal = ZoneModal::default();
        modal.show("Fire Station", "Rescue.", "101");
        modal.hide();
        assert_eq!(modal.details(), None);
    }
}
