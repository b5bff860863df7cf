//! Translates raw egui input events into viewport pointer events.

use eframe::egui;
use town_map::{PanPoint, PointerEvent, TouchContacts};

fn pan_point(pos: egui::Pos2) -> PanPoint {
    PanPoint::new(pos.x, pos.y)
}

/// Turns egui's event stream into [`PointerEvent`]s.
///
/// Backends also synthesise mouse events from the first touch. Those are
/// skipped while touch contacts are active so a finger drives the viewport
/// only once.
#[derive(Default)]
pub struct PointerAdapter {
    touches: TouchContacts<egui::TouchId>,
}

impl PointerAdapter {
    /// Translates one frame of events. A press (mouse down or the first touch)
    /// only counts when `press_on_map` accepts its position; motion and
    /// releases are always forwarded.
    pub fn translate(
        &mut self,
        events: &[egui::Event],
        press_on_map: impl Fn(egui::Pos2) -> bool,
    ) -> Vec<PointerEvent> {
        let touch_frame = !self.touches.is_empty()
            || events
                .iter()
                .any(|event| matches!(event, egui::Event::Touch { .. }));

        let mut out = Vec::new();
        for event in events {
            match *event {
                egui::Event::Touch { id, phase, pos, .. } => match phase {
                    egui::TouchPhase::Start => {
                        let event = self.touches.start(id, pan_point(pos));
                        if press_on_map(pos) {
                            out.push(event);
                        }
                    }
                    egui::TouchPhase::Move => {
                        out.extend(self.touches.moved(id, pan_point(pos)));
                    }
                    egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                        out.push(self.touches.end(id));
                    }
                },
                _ if touch_frame => {}
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if !pressed {
                        out.push(PointerEvent::MouseUp);
                    } else if press_on_map(pos) {
                        out.push(PointerEvent::MouseDown(pan_point(pos)));
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    out.push(PointerEvent::MouseMove(pan_point(pos)));
                }
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u64, phase: egui::TouchPhase, x: f32, y: f32) -> egui::Event {
        egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(id),
            phase,
            pos: egui::pos2(x, y),
            force: None,
        }
    }

    fn button(pressed: bool, x: f32, y: f32) -> egui::Event {
        egui::Event::PointerButton {
            pos: egui::pos2(x, y),
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_mouse_press_outside_map_is_dropped() {
        let mut adapter = PointerAdapter::default();
        let events = [button(true, 5.0, 5.0), button(false, 5.0, 5.0)];
        let out = adapter.translate(&events, |pos| pos.x > 10.0);
        assert_eq!(out, vec![PointerEvent::MouseUp]);
    }

    #[test]
    fn test_only_primary_button_pans() {
        let mut adapter = PointerAdapter::default();
        let secondary = |pressed| egui::Event::PointerButton {
            pos: egui::pos2(50.0, 50.0),
            button: egui::PointerButton::Secondary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        let events = [
            secondary(true),
            egui::Event::PointerMoved(egui::pos2(60.0, 70.0)),
            secondary(false),
        ];
        let out = adapter.translate(&events, |_| true);
        assert_eq!(out, vec![PointerEvent::MouseMove(PanPoint::new(60.0, 70.0))]);
    }

    #[test]
    fn test_mouse_drag_sequence() {
        let mut adapter = PointerAdapter::default();
        let events = [
            button(true, 100.0, 100.0),
            egui::Event::PointerMoved(egui::pos2(150.0, 120.0)),
            button(false, 150.0, 120.0),
        ];
        let out = adapter.translate(&events, |_| true);
        assert_eq!(
            out,
            vec![
                PointerEvent::MouseDown(PanPoint::new(100.0, 100.0)),
                PointerEvent::MouseMove(PanPoint::new(150.0, 120.0)),
                PointerEvent::MouseUp,
            ]
        );
    }

    #[test]
    fn test_synthesised_mouse_events_are_skipped_during_touch() {
        let mut adapter = PointerAdapter::default();
        let start = [touch(1, egui::TouchPhase::Start, 10.0, 10.0), button(true, 10.0, 10.0)];
        let out = adapter.translate(&start, |_| true);
        assert_eq!(
            out,
            vec![PointerEvent::TouchStart {
                contacts: 1,
                primary: PanPoint::new(10.0, 10.0)
            }]
        );

        // Next frame only carries the emulated mouse motion plus the touch move.
        let drag = [
            egui::Event::PointerMoved(egui::pos2(20.0, 30.0)),
            touch(1, egui::TouchPhase::Move, 20.0, 30.0),
        ];
        let out = adapter.translate(&drag, |_| true);
        assert_eq!(
            out,
            vec![PointerEvent::TouchMove {
                primary: PanPoint::new(20.0, 30.0)
            }]
        );
    }

    #[test]
    fn test_second_finger_counts_as_extra_contact() {
        let mut adapter = PointerAdapter::default();
        adapter.translate(&[touch(1, egui::TouchPhase::Start, 10.0, 10.0)], |_| true);
        let out = adapter.translate(&[touch(2, egui::TouchPhase::Start, 90.0, 90.0)], |_| true);
        assert_eq!(
            out,
            vec![PointerEvent::TouchStart {
                contacts: 2,
                primary: PanPoint::new(10.0, 10.0)
            }]
        );
    }
}
