//! Pan/zoom state for the map surface and the transform derived from it.

use crate::input::MapInput;

/// Smallest allowed scale factor.
pub const MIN_SCALE: f32 = 0.6;

/// Largest allowed scale factor.
pub const MAX_SCALE: f32 = 2.6;

/// Amount added or removed by a single zoom step.
pub const ZOOM_STEP: f32 = 0.15;

/// A point in screen space (pointer position or pan offset).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanPoint {
    pub x: f32,
    pub y: f32,
}

impl PanPoint {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The single source of truth for how the map surface is positioned.
///
/// `scale` is kept within [`MIN_SCALE`, `MAX_SCALE`] by every mutation in
/// [`ViewportController`]; nothing clamps on read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scale: f32,
    pub pan_x: f32,
    pub pan_y: f32,
    /// True only between a press and its matching release.
    pub is_panning: bool,
    /// Pointer position minus pan at the moment the press started.
    pub drag_anchor: PanPoint,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            is_panning: false,
            drag_anchor: PanPoint::ZERO,
        }
    }
}

/// Translate-then-scale affine transform.
///
/// A surface point `p` (relative to the surface's own origin) lands at
/// `translate + scale * p`. Translating first keeps panning independent of the
/// zoom level: the pan offset is never multiplied by `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: PanPoint,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate: PanPoint::ZERO,
        scale: 1.0,
    };

    /// Maps a surface-local point to its transformed position.
    pub fn apply(&self, point: PanPoint) -> PanPoint {
        PanPoint::new(
            self.translate.x + self.scale * point.x,
            self.translate.y + self.scale * point.y,
        )
    }

    /// Maps a transformed position back to surface-local coordinates.
    pub fn invert(&self, point: PanPoint) -> PanPoint {
        PanPoint::new(
            (point.x - self.translate.x) / self.scale,
            (point.y - self.translate.y) / self.scale,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Owns [`ViewportState`] and keeps the combined [`Transform`] in sync with it.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    state: ViewportState,
    transform: Transform,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// The transform computed after the last state change.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f32 {
        self.state.scale
    }

    pub fn is_panning(&self) -> bool {
        self.state.is_panning
    }

    pub fn zoom_in(&mut self) {
        self.step_scale(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.step_scale(-ZOOM_STEP);
    }

    pub fn reset_view(&mut self) {
        self.state.scale = 1.0;
        self.state.pan_x = 0.0;
        self.state.pan_y = 0.0;
        log::debug!("View reset");
        self.apply_transform();
    }

    /// Starts a drag. The anchor is stored relative to the current pan so that
    /// later motion sets the pan directly instead of accumulating deltas.
    pub fn begin_pan(&mut self, pointer_x: f32, pointer_y: f32) {
        self.state.is_panning = true;
        self.state.drag_anchor =
            PanPoint::new(pointer_x - self.state.pan_x, pointer_y - self.state.pan_y);
        log::debug!("Pan started at ({pointer_x:.1}, {pointer_y:.1})");
    }

    /// Moves the surface with the pointer. Ignored unless a drag is active.
    pub fn continue_pan(&mut self, pointer_x: f32, pointer_y: f32) {
        if !self.state.is_panning {
            return;
        }
        self.state.pan_x = pointer_x - self.state.drag_anchor.x;
        self.state.pan_y = pointer_y - self.state.drag_anchor.y;
        self.apply_transform();
    }

    pub fn end_pan(&mut self) {
        if self.state.is_panning {
            log::debug!(
                "Pan ended at offset ({:.1}, {:.1})",
                self.state.pan_x,
                self.state.pan_y
            );
        }
        self.state.is_panning = false;
    }

    fn step_scale(&mut self, delta: f32) {
        let scale = round_to_hundredths(self.state.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
        log::debug!("Scale {:.2} -> {:.2}", self.state.scale, scale);
        self.state.scale = scale;
        self.apply_transform();
    }

    fn apply_transform(&mut self) {
        self.transform = Transform {
            translate: PanPoint::new(self.state.pan_x, self.state.pan_y),
            scale: self.state.scale,
        };
    }
}

impl MapInput for ViewportController {
    fn on_zoom_in(&mut self) {
        self.zoom_in();
    }

    fn on_zoom_out(&mut self) {
        self.zoom_out();
    }

    fn on_reset(&mut self) {
        self.reset_view();
    }

    fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.begin_pan(x, y);
    }

    fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.continue_pan(x, y);
    }

    fn on_pointer_up(&mut self) {
        self.end_pan();
    }
}

/// Keeps repeated steps on a 0.01 grid so they don't drift.
fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
