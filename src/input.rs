//! Toolkit-independent input seam between the host UI and the viewport.

use crate::viewport::PanPoint;

/// The actions a map surface reacts to.
///
/// The host translates its own events into these calls, so anything that
/// implements this trait can be driven without a live window.
pub trait MapInput {
    fn on_zoom_in(&mut self);
    fn on_zoom_out(&mut self);
    fn on_reset(&mut self);
    fn on_pointer_down(&mut self, x: f32, y: f32);
    fn on_pointer_move(&mut self, x: f32, y: f32);
    fn on_pointer_up(&mut self);
}

/// Raw pointer and touch events, in delivery order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    MouseDown(PanPoint),
    MouseMove(PanPoint),
    MouseUp,
    /// A new contact touched down. `contacts` counts every contact now active,
    /// and `primary` is the position of the oldest one.
    TouchStart { contacts: usize, primary: PanPoint },
    TouchMove { primary: PanPoint },
    TouchEnd,
}

/// Feeds a raw event into `input`.
///
/// Only a single contact starts a drag; a second finger landing mid-drag is
/// ignored rather than turned into a gesture. Lifting any finger ends the drag.
pub fn dispatch<I: MapInput + ?Sized>(input: &mut I, event: PointerEvent) {
    match event {
        PointerEvent::MouseDown(pos) => input.on_pointer_down(pos.x, pos.y),
        PointerEvent::MouseMove(pos) | PointerEvent::TouchMove { primary: pos } => {
            input.on_pointer_move(pos.x, pos.y)
        }
        PointerEvent::MouseUp | PointerEvent::TouchEnd => input.on_pointer_up(),
        PointerEvent::TouchStart { contacts, primary } => {
            if contacts == 1 {
                input.on_pointer_down(primary.x, primary.y);
            }
        }
    }
}

/// Tracks active touch contacts in arrival order and turns per-contact
/// updates into [`PointerEvent`]s.
#[derive(Debug, Clone)]
pub struct TouchContacts<Id> {
    active: Vec<(Id, PanPoint)>,
}

impl<Id> Default for TouchContacts<Id> {
    fn default() -> Self {
        Self { active: Vec::new() }
    }
}

impl<Id: PartialEq> TouchContacts<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn start(&mut self, id: Id, pos: PanPoint) -> PointerEvent {
        match self.active.iter_mut().find(|(active, _)| *active == id) {
            Some((_, existing)) => *existing = pos,
            None => self.active.push((id, pos)),
        }
        PointerEvent::TouchStart {
            contacts: self.active.len(),
            primary: self.primary().unwrap_or(pos),
        }
    }

    /// Updates a contact. Returns `None` when the contact was never started.
    pub fn moved(&mut self, id: Id, pos: PanPoint) -> Option<PointerEvent> {
        let (_, existing) = self.active.iter_mut().find(|(active, _)| *active == id)?;
        *existing = pos;
        Some(PointerEvent::TouchMove {
            primary: self.primary()?,
        })
    }

    /// Removes a contact (lifted or cancelled).
    pub fn end(&mut self, id: Id) -> PointerEvent {
        self.active.retain(|(active, _)| *active != id);
        PointerEvent::TouchEnd
    }

    fn primary(&self) -> Option<PanPoint> {
        self.active.first().map(|(_, pos)| *pos)
    }
}
