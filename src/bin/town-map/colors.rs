//! Color constants for map overlays and UI elements.

use eframe::egui::Color32;

// Zone highlight
pub const ZONE_HOVER_FILL: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 40);
pub const ZONE_HOVER_STROKE: Color32 = Color32::from_rgb(255, 215, 0);

// Zone labels
pub const LABEL_TEXT: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 230);
pub const LABEL_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);

// Moon
pub const MOON_DARK: Color32 = Color32::from_rgb(45, 52, 70);
pub const MOON_LIT: Color32 = Color32::from_rgb(245, 238, 200);
pub const MOON_OUTLINE: Color32 = Color32::from_rgb(120, 128, 150);

// Modal
pub const CONTACT_TEXT: Color32 = Color32::from_rgb(120, 190, 255);
