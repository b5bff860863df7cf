//! Core of the interactive town map: viewport state, input mapping, zone
//! lookup, SVG zone regions and the stored moon phase. Nothing in here depends
//! on a UI toolkit.

pub mod input;
pub mod moon;
pub mod svg;
pub mod viewport;
pub mod zones;

pub use input::{MapInput, PointerEvent, TouchContacts, dispatch};
pub use moon::MoonPhase;
pub use svg::{Bounds, RasterImage, SvgError, TownSvg, ZoneRegion};
pub use viewport::{PanPoint, Transform, ViewportController, ViewportState};
pub use zones::{ZoneInfo, ZoneRecord, ZoneTable, ZoneTableError};
