/// Window title and persistence app id.
pub const APP_NAME: &str = "Town Map";

/// Directory under the user's config dir that may hold zone and map overrides.
pub const CONFIG_DIR_NAME: &str = "town-map";

/// Storage key of the externally set moon phase (read only).
pub const MOON_PHASE_KEY: &str = "citypulse-moonphase";

/// The SVG is rasterised at this multiple of its intrinsic size so it stays
/// sharp up to the maximum zoom.
pub const RASTER_SCALE: f32 = 2.0;

/// Radius of the decorative moon in points.
pub const MOON_RADIUS: f32 = 18.0;

/// Smallest and largest zone label font size in points.
pub const LABEL_FONT_MIN: f32 = 9.0;
pub const LABEL_FONT_MAX: f32 = 22.0;
