//! The stored moon phase that picks one of eight decorative moon variants.

use std::f32::consts::{PI, TAU};

/// Number of distinct phases.
pub const PHASE_COUNT: u8 = 8;

/// One of the eight moon phases, `0` being new moon and `4` full moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoonPhase(u8);

impl MoonPhase {
    pub fn new(index: u8) -> Option<Self> {
        (index < PHASE_COUNT).then_some(Self(index))
    }

    /// Parses a stored preference value such as `3` or `"3"`.
    ///
    /// Anything that isn't an index in `0..8` is treated as absent.
    pub fn from_stored(value: &str) -> Option<Self> {
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        value.trim().parse::<u8>().ok().and_then(Self::new)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "New Moon",
            1 => "Waxing Crescent",
            2 => "First Quarter",
            3 => "Waxing Gibbous",
            4 => "Full Moon",
            5 => "Waning Gibbous",
            6 => "Last Quarter",
            _ => "Waning Crescent",
        }
    }

    /// Position in the lunar cycle in radians, `0` at new moon.
    fn angle(self) -> f32 {
        TAU * f32::from(self.0) / f32::from(PHASE_COUNT)
    }

    /// Fraction of the disk that is lit, in `0.0..=1.0`.
    pub fn illumination(self) -> f32 {
        (1.0 - self.angle().cos()) * 0.5
    }

    /// Samples the lit part of a unit disk centred on the origin, y down.
    ///
    /// Each entry pairs a point on the lit limb with the point on the
    /// terminator at the same height, top to bottom. Filling between the
    /// pairs draws the phase. `samples` is clamped to at least 2.
    pub fn lit_rows(self, samples: usize) -> Vec<[(f32, f32); 2]> {
        let samples = samples.max(2);
        let angle = self.angle();
        // Waxing moons are lit on the right, waning ones on the left.
        let side = if angle < PI { 1.0 } else { -1.0 };
        let terminator = side * angle.cos();

        (0..samples)
            .map(|i| {
                let t = PI * i as f32 / (samples - 1) as f32;
                let (sin, cos) = t.sin_cos();
                [(side * sin, -cos), (terminator * sin, -cos)]
            })
            .collect()
    }
}
