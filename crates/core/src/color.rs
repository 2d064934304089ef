//! Color model - maps logical colors to channel intensities
//!
//! Primary colors light one channel at the computed brightness. Composites
//! (yellow, magenta, cyan) split it across two channels so the pair looks as
//! bright as a primary, white splits it across all three. Tints (orange, lime,
//! fuchsia, purple, aqua, turquoise) keep one channel at full strength and add
//! a second one at half strength.

use crate::types::{Brightness, Color, Rgb};

/// Per-output brightness calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorModel {
    base_brightness: u8,
    max_brightness: u8,
    relative: f32,
    balance: [f32; 3],
}

impl ColorModel {
    /// Base brightness of the physical strip (the diodes are very bright)
    pub const STRIP_BASE: u8 = 92;

    /// Base brightness of the simulator
    pub const SIM_BASE: u8 = 255;

    /// Peak channel intensity of both outputs
    pub const MAX: u8 = 255;

    /// Create a model; `relative` is the ambient brightness multiplier.
    ///
    /// An unusable `relative` (negative, NaN, infinite) falls back to 1.0.
    pub fn new(base_brightness: u8, max_brightness: u8, relative: Option<f32>) -> Self {
        let relative = relative
            .filter(|r| r.is_finite() && *r >= 0.0)
            .unwrap_or(1.0);
        Self {
            base_brightness,
            max_brightness,
            relative,
            balance: [1.0; 3],
        }
    }

    /// Model for the WS2812 strip
    pub fn strip(relative: Option<f32>) -> Self {
        Self::new(Self::STRIP_BASE, Self::MAX, relative)
    }

    /// Model for the terminal simulator
    pub fn simulator(relative: Option<f32>) -> Self {
        Self::new(Self::SIM_BASE, Self::MAX, relative)
    }

    /// Per-channel gain (red, green, blue) applied before the split.
    pub fn with_balance(mut self, red: f32, green: f32, blue: f32) -> Self {
        self.balance = [red, green, blue];
        self
    }

    pub fn base_brightness(&self) -> u8 {
        self.base_brightness
    }

    pub fn max_brightness(&self) -> u8 {
        self.max_brightness
    }

    /// Ambient relative brightness
    pub fn relative(&self) -> f32 {
        self.relative
    }

    /// Resolve the brightness scalar for one write
    fn level(&self, brightness: Option<Brightness>) -> f32 {
        match brightness {
            Some(Brightness::Max) => self.max_brightness as f32,
            Some(b) => {
                b.relative().unwrap_or(self.relative) * self.base_brightness as f32
            }
            None => self.relative * self.base_brightness as f32,
        }
    }

    /// Channel intensities of `color` at `brightness` (`None` = ambient).
    pub fn to_channels(&self, color: Color, brightness: Option<Brightness>) -> Rgb {
        let level = self.level(brightness);
        let red = level * self.balance[0];
        let green = level * self.balance[1];
        let blue = level * self.balance[2];

        let full = |v: f32| v.floor();
        let half_up = |v: f32| (v / 2.0).ceil();
        let third_up = |v: f32| (v / 3.0).ceil();
        let half_down = |v: f32| (v / 2.0).floor();

        let (r, g, b) = match color {
            Color::Off => (0.0, 0.0, 0.0),
            Color::Red => (full(red), 0.0, 0.0),
            Color::Green => (0.0, full(green), 0.0),
            Color::Blue => (0.0, 0.0, full(blue)),
            Color::Yellow => (half_up(red), half_up(green), 0.0),
            Color::Magenta => (half_up(red), 0.0, half_up(blue)),
            Color::Cyan => (0.0, half_up(green), half_up(blue)),
            Color::White => (third_up(red), third_up(green), third_up(blue)),
            Color::Orange => (full(red), half_down(green), 0.0),
            Color::Lime => (half_down(red), full(green), 0.0),
            Color::Fuchsia => (full(red), 0.0, half_down(blue)),
            Color::Purple => (half_down(red), 0.0, full(blue)),
            Color::Aqua => (0.0, half_down(green), full(blue)),
            Color::Turquoise => (0.0, full(green), half_down(blue)),
        };

        Rgb::new(self.clamp(r), self.clamp(g), self.clamp(b))
    }

    #[inline(always)]
    fn clamp(&self, v: f32) -> u8 {
        v.max(0.0).min(self.max_brightness as f32) as u8
    }
}

impl Default for ColorModel {
    fn default() -> Self {
        Self::simulator(None)
    }
}
