//! Pixel output capability
//!
//! The screen funnels every write through a [`PixelOutput`]. There are exactly
//! two implementations: the WS2812 strip driver (`led-arcade-strip`) and the
//! terminal simulator (`led-arcade-term`). The one to use is picked at startup.

use std::time::Duration;

use anyhow::Result;

use crate::color::ColorModel;
use crate::types::{Brightness, Color, BITS_PER_PIXEL, BIT_PERIOD_NS};

/// A device that shows a grid of logical colors.
///
/// `set_pixel` and `fill` only buffer; nothing is visible until `flush`.
/// Coordinates passed to `set_pixel` are already bounds-checked by the screen.
pub trait PixelOutput: Send {
    /// (columns, rows)
    fn dimensions(&self) -> (u16, u16);

    fn color_model(&self) -> &ColorModel;

    fn fill(&mut self, color: Color, brightness: Option<Brightness>);

    fn set_pixel(&mut self, column: u16, row: u16, color: Color, brightness: Option<Brightness>);

    /// Push the buffered state to the device.
    ///
    /// Takes at least [`transfer_time`] for the whole grid. Call it once per
    /// tick, never skip it.
    fn flush(&mut self) -> Result<()>;

    /// Release the device. The default does nothing.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Time needed to clock `pixels` LEDs out of a WS2812 chain.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use led_arcade_core::pixels::transfer_time;
///
/// // 24 x 18 LEDs, 24 bits each, 1.25 us per bit
/// assert_eq!(transfer_time(432), Duration::from_micros(12_960));
/// ```
pub fn transfer_time(pixels: usize) -> Duration {
    Duration::from_nanos(pixels as u64 * BITS_PER_PIXEL as u64 * BIT_PERIOD_NS)
}
