//! WS2812 LED strip driver.
//!
//! The strip hangs off the SPI MOSI line. Every WS2812 data bit is sent as
//! three SPI bits at 2.4 MHz (`1` -> `110`, `0` -> `100`), which reproduces the
//! 0.4/0.8 us high/low timing the LEDs expect. After the frame the line is
//! held low long enough for the strip to latch.
//!
//! Any [`Write`] sink works, which keeps the encoder testable without
//! hardware; [`LedStrip::open`] configures and writes to a spidev device.

pub mod layout;
pub mod spi;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

pub use layout::Layout;
pub use led_arcade_core as core;
pub use led_arcade_types as types;

use crate::core::{ColorModel, PixelOutput};
use crate::types::{Brightness, Color, Rgb};

/// SPI clock: three SPI bits per WS2812 bit at 800 kHz
pub const SPI_CLOCK_HZ: u32 = 2_400_000;

/// SPI bytes per LED (24 data bits, 3 SPI bits each)
pub const SPI_BYTES_PER_LED: usize = 9;

/// Zero bytes after the frame; 40 bytes at 2.4 MHz is ~133 us of low line
pub const RESET_BYTES: usize = 40;

const SYMBOL_ONE: u32 = 0b110;
const SYMBOL_ZERO: u32 = 0b100;

/// Append the SPI encoding of one 8-bit channel (three bytes).
fn encode_channel(value: u8, out: &mut Vec<u8>) {
    let mut bits: u32 = 0;
    for i in (0..8).rev() {
        let symbol = if value & (1 << i) != 0 {
            SYMBOL_ONE
        } else {
            SYMBOL_ZERO
        };
        bits = (bits << 3) | symbol;
    }
    out.extend_from_slice(&bits.to_be_bytes()[1..]);
}

/// Encode a whole frame, GRB order per LED, followed by the reset latch.
///
/// ```
/// use led_arcade_strip::{encode_spi, RESET_BYTES, SPI_BYTES_PER_LED};
/// use led_arcade_strip::types::Rgb;
///
/// let mut out = Vec::new();
/// encode_spi(&[Rgb::BLACK], &mut out);
/// assert_eq!(out.len(), SPI_BYTES_PER_LED + RESET_BYTES);
/// assert_eq!(&out[..3], &[0x92, 0x49, 0x24]);
/// ```
pub fn encode_spi(leds: &[Rgb], out: &mut Vec<u8>) {
    out.clear();
    out.reserve(leds.len() * SPI_BYTES_PER_LED + RESET_BYTES);
    for rgb in leds {
        encode_channel(rgb.g, out);
        encode_channel(rgb.r, out);
        encode_channel(rgb.b, out);
    }
    out.resize(out.len() + RESET_BYTES, 0);
}

/// A WS2812 strip behind a canvas layout.
pub struct LedStrip<W: Write + Send> {
    layout: Layout,
    model: ColorModel,
    /// Color per strip position (not per canvas cell)
    leds: Vec<Rgb>,
    sink: W,
    buf: Vec<u8>,
}

impl LedStrip<spi::SpiDevice> {
    /// Load the layout and open the SPI device, clocked at [`SPI_CLOCK_HZ`].
    pub fn open(
        layout_path: impl AsRef<Path>,
        device_path: impl AsRef<Path>,
        relative: Option<f32>,
    ) -> Result<Self> {
        let layout = Layout::load(layout_path)?;
        let device_path = device_path.as_ref();
        let device = spi::open(device_path)?;
        log::info!(
            "LED strip opened on {} at {} Hz: {}x{} ({} LEDs)",
            device_path.display(),
            SPI_CLOCK_HZ,
            layout.columns(),
            layout.rows(),
            layout.led_count()
        );
        Ok(Self::new(layout, device, relative))
    }
}

impl<W: Write + Send> LedStrip<W> {
    pub fn new(layout: Layout, sink: W, relative: Option<f32>) -> Self {
        let count = layout.led_count();
        Self {
            layout,
            model: ColorModel::strip(relative),
            leds: vec![Rgb::BLACK; count],
            sink,
            buf: Vec::with_capacity(count * SPI_BYTES_PER_LED + RESET_BYTES),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Buffered color of strip position `index`
    pub fn led(&self, index: usize) -> Option<Rgb> {
        self.leds.get(index).copied()
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }
}

impl<W: Write + Send> PixelOutput for LedStrip<W> {
    fn dimensions(&self) -> (u16, u16) {
        (self.layout.columns(), self.layout.rows())
    }

    fn color_model(&self) -> &ColorModel {
        &self.model
    }

    fn fill(&mut self, color: Color, brightness: Option<Brightness>) {
        let rgb = self.model.to_channels(color, brightness);
        self.leds.fill(rgb);
    }

    fn set_pixel(&mut self, column: u16, row: u16, color: Color, brightness: Option<Brightness>) {
        if let Some(index) = self.layout.index(column, row) {
            self.leds[index] = self.model.to_channels(color, brightness);
        }
    }

    fn flush(&mut self) -> Result<()> {
        encode_spi(&self.leds, &mut self.buf);
        self.sink
            .write_all(&self.buf)
            .context("failed to write frame to LED strip")?;
        self.sink.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.leds.fill(Rgb::BLACK);
        self.flush()?;
        log::info!("LED strip closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spi_clock_gives_ws2812_bit_timing() {
        // 800 kHz data rate, 1.25 us per WS2812 bit
        assert_eq!(SPI_CLOCK_HZ / 3, 800_000);
        let symbol_ns = 3 * 1_000_000_000 / SPI_CLOCK_HZ;
        assert_eq!(symbol_ns, 1250);
    }

    #[test]
    fn channel_bits_expand_to_three_spi_bits() {
        let mut out = Vec::new();
        encode_channel(0xFF, &mut out);
        // 110 x 8
        assert_eq!(out, vec![0xDB, 0x6D, 0xB6]);

        out.clear();
        encode_channel(0x80, &mut out);
        // 110 100 100 100 100 100 100 100
        assert_eq!(out, vec![0xD2, 0x49, 0x24]);
    }

    #[test]
    fn frame_is_grb_ordered_and_latched() {
        let mut out = Vec::new();
        encode_spi(&[Rgb::new(0xFF, 0x00, 0x80)], &mut out);
        assert_eq!(&out[0..3], &[0x92, 0x49, 0x24]);
        assert_eq!(&out[3..6], &[0xDB, 0x6D, 0xB6]);
        assert_eq!(&out[6..9], &[0xD2, 0x49, 0x24]);
        assert!(out[9..].iter().all(|b| *b == 0));
        assert_eq!(out.len(), SPI_BYTES_PER_LED + RESET_BYTES);
    }

    #[test]
    fn set_pixel_goes_through_layout() {
        let layout = Layout::parse("0,1\n3,2\n").unwrap();
        let mut strip = LedStrip::new(layout, Vec::new(), None);
        strip.set_pixel(0, 1, Color::Red, Some(Brightness::Max));
        assert_eq!(strip.led(3), Some(Rgb::new(255, 0, 0)));
        assert_eq!(strip.led(0), Some(Rgb::BLACK));
    }

    #[test]
    fn flush_writes_one_whole_frame() {
        let mut strip = LedStrip::new(Layout::serpentine(3, 2), Vec::new(), None);
        strip.fill(Color::Blue, None);
        strip.flush().unwrap();
        assert_eq!(strip.sink().len(), 6 * SPI_BYTES_PER_LED + RESET_BYTES);

        strip.flush().unwrap();
        assert_eq!(strip.sink().len(), 2 * (6 * SPI_BYTES_PER_LED + RESET_BYTES));
    }

    #[test]
    fn strip_uses_dimmer_base_brightness() {
        let mut strip = LedStrip::new(Layout::serpentine(1, 1), Vec::new(), None);
        strip.fill(Color::Green, None);
        assert_eq!(strip.led(0), Some(Rgb::new(0, ColorModel::STRIP_BASE, 0)));
    }
}
