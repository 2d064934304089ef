//! TerminalSimulator: the LED matrix stand-in for development machines.
//!
//! Each LED is a glyph two terminal columns wide, colored with the RGB the
//! strip would show, inside a box border centered in the terminal. Flushing
//! takes as long as clocking the same number of LEDs out of a real strip, so
//! games run at the speed they will have on the device.

use std::io::Write;
use std::thread;

use anyhow::Result;

use crate::core::{transfer_time, ColorModel, PixelOutput};
use crate::renderer::{LedShape, MatrixView, TerminalRenderer};
use crate::types::{Brightness, Color, Rgb, SIM_COLUMNS, SIM_ROWS};

pub struct TerminalSimulator {
    model: ColorModel,
    view: MatrixView,
    leds: Vec<Rgb>,
    renderer: Option<TerminalRenderer>,
    /// True while we own the real terminal (raw mode, alternate screen)
    entered: bool,
}

impl TerminalSimulator {
    /// Take over the terminal (raw mode, alternate screen).
    pub fn open(relative: Option<f32>, shape: LedShape) -> Result<Self> {
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        log::info!(
            "terminal simulator opened: {}x{} LEDs, {:?}",
            SIM_COLUMNS,
            SIM_ROWS,
            shape
        );

        let mut sim = Self::detached(relative, shape);
        sim.renderer = Some(renderer);
        sim.entered = true;
        Ok(sim)
    }

    /// Simulator without a terminal: flush only updates the LED state.
    pub fn detached(relative: Option<f32>, shape: LedShape) -> Self {
        Self {
            model: ColorModel::simulator(relative),
            view: MatrixView::new(SIM_COLUMNS, SIM_ROWS, shape),
            leds: vec![Rgb::BLACK; SIM_COLUMNS as usize * SIM_ROWS as usize],
            renderer: None,
            entered: false,
        }
    }

    /// Simulator painting into `out` at the top-left corner, unthrottled.
    pub fn with_writer(relative: Option<f32>, shape: LedShape, out: Box<dyn Write + Send>) -> Self {
        let mut sim = Self::detached(relative, shape);
        sim.renderer = Some(TerminalRenderer::with_writer(out));
        sim
    }

    /// Terminal size needed to show the whole matrix with its border
    pub fn min_size() -> (u16, u16) {
        MatrixView::new(SIM_COLUMNS, SIM_ROWS, LedShape::default()).size()
    }

    /// Current channel values of the LED at (column, row)
    pub fn led(&self, column: u16, row: u16) -> Option<Rgb> {
        if column >= SIM_COLUMNS || row >= SIM_ROWS {
            return None;
        }
        Some(self.leds[row as usize * SIM_COLUMNS as usize + column as usize])
    }

    /// Where the matrix goes this frame: centered in the real terminal,
    /// top-left otherwise
    fn current_view(&self) -> MatrixView {
        if !self.entered {
            return self.view;
        }
        match crossterm::terminal::size() {
            Ok((width, height)) => self.view.centered(width, height),
            Err(_) => self.view,
        }
    }
}

impl PixelOutput for TerminalSimulator {
    fn dimensions(&self) -> (u16, u16) {
        (SIM_COLUMNS, SIM_ROWS)
    }

    fn color_model(&self) -> &ColorModel {
        &self.model
    }

    fn fill(&mut self, color: Color, brightness: Option<Brightness>) {
        let rgb = self.model.to_channels(color, brightness);
        self.leds.fill(rgb);
    }

    fn set_pixel(&mut self, column: u16, row: u16, color: Color, brightness: Option<Brightness>) {
        let rgb = self.model.to_channels(color, brightness);
        self.leds[row as usize * SIM_COLUMNS as usize + column as usize] = rgb;
    }

    fn flush(&mut self) -> Result<()> {
        if self.entered {
            thread::sleep(transfer_time(self.leds.len()));
        }

        let view = self.current_view();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.draw(view, &self.leds)?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut renderer) = self.renderer.take() {
            if self.entered {
                self.entered = false;
                renderer.exit()?;
                log::info!("terminal simulator closed");
            }
        }
        Ok(())
    }
}

impl Drop for TerminalSimulator {
    fn drop(&mut self) {
        // Always try to restore terminal state.
        let _ = self.close();
    }
}
