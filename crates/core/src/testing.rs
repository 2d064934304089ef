//! Test doubles shared by the unit tests of this crate.

use anyhow::Result;

use crate::color::ColorModel;
use crate::pixels::PixelOutput;
use crate::screen::Screen;
use crate::types::{Brightness, Color};

/// Output that accepts everything and counts flushes.
pub struct NullPixels {
    pub columns: u16,
    pub rows: u16,
    pub model: ColorModel,
    pub flushes: usize,
}

impl PixelOutput for NullPixels {
    fn dimensions(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    fn color_model(&self) -> &ColorModel {
        &self.model
    }

    fn fill(&mut self, _color: Color, _brightness: Option<Brightness>) {}

    fn set_pixel(&mut self, _column: u16, _row: u16, _color: Color, _brightness: Option<Brightness>) {}

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

pub fn null_screen(columns: u16, rows: u16) -> Screen {
    Screen::new(Box::new(NullPixels {
        columns,
        rows,
        model: ColorModel::default(),
        flushes: 0,
    }))
    .unwrap()
}
