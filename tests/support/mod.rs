//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;

use led_arcade::core::{Catalog, ColorModel, PixelOutput, Screen};
use led_arcade::types::{Brightness, Color};

/// What the device has been told so far.
#[derive(Debug, Default)]
pub struct DeviceLog {
    pub columns: u16,
    pub rows: u16,
    /// Current color per cell, row-major
    pub cells: Vec<Color>,
    /// Every `set_pixel` call, in order
    pub writes: Vec<(u16, u16, Color, Option<Brightness>)>,
    pub fills: usize,
    pub flushes: usize,
    pub closed: bool,
}

impl DeviceLog {
    pub fn color(&self, column: u16, row: u16) -> Color {
        self.cells[row as usize * self.columns as usize + column as usize]
    }
}

/// `PixelOutput` that records everything into a shared [`DeviceLog`].
pub struct RecordingPixels {
    log: Arc<Mutex<DeviceLog>>,
    model: ColorModel,
}

impl RecordingPixels {
    pub fn new(columns: u16, rows: u16) -> (Self, Arc<Mutex<DeviceLog>>) {
        let log = Arc::new(Mutex::new(DeviceLog {
            columns,
            rows,
            cells: vec![Color::Off; columns as usize * rows as usize],
            ..DeviceLog::default()
        }));
        let pixels = Self {
            log: Arc::clone(&log),
            model: ColorModel::default(),
        };
        (pixels, log)
    }
}

impl PixelOutput for RecordingPixels {
    fn dimensions(&self) -> (u16, u16) {
        let log = self.log.lock().unwrap();
        (log.columns, log.rows)
    }

    fn color_model(&self) -> &ColorModel {
        &self.model
    }

    fn fill(&mut self, color: Color, _brightness: Option<Brightness>) {
        let mut log = self.log.lock().unwrap();
        log.cells.fill(color);
        log.fills += 1;
    }

    fn set_pixel(&mut self, column: u16, row: u16, color: Color, brightness: Option<Brightness>) {
        let mut log = self.log.lock().unwrap();
        let index = row as usize * log.columns as usize + column as usize;
        log.cells[index] = color;
        log.writes.push((column, row, color, brightness));
    }

    fn flush(&mut self) -> Result<()> {
        self.log.lock().unwrap().flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.log.lock().unwrap().closed = true;
        Ok(())
    }
}

/// Screen over a recording device.
pub fn recording_screen(columns: u16, rows: u16) -> (Screen, Arc<Mutex<DeviceLog>>) {
    let (pixels, log) = RecordingPixels::new(columns, rows);
    let screen = Screen::new(Box::new(pixels)).unwrap();
    (screen, log)
}

/// The bundled sprite asset
pub fn bundled_catalog() -> Catalog {
    Catalog::load(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/sprites.csv")).unwrap()
}
