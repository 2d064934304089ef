//! Screen module - shadow frame buffer in front of a pixel output
//!
//! The screen keeps the last color and brightness written to every cell in a
//! flat row-major array, so game layers can read the canvas back without a
//! device round trip and can snapshot/restore it around overlays.
//! Coordinates: (column, row), column 0..=last_column left to right, row
//! 0..=last_row top to bottom. Writes outside the canvas are dropped.

use anyhow::Result;

use crate::pixels::PixelOutput;
use crate::types::{Brightness, Color};

/// One shadow cell: what was last written there.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pixel {
    pub color: Color,
    pub brightness: Option<Brightness>,
}

impl Pixel {
    pub const OFF: Pixel = Pixel {
        color: Color::Off,
        brightness: None,
    };

    pub fn new(color: Color, brightness: Option<Brightness>) -> Self {
        Self { color, brightness }
    }
}

/// Orientation of [`Screen::draw_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawDirection {
    Horizontal,
    Vertical,
}

/// How [`Screen::draw_rectangle`] paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectStyle {
    Filled,
    Outline,
}

/// Deep copy of the shadow buffer, taken by [`Screen::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSnapshot {
    columns: u16,
    rows: u16,
    cells: Vec<Pixel>,
}

impl ScreenSnapshot {
    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Cell at (column, row), `None` outside the canvas
    pub fn get(&self, column: i32, row: i32) -> Option<Pixel> {
        index(self.columns, self.rows, column, row).map(|i| self.cells[i])
    }

    /// One full row of cells
    ///
    /// Panics if `row` is outside the canvas.
    pub fn row(&self, row: u16) -> &[Pixel] {
        assert!(row < self.rows, "row {} outside canvas of {} rows", row, self.rows);
        let start = row as usize * self.columns as usize;
        &self.cells[start..start + self.columns as usize]
    }

    pub fn cells(&self) -> &[Pixel] {
        &self.cells
    }
}

#[inline(always)]
fn index(columns: u16, rows: u16, column: i32, row: i32) -> Option<usize> {
    if column < 0 || row < 0 || column >= columns as i32 || row >= rows as i32 {
        return None;
    }
    Some(row as usize * columns as usize + column as usize)
}

/// The frame buffer every sprite and text write goes through.
pub struct Screen {
    pixels: Box<dyn PixelOutput>,
    columns: u16,
    rows: u16,
    memory: Vec<Pixel>,
}

impl Screen {
    /// Wrap an output and clear it.
    pub fn new(pixels: Box<dyn PixelOutput>) -> Result<Self> {
        let (columns, rows) = pixels.dimensions();
        let mut screen = Self {
            pixels,
            columns,
            rows,
            memory: vec![Pixel::OFF; columns as usize * rows as usize],
        };
        screen.clear()?;
        log::debug!("screen ready: {}x{}", columns, rows);
        Ok(screen)
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn last_column(&self) -> i32 {
        self.columns as i32 - 1
    }

    pub fn last_row(&self) -> i32 {
        self.rows as i32 - 1
    }

    /// The output behind this screen
    pub fn pixels(&self) -> &dyn PixelOutput {
        self.pixels.as_ref()
    }

    /// Check if (column, row) is on the canvas
    pub fn on_screen(&self, column: i32, row: i32) -> bool {
        index(self.columns, self.rows, column, row).is_some()
    }

    /// Flush buffered writes to the device.
    ///
    /// Batch all `set_pixel` calls of a tick, then call this once.
    pub fn update(&mut self) -> Result<()> {
        self.pixels.flush()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.fill(Color::Off, None)
    }

    /// Paint every cell and flush immediately.
    pub fn fill(&mut self, color: Color, brightness: Option<Brightness>) -> Result<()> {
        self.pixels.fill(color, brightness);
        self.memory.fill(Pixel::new(color, brightness));
        self.pixels.flush()
    }

    /// Write one cell (buffered until [`Screen::update`]). No-op off canvas.
    pub fn set_pixel(&mut self, column: i32, row: i32, color: Color, brightness: Option<Brightness>) {
        let Some(i) = index(self.columns, self.rows, column, row) else {
            return;
        };
        self.pixels
            .set_pixel(column as u16, row as u16, color, brightness);
        self.memory[i] = Pixel::new(color, brightness);
    }

    pub fn clear_pixel(&mut self, column: i32, row: i32) {
        self.set_pixel(column, row, Color::Off, None);
    }

    /// Read back the last write to (column, row), `None` off canvas
    pub fn get_pixel(&self, column: i32, row: i32) -> Option<Pixel> {
        index(self.columns, self.rows, column, row).map(|i| self.memory[i])
    }

    /// Deep copy of the whole shadow buffer
    pub fn save(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            columns: self.columns,
            rows: self.rows,
            cells: self.memory.clone(),
        }
    }

    /// Rewrite every cell from `snapshot` and flush.
    ///
    /// Panics if the snapshot was taken from a screen of another size.
    pub fn restore(&mut self, snapshot: &ScreenSnapshot) -> Result<()> {
        assert_eq!(
            (snapshot.columns, snapshot.rows),
            (self.columns, self.rows),
            "snapshot size does not match the screen"
        );
        for row in 0..self.rows as i32 {
            for column in 0..self.columns as i32 {
                let i = row as usize * self.columns as usize + column as usize;
                let cell = snapshot.cells[i];
                self.set_pixel(column, row, cell.color, cell.brightness);
            }
        }
        self.update()
    }

    /// Axis-aligned run of `length` cells starting at (column, row).
    pub fn draw_line(
        &mut self,
        column: i32,
        row: i32,
        direction: DrawDirection,
        length: i32,
        color: Color,
        brightness: Option<Brightness>,
    ) {
        match direction {
            DrawDirection::Horizontal => {
                for c in column..column + length {
                    self.set_pixel(c, row, color, brightness);
                }
            }
            DrawDirection::Vertical => {
                for r in row..row + length {
                    self.set_pixel(column, r, color, brightness);
                }
            }
        }
    }

    /// Rectangle with inclusive corners (from) and (to).
    pub fn draw_rectangle(
        &mut self,
        from_column: i32,
        from_row: i32,
        to_column: i32,
        to_row: i32,
        color: Color,
        brightness: Option<Brightness>,
        style: RectStyle,
    ) {
        let columns = to_column - from_column + 1;
        let rows = to_row - from_row + 1;

        match style {
            RectStyle::Filled => {
                for row in from_row..=to_row {
                    self.draw_line(from_column, row, DrawDirection::Horizontal, columns, color, brightness);
                }
            }
            RectStyle::Outline => {
                self.draw_line(from_column, from_row, DrawDirection::Horizontal, columns, color, brightness);
                self.draw_line(from_column, to_row, DrawDirection::Horizontal, columns, color, brightness);
                self.draw_line(from_column, from_row, DrawDirection::Vertical, rows, color, brightness);
                self.draw_line(to_column, from_row, DrawDirection::Vertical, rows, color, brightness);
            }
        }
    }

    /// Clear the canvas and release the output.
    pub fn close(&mut self) -> Result<()> {
        self.clear()?;
        self.pixels.close()
    }
}
