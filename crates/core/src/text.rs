//! Bitmap text - writes glyphs through the screen like any other drawing
//!
//! The font asset is a CSV grid with one glyph every six rows: five glyph
//! rows followed by one separator row. Glyphs appear in [`SYMBOLS`] order.
//! A glyph is as wide as its first fully empty column (or the whole row).

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::screen::{RectStyle, Screen};
use crate::types::{Brightness, Color, FONT_HEIGHT};

/// Symbols of the font asset, in file order
pub const SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Rows between the tops of two text lines
pub const LINE_PITCH: i32 = FONT_HEIGHT as i32 + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Glyph {
    /// Lit cells, column by column, top to bottom
    columns: Vec<[bool; FONT_HEIGHT as usize]>,
}

/// One text line: colored segments written left to right.
///
/// ```
/// use led_arcade_core::TextLine;
/// use led_arcade_core::types::Color;
///
/// let line = TextLine::new("12", Color::Magenta).then(" PTS", Color::Blue);
/// assert_eq!(line.segments().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    segments: Vec<(String, Color)>,
}

impl TextLine {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            segments: vec![(text.into(), color)],
        }
    }

    pub fn then(mut self, text: impl Into<String>, color: Color) -> Self {
        self.segments.push((text.into(), color));
        self
    }

    pub fn segments(&self) -> &[(String, Color)] {
        &self.segments
    }
}

/// A loaded bitmap font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    glyphs: Vec<Glyph>,
}

impl Font {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read font {}", path.display()))?;
        let font = Self::parse(&source).with_context(|| format!("malformed font {}", path.display()))?;
        log::info!("loaded {} glyphs from {}", font.glyphs.len(), path.display());
        Ok(font)
    }

    pub fn parse(source: &str) -> Result<Self> {
        let height = FONT_HEIGHT as usize;
        let rows: Vec<Vec<bool>> = source
            .lines()
            .enumerate()
            .filter(|(n, _)| n % (height + 1) != height)
            .map(|(_, line)| {
                line.trim_end_matches('\r')
                    .split(',')
                    .map(|cell| !cell.trim().is_empty())
                    .collect()
            })
            .collect();

        let symbols = SYMBOLS.chars().count();
        if rows.len() < symbols * height {
            bail!(
                "font has {} glyph rows, {} symbols need {}",
                rows.len(),
                symbols,
                symbols * height
            );
        }

        let glyphs = rows
            .chunks(height)
            .take(symbols)
            .map(|glyph_rows| {
                let max_width = glyph_rows.iter().map(Vec::len).max().unwrap_or(0);
                let lit = |row: usize, column: usize| glyph_rows[row].get(column).copied().unwrap_or(false);
                let columns = (0..max_width)
                    .map(|column| {
                        let mut cells = [false; FONT_HEIGHT as usize];
                        for (row, cell) in cells.iter_mut().enumerate() {
                            *cell = lit(row, column);
                        }
                        cells
                    })
                    .take_while(|cells| cells.iter().any(|c| *c))
                    .collect();
                Glyph { columns }
            })
            .collect::<Vec<_>>();

        if let Some(i) = glyphs.iter().position(|g| g.columns.is_empty()) {
            bail!("glyph {:?} is empty", SYMBOLS.chars().nth(i).unwrap_or('?'));
        }

        Ok(Self { glyphs })
    }

    fn glyph(&self, symbol: char) -> Option<&Glyph> {
        let symbol = symbol.to_ascii_uppercase();
        SYMBOLS
            .chars()
            .position(|s| s == symbol)
            .map(|i| &self.glyphs[i])
    }

    /// Width of `symbol` in columns, `None` if the font lacks it
    pub fn width_of(&self, symbol: char) -> Option<i32> {
        self.glyph(symbol).map(|g| g.columns.len() as i32)
    }

    /// Write one glyph with its top-left at (column, row); returns its width.
    ///
    /// Unlit glyph cells are written `Off`. Unknown symbols write nothing.
    pub fn write_letter(
        &self,
        screen: &mut Screen,
        symbol: char,
        column: i32,
        row: i32,
        color: Color,
        brightness: Option<Brightness>,
    ) -> i32 {
        let Some(glyph) = self.glyph(symbol) else {
            log::warn!("font has no glyph for {:?}", symbol);
            return 0;
        };

        for (dc, cells) in glyph.columns.iter().enumerate() {
            for (dr, lit) in cells.iter().enumerate() {
                let pixel_color = if *lit { color } else { Color::Off };
                screen.set_pixel(column + dc as i32, row + dr as i32, pixel_color, brightness);
            }
        }
        glyph.columns.len() as i32
    }

    /// Write `text` starting at (column, row); returns the next free column.
    ///
    /// Letters are one column apart, a space is one column wide.
    pub fn write_at(
        &self,
        screen: &mut Screen,
        text: &str,
        mut column: i32,
        row: i32,
        color: Color,
        brightness: Option<Brightness>,
    ) -> i32 {
        for symbol in text.chars() {
            if symbol == ' ' {
                column += 1;
                continue;
            }
            let width = self.write_letter(screen, symbol, column, row, color, brightness);
            if width > 0 {
                column += width + 1;
            }
        }
        column
    }

    /// Write whole lines from the top of the canvas.
    ///
    /// Each line's band is cleared before its segments are written.
    pub fn write(&self, screen: &mut Screen, lines: &[TextLine], brightness: Option<Brightness>) {
        for (n, line) in lines.iter().enumerate() {
            let row = n as i32 * LINE_PITCH;
            let last_column = screen.last_column();
            screen.draw_rectangle(
                0,
                row,
                last_column,
                row + FONT_HEIGHT as i32 - 1,
                Color::Off,
                None,
                RectStyle::Filled,
            );

            let mut column = 0;
            for (text, color) in line.segments() {
                column = self.write_at(screen, text, column, row, *color, brightness);
            }
        }
    }

    /// Width of `text` as [`Font::write_at`] would lay it out
    pub fn measure(&self, text: &str) -> i32 {
        text.chars()
            .map(|symbol| match symbol {
                ' ' => 1,
                s => self.width_of(s).map(|w| w + 1).unwrap_or(0),
            })
            .sum()
    }
}
