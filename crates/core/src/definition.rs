//! Sprite definitions - immutable multi-frame bitmaps
//!
//! A definition is one animation cycle: an ordered list of rectangular frames.
//! Definitions are built once (by the catalog, or for single-cell fragments)
//! and then shared through `Arc` by every sprite of that kind.

use crate::types::Color;

/// One animation pose: a rectangular grid of colors, `Off` is transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteFrame {
    width: u16,
    height: u16,
    /// Row-major (row * width + column)
    cells: Vec<Color>,
}

impl SpriteFrame {
    /// Build a frame from rows of equal length.
    ///
    /// Panics on ragged or empty input; the catalog validates before calling.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        assert!(width > 0 && height > 0, "sprite frame must not be empty");
        assert!(
            rows.iter().all(|r| r.len() == width),
            "sprite frame rows must have equal width"
        );

        Self {
            width: width as u16,
            height: height as u16,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// A 1x1 frame
    pub fn single(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            cells: vec![color],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Color at frame-relative (column, row); `Off` outside the frame
    #[inline]
    pub fn get(&self, column: i32, row: i32) -> Color {
        if column < 0 || row < 0 || column >= self.width as i32 || row >= self.height as i32 {
            return Color::Off;
        }
        self.cells[row as usize * self.width as usize + column as usize]
    }

    /// Check if the frame-relative cell is lit
    #[inline]
    pub fn is_occupied(&self, column: i32, row: i32) -> bool {
        self.get(column, row).is_lit()
    }

    /// Lit cells as (column, row, color), row by row
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, Color)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_lit())
            .map(move |(i, c)| ((i % width) as i32, (i / width) as i32, *c))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_lit()).count()
    }
}

/// An ordered, non-empty animation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteDefinition {
    frames: Vec<SpriteFrame>,
}

impl SpriteDefinition {
    /// Panics if `frames` is empty.
    pub fn new(frames: Vec<SpriteFrame>) -> Self {
        assert!(!frames.is_empty(), "sprite definition needs at least one frame");
        Self { frames }
    }

    /// One frame, one lit cell
    pub fn single(color: Color) -> Self {
        Self::new(vec![SpriteFrame::single(color)])
    }

    /// Frame by index
    ///
    /// Panics if `index` is out of range.
    pub fn frame(&self, index: usize) -> &SpriteFrame {
        &self.frames[index]
    }

    pub fn frames(&self) -> &[SpriteFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame(&self) -> usize {
        self.frames.len() - 1
    }
}
