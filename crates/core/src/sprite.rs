//! Sprite module - positioned instances of shared definitions
//!
//! A sprite owns only its mutable state (position, frame index, visibility,
//! brightness, under-save stack); the frames themselves live in an
//! `Arc<SpriteDefinition>` shared with every other sprite of the same kind.
//!
//! Drawing goes through the [`Screen`] passed to each call. Collision checks
//! never touch the screen: they compare frame bitmaps directly, so a sprite
//! that is hidden or painted over still collides, and an erased one never
//! does.
//!
//! Blocked moves and transforms are ordinary outcomes and return `false`.

use std::sync::{Arc, OnceLock};

use crate::definition::{SpriteDefinition, SpriteFrame};
use crate::screen::{Pixel, Screen};
use crate::types::{Brightness, Color, Direction};

/// Options for [`Sprite::try_move`].
///
/// ```
/// use led_arcade_core::MoveOptions;
///
/// let opts = MoveOptions::new().outside(3).pulsate();
/// assert_eq!(opts.outside, 3);
/// assert!(opts.walls.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOptions<'a> {
    /// How many cells the sprite may travel past each canvas edge
    pub outside: i32,
    /// Obstacles; the move fails if the new footprint overlaps any of them
    pub walls: &'a [Sprite],
    /// Advance the animation frame as part of the move
    pub pulsate: bool,
    /// Restore the pixels saved under the old footprint instead of erasing
    /// (nothing saved means nothing is touched), and save the pixels under
    /// the new one before drawing
    pub under_save: bool,
    /// Update the state only; do not erase or draw
    pub skip_draw: bool,
}

impl<'a> MoveOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outside(mut self, cells: i32) -> Self {
        self.outside = cells;
        self
    }

    pub fn walls(mut self, walls: &'a [Sprite]) -> Self {
        self.walls = walls;
        self
    }

    pub fn pulsate(mut self) -> Self {
        self.pulsate = true;
        self
    }

    pub fn under_save(mut self) -> Self {
        self.under_save = true;
        self
    }

    pub fn skip_draw(mut self) -> Self {
        self.skip_draw = true;
        self
    }
}

/// Options for [`Sprite::transform`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions<'a> {
    /// Target frame; `None` advances by one. Past the last frame wraps to 0.
    pub frame: Option<usize>,
    pub walls: &'a [Sprite],
    pub skip_draw: bool,
}

impl<'a> TransformOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(mut self, frame: usize) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn walls(mut self, walls: &'a [Sprite]) -> Self {
        self.walls = walls;
        self
    }

    pub fn skip_draw(mut self) -> Self {
        self.skip_draw = true;
        self
    }
}

/// Options for [`Sprite::draw_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawOptions {
    /// Paint every lit cell in this color instead of its own
    pub color: Option<Color>,
    /// Overrides the sprite's own brightness for this draw
    pub brightness: Option<Brightness>,
    /// Capture the pixels about to be overwritten
    pub under_save: bool,
}

/// A screen pixel captured before a sprite covered it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct UnderPixel {
    column: i32,
    row: i32,
    pixel: Pixel,
}

/// Shared 1x1 definitions used by fragments, one per color.
fn single_cell(color: Color) -> Arc<SpriteDefinition> {
    static CELLS: OnceLock<Vec<Arc<SpriteDefinition>>> = OnceLock::new();
    let cells = CELLS.get_or_init(|| {
        Color::PALETTE
            .iter()
            .map(|c| Arc::new(SpriteDefinition::single(*c)))
            .collect()
    });
    match Color::PALETTE.iter().position(|c| *c == color) {
        Some(i) => Arc::clone(&cells[i]),
        None => Arc::new(SpriteDefinition::single(color)),
    }
}

/// A positioned, mutable instance of a sprite definition.
#[derive(Debug, Clone)]
pub struct Sprite {
    definition: Arc<SpriteDefinition>,
    frame: usize,
    column: i32,
    row: i32,
    brightness: Option<Brightness>,
    visible: bool,
    under_save: Vec<UnderPixel>,
}

impl Sprite {
    /// New sprite at (0, 0), frame 0, not yet drawn.
    pub fn new(definition: Arc<SpriteDefinition>) -> Self {
        Self {
            definition,
            frame: 0,
            column: 0,
            row: 0,
            brightness: None,
            visible: false,
            under_save: Vec::new(),
        }
    }

    pub fn definition(&self) -> &Arc<SpriteDefinition> {
        &self.definition
    }

    pub fn current_frame(&self) -> &SpriteFrame {
        self.definition.frame(self.frame)
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.definition.frame_count()
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn position(&self) -> (i32, i32) {
        (self.column, self.row)
    }

    /// Top-center cell, e.g. where a ship fires from
    pub fn middle_position(&self) -> (i32, i32) {
        (self.column + self.width() / 2, self.row)
    }

    /// Width of the current frame
    pub fn width(&self) -> i32 {
        self.current_frame().width() as i32
    }

    /// Height of the current frame
    pub fn height(&self) -> i32 {
        self.current_frame().height() as i32
    }

    /// True if the last draw used a real color (not an erase)
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    /// Brightness used by later draws that don't override it
    pub fn set_brightness(&mut self, brightness: Option<Brightness>) {
        self.brightness = brightness;
    }

    /// Check if the whole current frame lies on the canvas
    pub fn on_screen(&self, screen: &Screen) -> bool {
        self.column >= 0
            && self.row >= 0
            && self.column + self.width() <= screen.columns() as i32
            && self.row + self.height() <= screen.rows() as i32
    }

    /// Move to (column, row) and draw there.
    ///
    /// The old footprint is left as is; erase first if it must disappear.
    pub fn set_position(&mut self, screen: &mut Screen, column: i32, row: i32) {
        self.column = column;
        self.row = row;
        self.draw(screen);
    }

    /// Draw the current frame in its own colors.
    pub fn draw(&mut self, screen: &mut Screen) {
        self.draw_with(screen, DrawOptions::default());
    }

    pub fn draw_with(&mut self, screen: &mut Screen, options: DrawOptions) {
        self.visible = options.color != Some(Color::Off);

        if options.under_save {
            self.under_save.clear();
        }

        let brightness = if self.visible {
            options.brightness.or(self.brightness)
        } else {
            None
        };
        let definition = Arc::clone(&self.definition);
        for (dc, dr, own) in definition.frame(self.frame).occupied() {
            let column = self.column + dc;
            let row = self.row + dr;
            let color = options.color.unwrap_or(own);

            if options.under_save {
                if let Some(pixel) = screen.get_pixel(column, row) {
                    self.under_save.push(UnderPixel { column, row, pixel });
                }
            }

            screen.set_pixel(column, row, color, brightness);
        }
    }

    /// Paint the current footprint `Off` and become invisible.
    pub fn erase(&mut self, screen: &mut Screen) {
        self.draw_with(
            screen,
            DrawOptions {
                color: Some(Color::Off),
                ..DrawOptions::default()
            },
        );
    }

    /// Put back the pixels saved by the last under-save draw.
    ///
    /// The saved pixels stay until the next under-save draw replaces them.
    fn restore_under(&self, screen: &mut Screen) {
        for under in &self.under_save {
            screen.set_pixel(under.column, under.row, under.pixel.color, under.pixel.brightness);
        }
    }

    fn next_frame_index(&self) -> usize {
        if self.frame + 1 > self.definition.last_frame() {
            0
        } else {
            self.frame + 1
        }
    }

    /// Shift one cell in `direction`.
    ///
    /// Fails, changing nothing, if the new footprint would pass a canvas edge
    /// by more than `options.outside` cells or would overlap a wall. With
    /// `pulsate` the bounds and walls are checked against the next frame.
    pub fn try_move(&mut self, screen: &mut Screen, direction: Direction, options: &MoveOptions) -> bool {
        let frame = if options.pulsate {
            self.next_frame_index()
        } else {
            self.frame
        };
        let shape = self.definition.frame(frame);
        let (dc, dr) = direction.offset();
        let column = self.column + dc;
        let row = self.row + dr;
        let outside = options.outside;

        let in_bounds = match direction {
            Direction::Up => row >= -outside,
            Direction::Left => column >= -outside,
            Direction::Down => row + shape.height() as i32 <= screen.rows() as i32 + outside,
            Direction::Right => column + shape.width() as i32 <= screen.columns() as i32 + outside,
        };
        if !in_bounds {
            return false;
        }

        if self.collides_with_any(options.walls, Some((column, row)), Some(frame)) {
            return false;
        }

        if options.under_save {
            self.restore_under(screen);
        } else if !options.skip_draw {
            self.erase(screen);
        }

        self.frame = frame;
        self.column = column;
        self.row = row;

        if !options.skip_draw {
            self.draw_with(
                screen,
                DrawOptions {
                    under_save: options.under_save,
                    ..DrawOptions::default()
                },
            );
        }
        true
    }

    /// Switch to another animation frame in place.
    ///
    /// Fails, changing nothing, if the target frame overlaps a wall at the
    /// current position (frames may differ in size, e.g. a rotating piece).
    pub fn transform(&mut self, screen: &mut Screen, options: &TransformOptions) -> bool {
        let mut target = options.frame.unwrap_or(self.frame + 1);
        if target > self.definition.last_frame() {
            target = 0;
        }

        if self.collides_with_any(options.walls, None, Some(target)) {
            return false;
        }

        if options.skip_draw {
            self.frame = target;
        } else {
            self.erase(screen);
            self.frame = target;
            self.draw(screen);
        }
        true
    }

    /// Erase and split into one single-cell sprite per lit cell.
    ///
    /// The pieces are drawn at their absolute positions, row by row.
    pub fn fragment(&mut self, screen: &mut Screen) -> Vec<Sprite> {
        self.erase(screen);

        let (column, row) = self.position();
        let definition = Arc::clone(&self.definition);
        let pieces: Vec<Sprite> = definition
            .frame(self.frame)
            .occupied()
            .map(|(dc, dr, color)| {
                let mut piece = Sprite::new(single_cell(color));
                piece.set_position(screen, column + dc, row + dr);
                piece
            })
            .collect();

        log::debug!("fragmented sprite at ({}, {}) into {} pieces", column, row, pieces.len());
        pieces
    }

    /// Pixel-exact overlap test.
    ///
    /// `position` and `frame` replace this sprite's own values for the test;
    /// `other` is always taken as it is. Both sprites must be visible.
    ///
    /// Panics if `frame` is not a frame of this sprite.
    pub fn is_colliding(&self, other: &Sprite, position: Option<(i32, i32)>, frame: Option<usize>) -> bool {
        if !(self.visible && other.visible) {
            return false;
        }

        let (column, row) = position.unwrap_or((self.column, self.row));
        let mine = self.definition.frame(frame.unwrap_or(self.frame));
        let theirs = other.current_frame();

        // Offset of our origin in their frame's coordinates.
        let dx = column - other.column;
        let dy = row - other.row;

        if dx >= theirs.width() as i32
            || dy >= theirs.height() as i32
            || dx + (mine.width() as i32) <= 0
            || dy + (mine.height() as i32) <= 0
        {
            return false;
        }

        mine.occupied().any(|(c, r, _)| theirs.is_occupied(c + dx, r + dy))
    }

    /// Every candidate this sprite collides with, in order.
    pub fn collisions<'s>(
        &self,
        candidates: impl IntoIterator<Item = &'s Sprite>,
        position: Option<(i32, i32)>,
        frame: Option<usize>,
    ) -> Vec<&'s Sprite> {
        candidates
            .into_iter()
            .filter(|other| self.is_colliding(other, position, frame))
            .collect()
    }

    /// Check if this sprite collides with at least one candidate
    pub fn collides_with_any<'s>(
        &self,
        candidates: impl IntoIterator<Item = &'s Sprite>,
        position: Option<(i32, i32)>,
        frame: Option<usize>,
    ) -> bool {
        candidates
            .into_iter()
            .any(|other| self.is_colliding(other, position, frame))
    }
}
