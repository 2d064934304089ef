//! Hardware showcase: exercises the screen, the font and every sprite.
//!
//! Each routine draws a few scenes and calls `pause` between them. `pause`
//! blocks for (about) the given duration and returns `true` once the viewer
//! asked to stop, which ends the routine early.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Catalog, Font, RectStyle, Screen, Sprite, TextLine, TransformOptions};
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished,
    Stopped,
}

/// Colors per row of the swatch grid
const SWATCHES_PER_ROW: usize = 4;

/// Transform rounds of the sprite parade
const PARADE_ROUNDS: usize = 10;

macro_rules! pause {
    ($pause:expr, $duration:expr) => {
        if $pause($duration)? {
            return Ok(Outcome::Stopped);
        }
    };
}

/// `q`, `Esc` and `Ctrl-C` stop the showcase.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Full-canvas fills, nested rectangles, then a swatch grid of every color.
pub fn screen_test<P>(screen: &mut Screen, tick: Duration, pause: &mut P) -> Result<Outcome>
where
    P: FnMut(Duration) -> Result<bool>,
{
    for color in Color::PALETTE {
        screen.fill(color, None)?;
        pause!(pause, tick);
    }
    screen.clear()?;

    for (i, color) in Color::PALETTE.into_iter().enumerate() {
        let i = i as i32;
        screen.draw_rectangle(
            i,
            i,
            screen.last_column() - i,
            screen.last_row() - i,
            color,
            None,
            RectStyle::Filled,
        );
    }
    screen.update()?;
    pause!(pause, tick * 4);
    screen.clear()?;

    let rows = Color::PALETTE.len().div_ceil(SWATCHES_PER_ROW);
    let width = (screen.columns() as usize / SWATCHES_PER_ROW) as i32;
    let height = (screen.rows() as usize / rows) as i32;
    for (i, color) in Color::PALETTE.into_iter().enumerate() {
        let column = (i % SWATCHES_PER_ROW) as i32 * width;
        let row = (i / SWATCHES_PER_ROW) as i32 * height;
        screen.draw_rectangle(
            column,
            row,
            column + width - 1,
            row + height - 1,
            color,
            None,
            RectStyle::Filled,
        );
    }
    screen.update()?;
    pause!(pause, tick * 4);
    screen.clear()?;

    Ok(Outcome::Finished)
}

/// Three colored lines of text.
pub fn text_test<P>(screen: &mut Screen, font: &Font, tick: Duration, pause: &mut P) -> Result<Outcome>
where
    P: FnMut(Duration) -> Result<bool>,
{
    let lines = [
        TextLine::new("LED", Color::Red),
        TextLine::new("SCREEN", Color::Green),
        TextLine::new("TEST", Color::Blue),
    ];
    font.write(screen, &lines, None);
    screen.update()?;
    pause!(pause, tick * 2);
    screen.clear()?;

    Ok(Outcome::Finished)
}

/// Lay every catalog entry out in columns, top to bottom.
pub fn parade(screen: &mut Screen, catalog: &Catalog) -> Vec<Sprite> {
    let mut sprites: Vec<Sprite> = catalog.iter().map(|d| Sprite::new(d.clone())).collect();

    let (mut column, mut row, mut max_width) = (0, 0, 0);
    for sprite in &mut sprites {
        max_width = max_width.max(sprite.width());
        if row + sprite.height() > screen.rows() as i32 {
            row = 0;
            column += max_width + 1;
            max_width = sprite.width();
        }
        sprite.set_position(screen, column, row);
        row += sprite.height() + 1;
    }
    sprites
}

/// Show every sprite and cycle through its frames.
pub fn catalog_test<P>(screen: &mut Screen, catalog: &Catalog, tick: Duration, pause: &mut P) -> Result<Outcome>
where
    P: FnMut(Duration) -> Result<bool>,
{
    screen.clear()?;
    let mut sprites = parade(screen, catalog);
    screen.update()?;

    for _ in 0..PARADE_ROUNDS {
        for sprite in &mut sprites {
            sprite.transform(screen, &TransformOptions::new());
        }
        screen.update()?;
        pause!(pause, tick);
    }
    screen.clear()?;

    Ok(Outcome::Finished)
}

/// All three routines in order.
pub fn run_all<P>(
    screen: &mut Screen,
    font: &Font,
    catalog: &Catalog,
    tick: Duration,
    pause: &mut P,
) -> Result<Outcome>
where
    P: FnMut(Duration) -> Result<bool>,
{
    if screen_test(screen, tick, pause)? == Outcome::Stopped {
        return Ok(Outcome::Stopped);
    }
    if text_test(screen, font, tick, pause)? == Outcome::Stopped {
        return Ok(Outcome::Stopped);
    }
    catalog_test(screen, catalog, tick, pause)
}
