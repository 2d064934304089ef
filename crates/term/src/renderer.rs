//! TerminalRenderer: paints the LED grid into a terminal.
//!
//! The first frame, and any frame after the view moved (terminal resize), is
//! painted in full: clear, border, every LED. After that only LEDs whose
//! color changed are repainted, with one cursor move per run of adjacent
//! changed LEDs in a row.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::types::Rgb;

/// Terminal columns per LED
pub const LED_WIDTH: u16 = 2;

/// Color of an LED that is off, so the grid stays visible
pub const UNLIT: Rgb = Rgb::new(40, 40, 40);

const BORDER: Rgb = Rgb::new(90, 90, 90);

/// How one LED is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedShape {
    #[default]
    Circle,
    Square,
}

impl LedShape {
    /// Parse shape name (case-insensitive): "circle" or "square"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circle" => Some(LedShape::Circle),
            "square" => Some(LedShape::Square),
            _ => None,
        }
    }

    /// The two characters of one LED showing `rgb`, and their color
    pub fn glyphs(&self, rgb: Rgb) -> ([char; 2], Rgb) {
        if rgb == Rgb::BLACK {
            return (['·', ' '], UNLIT);
        }
        match self {
            LedShape::Circle => (['●', ' '], rgb),
            LedShape::Square => (['█', '█'], rgb),
        }
    }
}

/// Where the matrix sits in the terminal and how its LEDs look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixView {
    pub columns: u16,
    pub rows: u16,
    /// Top-left corner of the border
    pub x: u16,
    pub y: u16,
    pub shape: LedShape,
}

impl MatrixView {
    /// View anchored at the top-left corner of the terminal.
    pub fn new(columns: u16, rows: u16, shape: LedShape) -> Self {
        Self {
            columns,
            rows,
            x: 0,
            y: 0,
            shape,
        }
    }

    /// Terminal size of the matrix including its border
    pub fn size(&self) -> (u16, u16) {
        (self.columns * LED_WIDTH + 2, self.rows + 2)
    }

    /// Same view centered in a `width` x `height` terminal.
    ///
    /// A terminal smaller than the matrix keeps it at the top-left corner.
    pub fn centered(self, width: u16, height: u16) -> Self {
        let (w, h) = self.size();
        Self {
            x: width.saturating_sub(w) / 2,
            y: height.saturating_sub(h) / 2,
            ..self
        }
    }

    /// Terminal cell of the left half of LED (column, row)
    fn led_origin(&self, column: u16, row: u16) -> (u16, u16) {
        (self.x + 1 + column * LED_WIDTH, self.y + 1 + row)
    }
}

/// Queues foreground changes, skipping ones that would not change anything.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    fg: Option<Rgb>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, fg: None }
    }

    fn color(&mut self, rgb: Rgb) -> Result<()> {
        if self.fg != Some(rgb) {
            self.out.queue(SetForegroundColor(Color::Rgb {
                r: rgb.r,
                g: rgb.g,
                b: rgb.b,
            }))?;
            self.fg = Some(rgb);
        }
        Ok(())
    }

    fn led(&mut self, shape: LedShape, rgb: Rgb) -> Result<()> {
        let ([left, right], fg) = shape.glyphs(rgb);
        self.color(fg)?;
        self.out.queue(Print(left))?;
        self.out.queue(Print(right))?;
        Ok(())
    }

    fn text(&mut self, rgb: Rgb, s: &str) -> Result<()> {
        self.color(rgb)?;
        self.out.queue(Print(s))?;
        Ok(())
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

/// Encode a full repaint of `leds` (row-major, `view.columns` per row).
pub fn encode_full_into(view: &MatrixView, leds: &[Rgb], out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::new(out);

    let rule = "─".repeat((view.columns * LED_WIDTH) as usize);
    pen.move_to(view.x, view.y)?;
    pen.text(BORDER, &format!("┌{rule}┐"))?;

    for row in 0..view.rows {
        pen.move_to(view.x, view.y + 1 + row)?;
        pen.text(BORDER, "│")?;
        for column in 0..view.columns {
            let rgb = leds
                .get(row as usize * view.columns as usize + column as usize)
                .copied()
                .unwrap_or(Rgb::BLACK);
            pen.led(view.shape, rgb)?;
        }
        pen.text(BORDER, "│")?;
    }

    pen.move_to(view.x, view.y + 1 + view.rows)?;
    pen.text(BORDER, &format!("└{rule}┘"))?;
    pen.finish()
}

/// Encode a repaint of the LEDs that differ between `prev` and `leds`.
pub fn encode_diff_into(view: &MatrixView, prev: &[Rgb], leds: &[Rgb], out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::new(out);
    let width = view.columns as usize;

    for (row, (before, after)) in prev.chunks(width).zip(leds.chunks(width)).enumerate() {
        let mut column = 0;
        while column < after.len() {
            if before.get(column) == Some(&after[column]) {
                column += 1;
                continue;
            }

            let (x, y) = view.led_origin(column as u16, row as u16);
            pen.move_to(x, y)?;
            while column < after.len() && before.get(column) != Some(&after[column]) {
                pen.led(view.shape, after[column])?;
                column += 1;
            }
        }
    }

    pen.finish()
}

pub struct TerminalRenderer {
    out: Box<dyn Write + Send>,
    /// View and LED colors of the last painted frame
    last: Option<(MatrixView, Vec<Rgb>)>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Render into any sink instead of stdout.
    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Paint `leds` through `view`, repainting only changed LEDs when the
    /// view is the same as last time.
    pub fn draw(&mut self, view: MatrixView, leds: &[Rgb]) -> Result<()> {
        self.buf.clear();
        match &mut self.last {
            Some((last_view, prev)) if *last_view == view && prev.len() == leds.len() => {
                encode_diff_into(&view, prev, leds, &mut self.buf)?;
                prev.copy_from_slice(leds);
            }
            _ => {
                encode_full_into(&view, leds, &mut self.buf)?;
                self.last = Some((view, leds.to_vec()));
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: &str = "\x1b[38;2;0;255;0m";

    fn text(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Cursor moves in an encoded frame; glyphs and colors never contain 'H'
    fn moves(s: &str) -> usize {
        s.matches('H').count()
    }

    #[test]
    fn full_frame_draws_border_and_every_led() {
        let view = MatrixView::new(3, 2, LedShape::Square);
        let mut leds = vec![Rgb::BLACK; 6];
        leds[4] = Rgb::new(0, 255, 0);

        let mut out = Vec::new();
        encode_full_into(&view, &leds, &mut out).unwrap();
        let s = text(&out);

        assert!(s.contains("┌──────┐"));
        assert!(s.contains("└──────┘"));
        assert_eq!(s.matches('·').count(), 5);
        assert!(s.contains(&format!("{GREEN}██")));
    }

    #[test]
    fn unchanged_frame_repaints_nothing() {
        let view = MatrixView::new(4, 2, LedShape::Circle);
        let leds = vec![Rgb::new(1, 2, 3); 8];

        let mut out = Vec::new();
        encode_diff_into(&view, &leds, &leds, &mut out).unwrap();

        let mut reset_only = Vec::new();
        reset_only.queue(ResetColor).unwrap();
        assert_eq!(out, reset_only);
    }

    #[test]
    fn adjacent_changes_share_one_cursor_move() {
        let view = MatrixView::new(6, 2, LedShape::Circle);
        let prev = vec![Rgb::BLACK; 12];

        let mut next = prev.clone();
        next[1] = Rgb::new(0, 255, 0);
        next[2] = Rgb::new(0, 255, 0);
        let mut out = Vec::new();
        encode_diff_into(&view, &prev, &next, &mut out).unwrap();
        let s = text(&out);
        assert_eq!(moves(&s), 1);
        assert_eq!(s.matches('●').count(), 2);
        // LED 1 sits right of the border and LED 0: column 1 + 2 = 3, 1-based 4
        assert!(s.contains("\x1b[2;4H"));

        next[5] = Rgb::new(0, 0, 255);
        next[6] = Rgb::new(0, 0, 255);
        out.clear();
        encode_diff_into(&view, &prev, &next, &mut out).unwrap();
        // Rows never merge into one run
        assert_eq!(moves(&text(&out)), 3);
    }

    #[test]
    fn centered_view_offsets_the_border() {
        let view = MatrixView::new(2, 1, LedShape::Circle).centered(16, 9);
        assert_eq!(view.size(), (6, 3));
        assert_eq!((view.x, view.y), (5, 3));
        assert_eq!(view.led_origin(1, 0), (8, 4));

        let cramped = MatrixView::new(2, 1, LedShape::Circle).centered(3, 1);
        assert_eq!((cramped.x, cramped.y), (0, 0));
    }

    #[test]
    fn draw_repaints_fully_only_when_the_view_moves() {
        let sink = SharedSink::default();
        let mut renderer = TerminalRenderer::with_writer(Box::new(sink.clone()));
        let view = MatrixView::new(3, 1, LedShape::Circle);
        let leds = vec![Rgb::BLACK; 3];

        renderer.draw(view, &leds).unwrap();
        let first = sink.len();
        renderer.draw(view, &leds).unwrap();
        let second = sink.len() - first;
        assert!(second < first);

        renderer.draw(view.centered(40, 10), &leds).unwrap();
        assert!(sink.len() - first - second >= first);
    }

    #[derive(Clone, Default)]
    struct SharedSink(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl SharedSink {
        fn len(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
