//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no external dependencies, so they can be used
//! by the compositing core, the output drivers and the game rule layers alike.
//!
//! # Canvas
//!
//! The terminal simulator emulates the reference LED matrix:
//!
//! - **Width**: 24 columns (indexed 0-23)
//! - **Height**: 18 rows (indexed 0-17)
//!
//! The strip driver takes its dimensions from its layout file instead.
//!
//! # Colors
//!
//! Colors are *logical*: they only turn into channel intensities when a pixel
//! output writes them. [`Color::Off`] is the background and is never drawn as
//! a sprite pixel.
//!
//! | Letter | Color |
//! |--------|-------|
//! | `W` | White |
//! | `Y` | Yellow |
//! | `O` | Orange |
//! | `R` | Red |
//! | `F` | Fuchsia |
//! | `M` | Magenta |
//! | `P` | Purple |
//! | `B` | Blue |
//! | `A` | Aqua |
//! | `C` | Cyan |
//! | `T` | Turquoise |
//! | `G` | Green |
//! | `L` | Lime |
//!
//! # Examples
//!
//! ```
//! use led_arcade_types::{Color, Direction, SIM_COLUMNS, SIM_ROWS};
//!
//! // Parse a color letter from an asset file
//! assert_eq!(Color::from_letter("R"), Color::Red);
//! assert_eq!(Color::from_letter(""), Color::Off);
//!
//! // Directions know their unit offset
//! assert_eq!(Direction::Left.offset(), (-1, 0));
//!
//! // Simulator dimensions
//! assert_eq!(SIM_COLUMNS, 24);
//! assert_eq!(SIM_ROWS, 18);
//! ```

/// Simulator canvas width in cells (24 columns)
pub const SIM_COLUMNS: u16 = 24;

/// Simulator canvas height in cells (18 rows)
pub const SIM_ROWS: u16 = 18;

/// Bits clocked out per LED (8 bits each for G, R, B)
pub const BITS_PER_PIXEL: u32 = 24;

/// WS2812 bit period in nanoseconds (800 kHz)
pub const BIT_PERIOD_NS: u64 = 1_250;

/// Height of a font glyph in rows
pub const FONT_HEIGHT: u16 = 5;

/// The logical colors a pixel can show
///
/// The order matches the letter table of the asset format, with `Off` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Off,
    White,
    Yellow,
    Orange,
    Red,
    Fuchsia,
    Magenta,
    Purple,
    Blue,
    Aqua,
    Cyan,
    Turquoise,
    Green,
    Lime,
}

impl Color {
    /// Every drawable color, in letter-table order
    pub const PALETTE: [Color; 13] = [
        Color::White,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::Fuchsia,
        Color::Magenta,
        Color::Purple,
        Color::Blue,
        Color::Aqua,
        Color::Cyan,
        Color::Turquoise,
        Color::Green,
        Color::Lime,
    ];

    /// Parse an asset cell (exact, case-sensitive letter)
    ///
    /// Anything that is not a known letter, including the empty cell, is `Off`.
    ///
    /// # Examples
    ///
    /// ```
    /// use led_arcade_types::Color;
    ///
    /// assert_eq!(Color::from_letter("W"), Color::White);
    /// assert_eq!(Color::from_letter("T"), Color::Turquoise);
    /// assert_eq!(Color::from_letter("w"), Color::Off);
    /// assert_eq!(Color::from_letter("X"), Color::Off);
    /// ```
    pub fn from_letter(s: &str) -> Self {
        match s {
            "W" => Color::White,
            "Y" => Color::Yellow,
            "O" => Color::Orange,
            "R" => Color::Red,
            "F" => Color::Fuchsia,
            "M" => Color::Magenta,
            "P" => Color::Purple,
            "B" => Color::Blue,
            "A" => Color::Aqua,
            "C" => Color::Cyan,
            "T" => Color::Turquoise,
            "G" => Color::Green,
            "L" => Color::Lime,
            _ => Color::Off,
        }
    }

    /// Asset letter for this color (`None` for `Off`)
    pub fn letter(&self) -> Option<char> {
        match self {
            Color::Off => None,
            Color::White => Some('W'),
            Color::Yellow => Some('Y'),
            Color::Orange => Some('O'),
            Color::Red => Some('R'),
            Color::Fuchsia => Some('F'),
            Color::Magenta => Some('M'),
            Color::Purple => Some('P'),
            Color::Blue => Some('B'),
            Color::Aqua => Some('A'),
            Color::Cyan => Some('C'),
            Color::Turquoise => Some('T'),
            Color::Green => Some('G'),
            Color::Lime => Some('L'),
        }
    }

    /// True for every color except `Off`
    #[inline]
    pub fn is_lit(&self) -> bool {
        *self != Color::Off
    }

    /// Lowercase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Off => "off",
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Fuchsia => "fuchsia",
            Color::Magenta => "magenta",
            Color::Purple => "purple",
            Color::Blue => "blue",
            Color::Aqua => "aqua",
            Color::Cyan => "cyan",
            Color::Turquoise => "turquoise",
            Color::Green => "green",
            Color::Lime => "lime",
        }
    }
}

/// Per-write brightness override
///
/// `None` at a call site means "use the output's ambient brightness".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brightness {
    /// Multiplier applied to the output's base brightness
    Relative(f32),
    /// Peak channel intensity, regardless of the base brightness
    Max,
}

impl Brightness {
    /// Relative multiplier, if usable
    ///
    /// Negative or non-finite multipliers are not usable and yield `None`, so
    /// the caller falls back to its ambient setting.
    pub fn relative(&self) -> Option<f32> {
        match *self {
            Brightness::Relative(r) if r.is_finite() && r >= 0.0 => Some(r),
            _ => None,
        }
    }
}

/// 24-bit RGB channel intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned single-cell movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (column, row) delta of one step
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction pointing the other way
    ///
    /// # Examples
    ///
    /// ```
    /// use led_arcade_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Right.opposite(), Direction::Left);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Sprite kinds of the bundled `assets/sprites.csv`
///
/// The discriminant is the row-group index in the asset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Bullet = 0,
    EnemyBullet = 1,
    Rocket = 2,
    Ship = 3,
    EnemyFlipper = 4,
    EnemySquare = 5,
    EnemyFlasher = 6,
    EnemyShip = 7,
    EnemyLong = 8,
    EnemyShort = 9,
    EnemyBird = 10,
    EnemySpinner = 11,
    Frog = 12,
    Car = 13,
    Truck = 14,
    Wall = 15,
    PacMap = 16,
    PacMan = 17,
    Blinky = 18,
    Pinky = 19,
    Inky = 20,
    Clyde = 21,
    BlockJ = 22,
    BlockL = 23,
    BlockO = 24,
    BlockZ = 25,
    BlockS = 26,
    BlockT = 27,
    BlockI = 28,
}

impl SpriteId {
    /// Number of kinds in the bundled asset
    pub const COUNT: usize = 29;

    /// The seven falling-block pieces, in asset order
    pub const BLOCKS: [SpriteId; 7] = [
        SpriteId::BlockJ,
        SpriteId::BlockL,
        SpriteId::BlockO,
        SpriteId::BlockZ,
        SpriteId::BlockS,
        SpriteId::BlockT,
        SpriteId::BlockI,
    ];

    /// Row-group index in the asset file
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<SpriteId> for usize {
    fn from(id: SpriteId) -> Self {
        id.index()
    }
}
