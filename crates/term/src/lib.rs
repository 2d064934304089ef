//! Terminal LED matrix simulator.
//!
//! Paints the LED canvas into the terminal with crossterm, two character
//! cells per LED so the matrix keeps its square aspect ratio.
//!
//! - [`renderer`]: LED grid to terminal escape sequences, full or changed LEDs only
//! - [`simulator`]: the [`PixelOutput`](crate::core::PixelOutput) itself

pub mod renderer;
pub mod simulator;

pub use led_arcade_core as core;
pub use led_arcade_types as types;

pub use renderer::{encode_diff_into, encode_full_into, LedShape, MatrixView, TerminalRenderer};
pub use simulator::TerminalSimulator;
