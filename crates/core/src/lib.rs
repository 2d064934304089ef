//! Core engine module - compositing, sprites and collisions
//!
//! This crate holds everything the arcade games share below their rules:
//! the shadow frame buffer, the sprite catalog, sprite movement, animation,
//! collision and fragmentation, and bitmap text. It knows nothing about the
//! concrete display; every write goes through a [`PixelOutput`].
//!
//! - **Deterministic**: no clocks, no randomness, no input handling
//! - **Testable**: any `PixelOutput` will do, including an in-memory one
//! - **Shareable**: definitions, catalogs and fonts are immutable and `Sync`
//!
//! # Module Structure
//!
//! - [`color`]: logical color + brightness to channel intensities
//! - [`pixels`]: the pixel output capability
//! - [`screen`]: shadow frame buffer with save/restore and line drawing
//! - [`definition`]: immutable multi-frame sprite bitmaps
//! - [`catalog`]: sprite asset parsing
//! - [`sprite`]: positioned sprite instances
//! - [`text`]: bitmap font writer
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use led_arcade_core::Catalog;
//!
//! let catalog = Catalog::parse("W,W\nW,W\n\nR\n").unwrap();
//! assert_eq!(catalog.len(), 2);
//!
//! // Every sprite of a kind shares one definition
//! let a = catalog.get(0usize);
//! let b = catalog.get(0usize);
//! assert!(Arc::ptr_eq(a.definition(), b.definition()));
//! assert_eq!((a.width(), a.height()), (2, 2));
//! ```
//!
//! # Game loop
//!
//! One thread owns the [`Screen`] and every [`Sprite`]. Per tick it moves and
//! transforms sprites, then calls [`Screen::update`] exactly once.

pub mod catalog;
pub mod color;
pub mod definition;
pub mod pixels;
pub mod screen;
pub mod sprite;
pub mod text;

#[cfg(test)]
mod testing;

pub use led_arcade_types as types;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use color::ColorModel;
pub use definition::{SpriteDefinition, SpriteFrame};
pub use pixels::{transfer_time, PixelOutput};
pub use screen::{DrawDirection, Pixel, RectStyle, Screen, ScreenSnapshot};
pub use sprite::{DrawOptions, MoveOptions, Sprite, TransformOptions};
pub use text::{Font, TextLine};
