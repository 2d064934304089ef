//! LED arcade (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package
//! re-exports them as `led_arcade::{core,strip,term,types}` and adds the
//! application layer: configuration, settings, logging, output selection and
//! the engine context.

pub use led_arcade_core as core;
pub use led_arcade_strip as strip;
pub use led_arcade_term as term;
pub use led_arcade_types as types;

pub mod config;
pub mod context;
pub mod logging;
pub mod platform;
pub mod settings;
pub mod showcase;

pub use config::{ArcadeConfig, OutputKind};
pub use context::Arcade;
pub use settings::Settings;
