//! The engine context handed to every game.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::ArcadeConfig;
use crate::core::{Catalog, Font, PixelOutput, Screen, Sprite};
use crate::platform::open_pixels;
use crate::settings::Settings;
use crate::types::SpriteId;

/// Everything a game needs: the screen, the shared assets and its settings.
pub struct Arcade {
    pub screen: Screen,
    pub catalog: Arc<Catalog>,
    pub font: Arc<Font>,
    pub settings: Settings,
}

impl Arcade {
    /// Load the assets and settings, then open the configured output.
    ///
    /// Assets load first so a bad file never leaves the terminal in raw mode.
    pub fn from_config(config: &ArcadeConfig) -> Result<Self> {
        let catalog = Catalog::load(&config.sprites_path)?;
        let font = Font::load(&config.font_path)?;
        let settings = Settings::open(&config.settings_path)?;
        let pixels = open_pixels(config)?;
        Self::with_pixels(pixels, catalog, font, settings)
    }

    pub fn with_pixels(
        pixels: Box<dyn PixelOutput>,
        catalog: Catalog,
        font: Font,
        settings: Settings,
    ) -> Result<Self> {
        let screen = Screen::new(pixels).context("failed to clear the screen")?;
        log::info!(
            "arcade ready: {}x{} canvas, {} sprite definitions",
            screen.columns(),
            screen.rows(),
            catalog.len()
        );
        Ok(Self {
            screen,
            catalog: Arc::new(catalog),
            font: Arc::new(font),
            settings,
        })
    }

    /// New sprite instance of a catalog entry
    pub fn sprite(&self, id: SpriteId) -> Sprite {
        self.catalog.get(id)
    }

    /// Blank the canvas and release the output.
    pub fn shutdown(&mut self) -> Result<()> {
        self.screen.close()?;
        log::info!("arcade shut down");
        Ok(())
    }
}
