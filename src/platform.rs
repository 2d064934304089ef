//! Pick and open the pixel output for this run.

use anyhow::Result;

use crate::config::{ArcadeConfig, OutputKind};
use crate::core::PixelOutput;
use crate::strip::LedStrip;
use crate::term::TerminalSimulator;

/// Open the configured output (`Auto` resolved for this platform).
pub fn open_pixels(config: &ArcadeConfig) -> Result<Box<dyn PixelOutput>> {
    match config.output.resolve() {
        OutputKind::Strip => {
            let strip = LedStrip::open(&config.layout_path, &config.spi_device, config.brightness)?;
            Ok(Box::new(strip))
        }
        _ => {
            let sim = TerminalSimulator::open(config.brightness, config.shape)?;
            Ok(Box::new(sim))
        }
    }
}
