//! SPI device setup for the strip.
//!
//! spidev otherwise clocks at the node's `spi-max-frequency`, which on
//! Raspberry Pi overlays is far above what the WS2812 encoding assumes, so
//! the speed and mode are always set before the first frame.

use std::path::Path;

use anyhow::Result;

#[cfg(target_os = "linux")]
pub use linux::{open, options, SpiDevice};

#[cfg(not(target_os = "linux"))]
pub use other::{open, SpiDevice};

#[cfg(target_os = "linux")]
mod linux {
    use super::*;

    use anyhow::Context;
    use spidev::{SpiModeFlags, Spidev, SpidevOptions};

    use crate::SPI_CLOCK_HZ;

    pub type SpiDevice = Spidev;

    /// 8-bit words, mode 0, [`SPI_CLOCK_HZ`]
    pub fn options() -> SpidevOptions {
        SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(SPI_CLOCK_HZ)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build()
    }

    pub fn open(path: &Path) -> Result<SpiDevice> {
        let mut device = Spidev::open(path)
            .with_context(|| format!("failed to open SPI device {}", path.display()))?;
        device
            .configure(&options())
            .with_context(|| format!("failed to configure SPI device {}", path.display()))?;
        Ok(device)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn options_pin_clock_and_mode() {
            let options = options();
            assert_eq!(options.max_speed_hz, Some(SPI_CLOCK_HZ));
            assert_eq!(options.bits_per_word, Some(8));
            assert_eq!(options.spi_mode, Some(SpiModeFlags::SPI_MODE_0));
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod other {
    use super::*;

    pub type SpiDevice = std::fs::File;

    pub fn open(path: &Path) -> Result<SpiDevice> {
        anyhow::bail!("SPI device {} needs Linux spidev", path.display())
    }
}
