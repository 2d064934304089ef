//! Runtime configuration from `LED_ARCADE_*` environment variables.

use std::env;
use std::path::PathBuf;

use log::LevelFilter;

use crate::term::LedShape;

/// Which pixel output to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// Strip on the board, simulator anywhere else
    #[default]
    Auto,
    Simulator,
    Strip,
}

impl OutputKind {
    /// Parse output name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(OutputKind::Auto),
            "sim" | "simulator" | "terminal" => Some(OutputKind::Simulator),
            "strip" | "led" => Some(OutputKind::Strip),
            _ => None,
        }
    }

    /// Replace `Auto` with the output for the platform we were built for.
    pub fn resolve(self) -> Self {
        match self {
            OutputKind::Auto if cfg!(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64"))) => {
                OutputKind::Strip
            }
            OutputKind::Auto => OutputKind::Simulator,
            other => other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArcadeConfig {
    pub output: OutputKind,
    /// Ambient relative brightness; `None` keeps the output's base
    pub brightness: Option<f32>,
    pub sprites_path: PathBuf,
    pub font_path: PathBuf,
    pub layout_path: PathBuf,
    pub spi_device: PathBuf,
    pub shape: LedShape,
    pub settings_path: PathBuf,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// Delay between showcase ticks in milliseconds
    pub tick_ms: u64,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            output: OutputKind::Auto,
            brightness: None,
            sprites_path: PathBuf::from("assets/sprites.csv"),
            font_path: PathBuf::from("assets/font.csv"),
            layout_path: PathBuf::from("assets/layout.csv"),
            spi_device: PathBuf::from("/dev/spidev0.0"),
            shape: LedShape::Circle,
            settings_path: PathBuf::from("led-arcade.json"),
            log_path: None,
            log_level: LevelFilter::Info,
            tick_ms: 500,
        }
    }
}

impl ArcadeConfig {
    /// Create from environment variables; unparseable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ArcadeConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let path = |key: &str, default: PathBuf| var(key).map(PathBuf::from).unwrap_or(default);

        let output = var("LED_ARCADE_OUTPUT")
            .and_then(|s| OutputKind::from_str(&s))
            .unwrap_or(defaults.output);

        let brightness = var("LED_ARCADE_BRIGHTNESS")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|b| (0.0..=1.0).contains(b));

        let shape = var("LED_ARCADE_SHAPE")
            .and_then(|s| LedShape::from_str(&s))
            .unwrap_or(defaults.shape);

        let log_level = var("LED_ARCADE_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level);

        let tick_ms = var("LED_ARCADE_TICK_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.tick_ms);

        Self {
            output,
            brightness,
            sprites_path: path("LED_ARCADE_SPRITES", defaults.sprites_path),
            font_path: path("LED_ARCADE_FONT", defaults.font_path),
            layout_path: path("LED_ARCADE_LAYOUT", defaults.layout_path),
            spi_device: path("LED_ARCADE_SPI", defaults.spi_device),
            shape,
            settings_path: path("LED_ARCADE_SETTINGS", defaults.settings_path),
            log_path: var("LED_ARCADE_LOG_PATH").map(PathBuf::from),
            log_level,
            tick_ms,
        }
    }
}
