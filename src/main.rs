//! LED arcade showcase (default binary).
//!
//! Opens the configured pixel output (the strip on the board, the terminal
//! simulator elsewhere) and runs the screen, text and sprite showcases.
//! `q`, `Esc` or `Ctrl-C` stops it.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use led_arcade::showcase::{self, should_quit, Outcome};
use led_arcade::{logging, Arcade, ArcadeConfig};

fn main() -> Result<()> {
    let config = ArcadeConfig::from_env();
    logging::init(config.log_path.as_deref(), config.log_level)?;
    log::info!("starting with {:?}", config);

    let mut arcade = Arcade::from_config(&config)?;

    let result = run(&mut arcade, Duration::from_millis(config.tick_ms));

    // Always try to blank the canvas and restore the terminal.
    let _ = arcade.shutdown();
    log::logger().flush();
    result
}

fn run(arcade: &mut Arcade, tick: Duration) -> Result<()> {
    let Arcade {
        screen,
        catalog,
        font,
        ..
    } = arcade;

    let outcome = showcase::run_all(screen, font, catalog, tick, &mut wait_for_quit)?;
    if outcome == Outcome::Stopped {
        log::info!("showcase stopped by user");
    }
    Ok(())
}

/// Block for `duration` while watching the keyboard.
fn wait_for_quit(duration: Duration) -> Result<bool> {
    let deadline = Instant::now() + duration;
    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if timeout.is_zero() {
            return Ok(false);
        }
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    return Ok(true);
                }
            }
        }
    }
}
