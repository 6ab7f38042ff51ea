//! Driver loop integration.
//!
//! Reads one command per line, applies it to the [`SearchScreen`], waits for the screen to
//! settle, and writes the rendered screen. I/O handles are passed in so the loop runs
//! against in-memory buffers in tests.

use crate::model::{AppError, Command};
use crate::state::SearchScreen;
use crate::view;
use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Timing knobs for [`wait_until_settled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSettings {
    /// Sleep between pumps.
    pub poll_interval: Duration,
    /// Give up waiting after this long.
    pub settle_timeout: Duration,
}

impl DriverSettings {
    /// Build from the millisecond values carried in the config.
    pub fn from_millis(poll_interval_ms: u64, settle_timeout_ms: u64) -> Self {
        Self {
            poll_interval: Duration::from_millis(poll_interval_ms),
            settle_timeout: Duration::from_millis(settle_timeout_ms),
        }
    }
}

/// Pump deliveries until nothing is in flight or `settle_timeout` elapses.
///
/// Returns `true` if the screen settled. A timeout leaves in-flight fetches alone; they are
/// picked up by later pumps.
pub fn wait_until_settled(screen: &mut SearchScreen, settings: &DriverSettings) -> bool {
    let deadline = Instant::now() + settings.settle_timeout;
    loop {
        screen.pump();
        if screen.is_settled() {
            return true;
        }
        if Instant::now() >= deadline {
            warn!(timeout = ?settings.settle_timeout, "Screen did not settle");
            return false;
        }
        thread::sleep(settings.poll_interval);
    }
}

/// Apply a single command. Returns `false` when the loop should stop.
pub fn apply_command(screen: &mut SearchScreen, command: Command) -> bool {
    match command {
        Command::Search(text) => screen.set_query(&text),
        Command::LoadMore => screen.load_next_page(),
        Command::Refresh => screen.refresh(),
        Command::Unknown(raw) => warn!(command = %raw, "Unknown command ignored"),
        Command::Quit => return false,
    }
    true
}

/// Run the driver loop until `:quit` or end of input.
///
/// # Errors
///
/// Returns `AppError::Terminal` if reading input or writing output fails.
pub fn run<R: BufRead, W: Write>(
    screen: &mut SearchScreen,
    input: R,
    mut output: W,
    settings: &DriverSettings,
) -> Result<(), AppError> {
    for line in input.lines() {
        let line = line?;
        if !apply_command(screen, Command::parse(&line)) {
            info!("Quit requested");
            break;
        }
        wait_until_settled(screen, settings);
        output.write_all(view::render(screen).as_bytes())?;
        output.flush()?;
    }
    Ok(())
}
