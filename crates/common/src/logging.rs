// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Logging initialization for basket systems.
//!
//! Library crates only emit through the [`log`] facade; hosts install a logger
//! once at startup. The provided logger writes single-line records to stdout
//! with a millisecond UTC timestamp and optional ANSI level coloring.

use std::{
    io::Write,
    sync::atomic::{AtomicBool, Ordering},
};

use basket_core::datetime::unix_millis_now;
use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Returns whether the logger has been installed.
pub fn logging_is_initialized() -> bool {
    LOGGING_INITIALIZED.load(Ordering::Relaxed)
}

/// Configuration for the stdout logger.
#[derive(Clone, Copy, Debug)]
pub struct LoggerConfig {
    /// The maximum level to emit.
    pub stdout_level: LevelFilter,
    /// Whether to colorize the level tag with ANSI escapes.
    pub is_colored: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            stdout_level: LevelFilter::Info,
            is_colored: true,
        }
    }
}

#[derive(Debug)]
struct StdoutLogger {
    config: LoggerConfig,
}

impl StdoutLogger {
    const fn color_code(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[90m",
        }
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.config.stdout_level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = unix_millis_now().to_rfc3339();
        let line = if self.config.is_colored {
            format!(
                "{timestamp} {}[{}]\x1b[0m {}: {}\n",
                Self::color_code(record.level()),
                record.level(),
                record.target(),
                record.args(),
            )
        } else {
            format!(
                "{timestamp} [{}] {}: {}\n",
                record.level(),
                record.target(),
                record.args(),
            )
        };
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stdout().lock().flush();
    }
}

/// Installs the stdout logger as the global [`log`] sink.
///
/// # Errors
///
/// Returns an error if a global logger was already installed.
pub fn init_logging(config: LoggerConfig) -> anyhow::Result<()> {
    log::set_boxed_logger(Box::new(StdoutLogger { config }))
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;
    log::set_max_level(config.stdout_level);
    LOGGING_INITIALIZED.store(true, Ordering::Relaxed);
    Ok(())
}

/// Installs a debug-level uncolored logger, ignoring repeat initialization.
///
/// Intended for test binaries where multiple tests race to initialize.
pub fn init_test_logging() {
    let config = LoggerConfig {
        stdout_level: LevelFilter::Debug,
        is_colored: false,
    };
    if init_logging(config).is_ok() {
        log::debug!("Test logging initialized");
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_init_test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
        assert!(logging_is_initialized());
        log::info!("logger installed");
    }
}
