//! Process-level error type for the outer layers (ingest, HTTP, exports, CLI).
//!
//! The statistics core never returns errors; degenerate input degrades to
//! sentinel values instead. Everything that touches files, the network or
//! user flags reports through `AppError`, which carries the exit code the
//! binary terminates with:
//!
//! - `2`: usage or input problems (bad flags, unreadable files, missing env)
//! - `3`: the input parsed but holds nothing usable
//! - `4`: endpoint or export failures

use thiserror::Error;

pub const EXIT_USAGE: u8 = 2;
pub const EXIT_NO_DATA: u8 = 3;
pub const EXIT_IO: u8 = 4;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(EXIT_NO_DATA, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(EXIT_IO, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
