//! Error types shared between the library and the client binary.
//!
//! The `TickerError` enum unifies the failure cases the driver has to tell
//! apart: I/O faults, network faults (recovered once per cycle), and
//! everything else. Per-record decode failures have their own type,
//! `quote::RecordError`, because they never leave the decoder.
use std::io;

use thiserror::Error;

/// Unified error type for the ticker workspace.
#[derive(Error, Debug)]
pub enum TickerError {
    /// I/O error originating from the standard library (files, terminal).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport failure while fetching quotes (timeout, connection error).
    /// Recovered per cycle: rendered inline, the loop continues.
    #[error("Network error: {0}")]
    Network(String),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),
}
