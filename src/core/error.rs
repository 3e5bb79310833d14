//! # Core Error Module
//!
//! This module defines the central `DmError` type used throughout the crate.
//! It leverages `thiserror` for error message formatting and `serde` for serialization.

use serde::Serialize;
use thiserror::Error;

/// Central error type for `dirmark`.
#[derive(Debug, Error, Serialize)]
pub enum DmError {
    /// An error value produced by a log call. Displays as the rendered message
    /// so call sites can log a failure and propagate it in one expression.
    #[error("{0}")]
    Message(String),

    /// Error related to configuration loading or merging.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The logger could not be initialized (log directory unusable).
    #[error("Logger init error: {0}")]
    LoggerInit(String),
}
