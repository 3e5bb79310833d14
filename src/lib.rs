
pub mod bookmarks;
pub mod configs;
pub mod core;
pub mod loggers;
pub mod shell;

pub use crate::core::error::DmError;
