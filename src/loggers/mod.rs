// src/loggers/mod.rs

pub mod builder;
pub mod core;
pub mod rotate;
pub mod worker;

pub use builder::{Logger, LoggerBuilder, LoggerConfig};
pub use core::LogLevel;

/// Shared expansion for the leveled macros: captures the call site and hands
/// the formatted message to [`Logger::log`]. Evaluates to a future resolving
/// to the error-shaped `DmError`; the caller awaits it.
#[macro_export]
macro_rules! log_base {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $crate::loggers::core::Caller { file: file!(), line: line!() },
            format!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_base!($logger, $crate::loggers::core::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_base!($logger, $crate::loggers::core::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_base!($logger, $crate::loggers::core::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_base!($logger, $crate::loggers::core::LogLevel::Error, $($arg)+)
    };
}
