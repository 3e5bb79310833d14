use chrono::Local;
use serde::{Deserialize, Serialize};

/// Record header timestamp, local time with microseconds.
pub const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn letter(self) -> &'static str {
        match self {
            LogLevel::Debug => "D",
            LogLevel::Info => "I",
            LogLevel::Warn => "W",
            LogLevel::Error => "E",
        }
    }
}

/// Call site of a leveled macro, captured with `file!()`/`line!()` at the
/// macro expansion so the header points at the caller, not the logger.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

/// One fully rendered log event; immutable once on the queue.
#[derive(Debug)]
pub struct LogRecord {
    pub content: String,
    pub level: LogLevel,
}

/// `[W][2026-08-30T10:11:12.123456][src/main.rs:42]  message\n`
pub fn render_header(level: LogLevel, caller: Caller, msg: &str) -> String {
    format!(
        "[{}][{}][{}:{}]  {}\n",
        level.letter(),
        Local::now().format(TS_FORMAT),
        caller.file,
        caller.line,
        msg
    )
}

/// Short call chain for error-level records, one indented `file:line symbol`
/// row per frame. Frames inside the logger (and the capture machinery itself)
/// are skipped; unresolvable symbols just shorten the chain.
pub(crate) fn call_chain(max_frames: usize) -> String {
    let trace = backtrace::Backtrace::new();
    let mut out = String::new();
    let mut past_internal = false;
    let mut taken = 0usize;

    for frame in trace.frames() {
        for symbol in frame.symbols() {
            let Some(name) = symbol.name().map(|n| n.to_string()) else {
                continue;
            };
            if !past_internal {
                if name.contains("backtrace") || name.contains("::loggers::") {
                    continue;
                }
                past_internal = true;
            }
            if name.starts_with("tokio::") || name.starts_with("std::") || name.starts_with("core::")
            {
                continue;
            }
            if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                out.push_str(&format!("    {}:{} {}\n", file.display(), line, name));
                taken += 1;
                if taken >= max_frames {
                    return out;
                }
            }
        }
    }
    out
}
