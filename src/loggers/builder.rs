use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::configs::Settings;
use crate::core::error::DmError;
use crate::loggers::core::{self, Caller, LogLevel, LogRecord};
use crate::loggers::worker::{DiagnosticHook, LogWorker};

/// Queue depth; a full queue suspends producers rather than dropping records.
pub const QUEUE_CAPACITY: usize = 100;

const DRAIN_POLL: Duration = Duration::from_millis(10);

/// Read-only after `build()`; runtime reconfiguration is out of scope.
#[derive(Debug)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub color: bool,
    pub stack: bool,
    pub rotate_bytes: u64,
    pub dir: PathBuf,
    pub filename: String,
    pub stack_depth: usize,
}

#[derive(Clone, Debug)]
pub struct Logger {
    pub sender: mpsc::Sender<LogRecord>,
    pub config: Arc<LoggerConfig>,
    /// Set by the writer loop while a record is mid-write; `wait()` reads it.
    pub busy: Arc<AtomicBool>,
}

impl Logger {
    /// Renders and enqueues one record. Always returns the error-shaped value
    /// carrying the message, whether or not the record passed the level
    /// filter, so callers can uniformly "log the failure and propagate it".
    pub async fn log(&self, level: LogLevel, caller: Caller, msg: String) -> DmError {
        if level >= self.config.level {
            let mut content = core::render_header(level, caller, &msg);
            if self.config.stack && level == LogLevel::Error {
                content.push_str(&core::call_chain(self.config.stack_depth));
            }
            // the worker outlives every handle, so a send error only means teardown
            let _ = self.sender.send(LogRecord { content, level }).await;
        }
        DmError::Message(msg)
    }

    /// Blocks until no record is queued or mid-write, confirmed twice with a
    /// short delay between checks to close the dequeue race.
    pub async fn wait(&self) {
        loop {
            if self.drained() {
                tokio::time::sleep(DRAIN_POLL).await;
                if self.drained() {
                    break;
                }
            }
            tokio::time::sleep(DRAIN_POLL).await;
        }
    }

    /// Drains, then ends the process. The only sanctioned exit once anything
    /// has been logged.
    pub async fn terminate(&self, code: i32) -> ! {
        self.wait().await;
        std::process::exit(code);
    }

    fn drained(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
            && self.sender.capacity() == self.sender.max_capacity()
    }
}

pub struct LoggerBuilder {
    config: LoggerConfig,
    diagnostic: Option<DiagnosticHook>,
}

impl LoggerBuilder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::from_settings(&Settings::default(), dir)
    }

    pub fn from_settings(settings: &Settings, dir: impl Into<PathBuf>) -> Self {
        Self {
            config: LoggerConfig {
                level: settings.level,
                color: settings.color,
                stack: settings.stack,
                rotate_bytes: settings.rotate_bytes,
                dir: dir.into(),
                filename: settings.filename.clone(),
                stack_depth: settings.stack_depth,
            },
            diagnostic: None,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.config.color = color;
        self
    }

    pub fn with_stack(mut self, stack: bool) -> Self {
        self.config.stack = stack;
        self
    }

    pub fn with_rotate_bytes(mut self, bytes: u64) -> Self {
        self.config.rotate_bytes = bytes;
        self
    }

    pub fn with_filename(mut self, filename: &str) -> Self {
        self.config.filename = filename.to_string();
        self
    }

    /// Sink for writer-loop I/O and rotation errors; defaults to stderr.
    pub fn with_diagnostic(mut self, hook: DiagnosticHook) -> Self {
        self.diagnostic = Some(hook);
        self
    }

    /// Creates the log directory and spawns the writer loop. A failed
    /// directory creation is reported to the console and returned; the
    /// host decides whether to go on without durable logging.
    pub fn build(self) -> Result<Logger, DmError> {
        if let Err(e) = std::fs::create_dir_all(&self.config.dir) {
            eprintln!("mk dir [{}] err[{}]", self.config.dir.display(), e);
            return Err(DmError::LoggerInit(format!(
                "create log dir [{}]: {}",
                self.config.dir.display(),
                e
            )));
        }

        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let config = Arc::new(self.config);
        let busy = Arc::new(AtomicBool::new(false));

        let worker = LogWorker::new(rx, busy.clone(), config.clone(), self.diagnostic);
        tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Logger {
            sender: tx,
            config,
            busy,
        })
    }
}
