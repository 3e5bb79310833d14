use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use tokio::sync::mpsc;

use crate::loggers::builder::LoggerConfig;
use crate::loggers::core::{LogLevel, LogRecord};
use crate::loggers::rotate;

/// Optional sink for writer-loop I/O and rotation errors.
pub type DiagnosticHook = Arc<dyn Fn(&str) + Send + Sync>;

/// The single consumer of the record queue. Runs until every `Logger` handle
/// is dropped; file writes and rotation are race-free because nothing else
/// touches the active log file.
pub struct LogWorker {
    receiver: mpsc::Receiver<LogRecord>,
    busy: Arc<AtomicBool>,
    config: Arc<LoggerConfig>,
    log_path: PathBuf,
    diagnostic: Option<DiagnosticHook>,
}

impl LogWorker {
    pub fn new(
        receiver: mpsc::Receiver<LogRecord>,
        busy: Arc<AtomicBool>,
        config: Arc<LoggerConfig>,
        diagnostic: Option<DiagnosticHook>,
    ) -> Self {
        let log_path = config.dir.join(&config.filename);
        Self {
            receiver,
            busy,
            config,
            log_path,
            diagnostic,
        }
    }

    pub async fn run(mut self) {
        loop {
            // busy cleared plus an empty queue is what wait() observes as drained
            self.busy.store(false, Ordering::Release);
            let Some(record) = self.receiver.recv().await else {
                break;
            };
            self.busy.store(true, Ordering::Release);

            self.print(&record);

            // a failed disk write is not fatal: the record already reached the
            // console, and the next record's write is the de facto retry
            if let Err(e) = self.append(&record) {
                self.report(&format!(
                    "write log file [{}] err[{}]",
                    self.log_path.display(),
                    e
                ));
                continue;
            }

            match std::fs::metadata(&self.log_path) {
                Ok(meta) if meta.len() >= self.config.rotate_bytes => {
                    // rotation must not log through the queue: a full queue
                    // would deadlock the loop against itself
                    if let Err(e) = rotate::archive(&self.log_path) {
                        self.report(&format!(
                            "rotate log file [{}] err[{}]",
                            self.log_path.display(),
                            e
                        ));
                    }
                }
                Ok(_) => {}
                Err(e) => self.report(&format!(
                    "stat log file [{}] err[{}]",
                    self.log_path.display(),
                    e
                )),
            }
        }
    }

    fn print(&self, record: &LogRecord) {
        if !self.config.color {
            print!("{}", record.content);
            return;
        }
        let text = match record.level {
            LogLevel::Debug => record.content.as_str().blue().bold(),
            LogLevel::Info => record.content.as_str().green().bold(),
            LogLevel::Warn => record.content.as_str().yellow().bold(),
            LogLevel::Error => record.content.as_str().red().bold(),
        };
        print!("{text}");
    }

    fn append(&self, record: &LogRecord) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        file.write_all(record.content.as_bytes())
    }

    fn report(&self, msg: &str) {
        match &self.diagnostic {
            Some(hook) => hook(msg),
            None => eprintln!("{msg}"),
        }
    }
}
