use arc_swap::ArcSwap;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::core::error::DmError;
use crate::loggers::core::LogLevel;

pub const SETTINGS_FILENAME: &str = "settings.json";

/// Logger knobs, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub level: LogLevel,
    pub color: bool,
    pub stack: bool,
    pub rotate_bytes: u64,
    pub filename: String,
    pub stack_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            color: true,
            stack: false,
            rotate_bytes: 100 << 20,
            filename: "dirmark.log".to_string(),
            stack_depth: 6,
        }
    }
}

pub struct ConfigManager {
    current: ArcSwap<Settings>,
    source_info: String,
}

impl ConfigManager {
    /// Defaults, then `<data_dir>/settings.json` when present, then
    /// `DIRMARK_`-prefixed environment variables.
    pub fn load(data_dir: &Path) -> Result<Self, DmError> {
        let path = data_dir.join(SETTINGS_FILENAME);

        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if path.exists() {
            figment = figment.merge(Json::file(&path));
        }

        let settings: Settings = figment
            .merge(Env::prefixed("DIRMARK_"))
            .extract()
            .map_err(|e| DmError::Config(e.to_string()))?;

        Ok(Self {
            current: ArcSwap::from_pointee(settings),
            source_info: format!("local:{}", path.display()),
        })
    }

    pub fn get(&self) -> Arc<Settings> {
        self.current.load_full()
    }

    pub fn source(&self) -> &str {
        &self.source_info
    }
}
