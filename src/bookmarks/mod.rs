//! JSON-backed bookmark map: numeric keys to absolute directories.
//!
//! Every failure path follows the "log it and propagate it" convention: the
//! returned `DmError` is the value produced by the `error!` call itself.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::DmError;
use crate::error;
use crate::loggers::Logger;

pub const DATA_FILENAME: &str = "dirmark.json";

/// Exit code telling the shell helper that stdout is a directory to `cd` into.
pub const JUMP_EXIT_CODE: i32 = 10;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BookmarkData {
    #[serde(default)]
    pub dirs: BTreeMap<String, String>,
}

pub struct BookmarkStore {
    path: PathBuf,
    logger: Logger,
}

impl BookmarkStore {
    pub fn new(data_dir: &Path, logger: Logger) -> Self {
        Self {
            path: data_dir.join(DATA_FILENAME),
            logger,
        }
    }

    /// A missing or corrupt data file degrades to an empty map.
    pub fn load(&self) -> BookmarkData {
        fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    /// Bookmarks `dir` (absolutized) under the smallest unused numeric key,
    /// starting at 1. Returns the assigned key.
    pub async fn add(&self, dir: &str) -> Result<String, DmError> {
        let abs = match std::path::absolute(dir) {
            Ok(p) => p,
            Err(e) => {
                return Err(error!(self.logger, "get dir[{}] abs path err[{}]", dir, e).await);
            }
        };

        let mut data = self.load();
        let mut num: u64 = 1;
        while data.dirs.contains_key(&num.to_string()) {
            num += 1;
        }
        let key = num.to_string();
        data.dirs
            .insert(key.clone(), abs.to_string_lossy().into_owned());

        self.store(&data).await?;
        Ok(key)
    }

    pub async fn remove(&self, key: &str) -> Result<(), DmError> {
        let mut data = self.load();
        if data.dirs.remove(key).is_none() {
            return Err(error!(self.logger, "this key[{}] not in dir list", key).await);
        }
        self.store(&data).await
    }

    /// `param` is `OLD,NEW`: re-keys the bookmark stored under OLD. An
    /// existing NEW key is overwritten.
    pub async fn rename(&self, param: &str) -> Result<(), DmError> {
        let Some((old_key, new_key)) = param.split_once(',') else {
            return Err(error!(self.logger, "param[{}] err", param).await);
        };

        let mut data = self.load();
        let Some(dir) = data.dirs.remove(old_key) else {
            return Err(error!(self.logger, "this key[{}] not in dir list", old_key).await);
        };
        data.dirs.insert(new_key.to_string(), dir);

        self.store(&data).await
    }

    pub async fn get(&self, key: &str) -> Result<String, DmError> {
        match self.load().dirs.get(key) {
            Some(dir) => Ok(dir.clone()),
            None => Err(error!(self.logger, "this key[{}] not in dir list", key).await),
        }
    }

    /// Bookmarks ordered by numeric key; non-numeric keys sort last.
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self.load().dirs.into_iter().collect();
        entries.sort_by_key(|(key, _)| (key.parse::<u64>().unwrap_or(u64::MAX), key.clone()));
        entries
    }

    async fn store(&self, data: &BookmarkData) -> Result<(), DmError> {
        let json = match serde_json::to_vec_pretty(data) {
            Ok(json) => json,
            Err(e) => return Err(error!(self.logger, "json marshal err[{}]", e).await),
        };
        if let Err(e) = fs::write(&self.path, json) {
            return Err(error!(self.logger, "write data file err[{}]", e).await);
        }
        Ok(())
    }
}
