//! Persistent game settings (high scores, options) in a small JSON file.
//!
//! A missing file is an empty store. Every `set` rewrites the whole file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct Values(Map<String, Value>);

#[derive(Debug)]
pub struct Settings {
    path: PathBuf,
    values: Values,
}

impl Settings {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("malformed settings file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no settings file at {}, starting empty", path.display());
                Values::default()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read settings {}", path.display()))
            }
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.0.get(key)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Store `value` under `key` and write the file.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.values.0.insert(key.into(), value.into());
        let text = serde_json::to_string(&self.values)?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write settings {}", self.path.display()))?;
        Ok(())
    }
}
