//! Flat test-data files.
//!
//! [`JsonStore`] keeps one pretty-printed JSON object per file; every write
//! re-reads the file, sets one key and writes it back, so the last write wins.
//! [`TextLog`] appends lines to a plain text file.

use crate::result::{RoamerError, RoamerResult};
use serde_json::{Map, Value};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

fn ensure_parent(path: &Path) -> RoamerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// A JSON object file of string values, optionally grouped by scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `file_name` under `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self::new(data_dir.as_ref().join(file_name))
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole document; an absent or empty file reads as `{}`
    pub fn load(&self) -> RoamerResult<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(RoamerError::Config {
                message: format!("{} does not hold a JSON object", self.path.display()),
            }),
        }
    }

    fn save(&self, root: &Map<String, Value>) -> RoamerResult<()> {
        ensure_parent(&self.path)?;
        let text = serde_json::to_string_pretty(root)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Set a top-level key
    pub fn write_value(&self, key: &str, value: &str) -> RoamerResult<()> {
        let mut root = self.load()?;
        root.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&root)?;
        debug!(path = %self.path.display(), key, "stored value");
        Ok(())
    }

    /// Set a key inside a scenario block, creating the block if needed
    pub fn write_scenario_value(&self, scenario: &str, key: &str, value: &str) -> RoamerResult<()> {
        let mut root = self.load()?;
        let block = root
            .entry(scenario.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !block.is_object() {
            *block = Value::Object(Map::new());
        }
        if let Value::Object(map) = block {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
        self.save(&root)?;
        debug!(path = %self.path.display(), scenario, key, "stored scenario value");
        Ok(())
    }

    /// Top-level string value
    pub fn read_value(&self, key: &str) -> RoamerResult<String> {
        self.load()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RoamerError::DataNotFound { key: key.to_string() })
    }

    /// The object stored under `scenario`
    pub fn read_scenario(&self, scenario: &str) -> RoamerResult<Map<String, Value>> {
        match self.load()?.remove(scenario) {
            Some(Value::Object(map)) => Ok(map),
            _ => Err(RoamerError::DataNotFound {
                key: scenario.to_string(),
            }),
        }
    }
}

/// Append-only text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLog {
    path: PathBuf,
}

impl TextLog {
    /// Log backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line
    pub fn append(&self, line: &str) -> RoamerResult<()> {
        ensure_parent(&self.path)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Truncate the file, creating it if missing
    pub fn clear(&self) -> RoamerResult<()> {
        ensure_parent(&self.path)?;
        fs::write(&self.path, "")?;
        Ok(())
    }

    /// All lines written so far
    pub fn lines(&self) -> RoamerResult<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
