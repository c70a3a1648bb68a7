//! JSON file log store.
//!
//! The whole log lives in one pretty-printed JSON file, in the same format
//! `export` produces. Writes go to a sibling temp file first and are then
//! renamed over the target, so a crash mid-write never leaves half a log.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::DecisionRecord;
use crate::ports::{LogStore, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileLogStore {
    path: PathBuf,
}

impl JsonFileLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Moves the current file aside to `<name>.bak`, replacing an older backup.
    ///
    /// Call this after a failed load and before the next `store`, otherwise the
    /// unreadable log is overwritten. Returns `None` when there is no file.
    pub fn back_up(&self) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let backup = self.sibling("bak");
        fs::rename(&self.path, &backup)?;
        tracing::warn!(path = %backup.display(), "unreadable decision log moved aside");
        Ok(Some(backup))
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling("tmp")
    }

    fn sibling(&self, extension: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(extension);
        self.path.with_file_name(name)
    }
}

impl LogStore for JsonFileLogStore {
    /// A missing file is an empty log.
    fn load(&self) -> Result<Vec<DecisionRecord>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn store(&mut self, records: &[DecisionRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.temp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "decision log written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Choice, ChoiceId, DecisionId};
    use chrono::{TimeZone, Utc};

    fn record() -> DecisionRecord {
        let choices = vec![
            Choice::new(ChoiceId::from_raw("a"), "Pizza", 1).unwrap(),
            Choice::new(ChoiceId::from_raw("b"), "Tacos", 2).unwrap(),
        ];
        DecisionRecord::new(
            DecisionId::from_raw("d1"),
            Utc.timestamp_opt(1_700_000_000, 250_000_000).unwrap(),
            choices.clone(),
            choices[1].clone(),
            812,
        )
        .unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileLogStore::new(dir.path().join("nothing.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileLogStore::new(dir.path().join("nested/dir/decisions.json"));

        store.store(&[record()]).unwrap();

        assert_eq!(store.load().unwrap(), vec![record()]);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn corrupted_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.json");
        fs::write(&path, "{ half a log").unwrap();

        let store = JsonFileLogStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Corrupted(_))));
    }

    #[test]
    fn back_up_moves_unreadable_file_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.json");
        fs::write(&path, r#"[{"id":"d1","extra":true}]"#).unwrap();
        let mut store = JsonFileLogStore::new(&path);
        assert!(store.load().is_err());

        let backup = store.back_up().unwrap().unwrap();

        assert_eq!(backup, dir.path().join("decisions.json.bak"));
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            r#"[{"id":"d1","extra":true}]"#
        );
        // 次の書き込みでバックアップは上書きされない
        store.store(&[record()]).unwrap();
        assert_eq!(store.load().unwrap(), vec![record()]);
        assert!(fs::read_to_string(&backup).unwrap().contains("extra"));
    }

    #[test]
    fn back_up_without_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileLogStore::new(dir.path().join("decisions.json"));
        assert_eq!(store.back_up().unwrap(), None);
    }

    #[test]
    fn directory_in_place_of_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileLogStore::new(dir.path());
        assert!(matches!(store.load(), Err(StoreError::Io(_))));
    }
}
