use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::input::compressed::open_maybe_gz;
use crate::input::{InputError, parse_json};
use crate::model::records::ScoreRecord;

pub const STORE_FILE_NAME: &str = "lbh_scores.json";

/// Persisted LBH scores keyed by restaurant id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreStore {
    records: BTreeMap<String, ScoreRecord>,
}

impl ScoreStore {
    pub fn get(&self, restaurant_id: &str) -> Option<&ScoreRecord> {
        self.records.get(restaurant_id)
    }

    /// Inserts or replaces the record for its restaurant; returns true when replaced.
    pub fn upsert(&mut self, record: ScoreRecord) -> bool {
        self.records
            .insert(record.restaurant_id.clone(), record)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.values()
    }
}

/// A missing file is an empty store.
pub fn load_store(path: &Path) -> Result<ScoreStore, InputError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no score store yet");
        return Ok(ScoreStore::default());
    }
    let mut reader = open_maybe_gz(path)?;
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    if raw.trim().is_empty() {
        return Ok(ScoreStore::default());
    }
    let rows: Vec<ScoreRecord> = parse_json(&raw, path)?;

    let mut store = ScoreStore::default();
    for row in rows {
        if store.upsert(row) {
            tracing::warn!(
                path = %path.display(),
                "duplicate restaurant id in score store; keeping last"
            );
        }
    }
    Ok(store)
}

pub fn write_store(path: &Path, store: &ScoreStore) -> Result<(), InputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let rows: Vec<&ScoreRecord> = store.records().collect();
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, &rows).map_err(|source| InputError::Json {
        path: path.display().to_string(),
        source,
    })?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/store.rs"]
mod tests;
