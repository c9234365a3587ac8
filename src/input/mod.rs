use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod compressed;
pub mod store;

use compressed::{open_maybe_gz, write_maybe_gz};

use crate::model::records::{RawReview, Restaurant, SignalEvent};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Local datastore snapshot: restaurants plus the raw rows signals are built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub restaurants: Vec<Restaurant>,
    pub raw_reviews: Vec<RawReview>,
    pub hours_changes: Vec<SignalEvent>,
    pub job_posts: Vec<SignalEvent>,
}

impl Dataset {
    pub fn restaurant(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    pub fn reviews_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a RawReview> + 'a {
        self.raw_reviews
            .iter()
            .filter(move |r| r.restaurant_id == id)
    }
}

pub fn load_dataset(path: &Path) -> Result<Dataset, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let mut reader = open_maybe_gz(path)?;
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let dataset = parse_json::<Dataset>(&raw, path)?;

    let mut seen = std::collections::BTreeSet::new();
    for r in &dataset.restaurants {
        if r.id.trim().is_empty() {
            return Err(InputError::InvalidInput(format!(
                "restaurant with empty id in {}",
                path.display()
            )));
        }
        if !seen.insert(r.id.as_str()) {
            return Err(InputError::InvalidInput(format!(
                "duplicate restaurant id {} in {}",
                r.id,
                path.display()
            )));
        }
    }

    tracing::info!(
        path = %path.display(),
        restaurants = dataset.restaurants.len(),
        reviews = dataset.raw_reviews.len(),
        hours_changes = dataset.hours_changes.len(),
        job_posts = dataset.job_posts.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Rewrites the whole dataset as pretty JSON, gzipped for `.gz` paths.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<(), InputError> {
    write_maybe_gz(path, |w| {
        serde_json::to_writer_pretty(&mut *w, dataset).map_err(|source| InputError::Json {
            path: path.display().to_string(),
            source,
        })?;
        w.write_all(b"\n")?;
        Ok(())
    })?;
    tracing::debug!(
        path = %path.display(),
        reviews = dataset.raw_reviews.len(),
        "wrote dataset"
    );
    Ok(())
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    raw: &str,
    path: &Path,
) -> Result<T, InputError> {
    serde_json::from_str(raw).map_err(|source| InputError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
