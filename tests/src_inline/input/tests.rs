use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("lbh_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const SAMPLE: &str = r#"{
  "restaurants": [
    {"id": "r1", "name": "Blue Door", "city": "Austin", "cuisine": "Thai"},
    {"id": "r2", "city": "Austin"}
  ],
  "raw_reviews": [
    {
      "restaurant_id": "r1", "author": "ann", "rating": 5, "text": "Great food",
      "created_at": "2024-03-01T12:00:00Z"
    },
    {"restaurant_id": "r2", "rating": null, "text": null}
  ],
  "hours_changes": [{"id": "h1", "restaurant_id": "r1"}],
  "job_posts": []
}"#;

#[test]
fn test_load_plain_dataset() {
    let dir = make_temp_dir();
    let path = dir.join("dataset.json");
    fs::write(&path, SAMPLE).unwrap();

    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.restaurants.len(), 2);
    assert_eq!(ds.raw_reviews.len(), 2);
    assert_eq!(ds.hours_changes.len(), 1);
    assert!(ds.job_posts.is_empty());
    assert_eq!(ds.restaurant("r1").unwrap().display_name(), "Blue Door");
    assert_eq!(ds.restaurant("r2").unwrap().display_name(), "Unknown Restaurant");
    assert_eq!(ds.reviews_for("r1").count(), 1);
}

#[test]
fn test_load_gz_dataset() {
    let dir = make_temp_dir();
    let path = dir.join("dataset.json.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(SAMPLE.as_bytes()).unwrap();
    fs::write(&path, enc.finish().unwrap()).unwrap();

    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.restaurants.len(), 2);
}

#[test]
fn test_missing_collections_default_to_empty() {
    let dir = make_temp_dir();
    let path = dir.join("dataset.json");
    fs::write(&path, r#"{"restaurants":[{"id":"only"}]}"#).unwrap();

    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.restaurants.len(), 1);
    assert!(ds.raw_reviews.is_empty());
}

#[test]
fn test_missing_file_is_reported() {
    let dir = make_temp_dir();
    let err = load_dataset(&dir.join("nope.json")).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_duplicate_restaurant_rejected() {
    let dir = make_temp_dir();
    let path = dir.join("dataset.json");
    fs::write(&path, r#"{"restaurants":[{"id":"a"},{"id":"a"}]}"#).unwrap();

    let err = load_dataset(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_malformed_json_names_file() {
    let dir = make_temp_dir();
    let path = dir.join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_dataset(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_write_dataset_round_trips_plain_and_gz() {
    let dir = make_temp_dir();
    let source = dir.join("dataset.json");
    fs::write(&source, SAMPLE).unwrap();
    let ds = load_dataset(&source).unwrap();

    for name in ["copy/dataset.json", "copy/dataset.json.gz"] {
        let path = dir.join(name);
        write_dataset(&path, &ds).unwrap();
        let back = load_dataset(&path).unwrap();
        assert_eq!(back.restaurants, ds.restaurants);
        assert_eq!(back.raw_reviews, ds.raw_reviews);
        assert_eq!(back.hours_changes, ds.hours_changes);
    }

    let gz = fs::read(dir.join("copy/dataset.json.gz")).unwrap();
    assert_eq!(&gz[..2], &[0x1f, 0x8b]);
}
