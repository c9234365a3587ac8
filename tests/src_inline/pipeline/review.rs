use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::TimeZone;

use super::*;
use crate::input::{load_dataset, write_dataset};
use crate::model::records::Restaurant;
use crate::model::weights::ScoringProfile;
use crate::pipeline::stage2_score::{Stage2Inputs, run_stage2};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("lbh_review_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn restaurant(id: &str) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: Some(format!("Place {id}")),
        address: None,
        city: None,
        state: None,
        cuisine: None,
        lat: None,
        lng: None,
    }
}

fn prior_review(rating: f64, text: &str) -> RawReview {
    RawReview {
        restaurant_id: "r1".to_string(),
        author: None,
        rating: Some(rating),
        text: Some(text.to_string()),
        created_at: None,
    }
}

fn dataset() -> Dataset {
    Dataset {
        restaurants: vec![restaurant("r1")],
        raw_reviews: vec![
            prior_review(5.0, "Great food"),
            prior_review(4.0, "Slow service"),
            prior_review(4.0, "ok"),
            prior_review(3.0, "ok"),
            prior_review(5.0, "ok"),
        ],
        ..Dataset::default()
    }
}

fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 4, 18, 0, 0).unwrap()
}

fn new_review(restaurant_id: &str, rating: f64) -> NewReview {
    NewReview {
        restaurant_id: restaurant_id.to_string(),
        rating,
        text: None,
        created_at: submitted_at(),
    }
}

fn sentiment_of(ds: &Dataset) -> f64 {
    let profile = ScoringProfile::default_v1();
    let out = run_stage2(&Stage2Inputs {
        dataset: ds,
        restaurant_id: Some("r1"),
        scored_at: submitted_at(),
        profile: &profile,
    });
    out.rows[0].scores.sentiment_score
}

#[test]
fn test_add_review_appends_row() {
    let mut ds = dataset();
    let review = NewReview {
        text: Some("Friendly staff".to_string()),
        ..new_review("r1", 4.5)
    };
    let row = add_review(&mut ds, review).unwrap().clone();

    assert_eq!(row.restaurant_id, "r1");
    assert_eq!(row.rating, Some(4.5));
    assert_eq!(row.text.as_deref(), Some("Friendly staff"));
    assert_eq!(row.author, None);
    assert_eq!(row.created_at, Some(submitted_at()));
    assert_eq!(ds.raw_reviews.len(), 6);
    assert_eq!(ds.raw_reviews.last(), Some(&row));
}

#[test]
fn test_unknown_restaurant_rejected() {
    let mut ds = dataset();
    let err = add_review(&mut ds, new_review("nope", 4.0)).unwrap_err();
    assert!(matches!(err, LbhError::NotFound(ref id) if id == "nope"));
    assert_eq!(ds.raw_reviews.len(), 5);
}

#[test]
fn test_non_finite_rating_rejected() {
    let mut ds = dataset();
    for rating in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = add_review(&mut ds, new_review("r1", rating)).unwrap_err();
        assert!(matches!(err, LbhError::InvalidArgument(_)));
    }
    let err = add_review(&mut ds, new_review("  ", 4.0)).unwrap_err();
    assert!(matches!(err, LbhError::InvalidArgument(_)));
    assert_eq!(ds.raw_reviews.len(), 5);
}

#[test]
fn test_rescore_picks_up_new_rating() {
    let mut ds = dataset();
    assert!((sentiment_of(&ds) - 71.0).abs() < 1e-9);

    add_review(&mut ds, new_review("r1", 1.0)).unwrap();
    // ratings average 22 / 6; texts unchanged at 50
    assert!((sentiment_of(&ds) - 61.67).abs() < 1e-9);
}

#[test]
fn test_submitted_review_survives_rewrite() {
    let dir = make_temp_dir();
    let path = dir.join("dataset.json.gz");
    let mut ds = dataset();
    add_review(&mut ds, new_review("r1", 1.0)).unwrap();
    write_dataset(&path, &ds).unwrap();

    let reloaded = load_dataset(&path).unwrap();
    assert_eq!(reloaded.raw_reviews, ds.raw_reviews);
    assert!((sentiment_of(&reloaded) - 61.67).abs() < 1e-9);
}
