use serde::Serialize;

use crate::input::Dataset;
use crate::input::store::ScoreStore;
use crate::model::records::{Restaurant, ScoreRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub city: Option<String>,
    pub cuisine: Option<String>,
    pub min_lbh: f64,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            city: None,
            cuisine: None,
            min_lbh: 0.0,
            limit: 20,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingEntry<'a> {
    #[serde(flatten)]
    pub restaurant: &'a Restaurant,
    pub lbh_scores: Option<&'a ScoreRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Listing<'a> {
    pub restaurants: Vec<ListingEntry<'a>>,
}

/// The page is cut before the LBH threshold is applied, so a page can hold
/// fewer than `limit` entries.
pub fn list_restaurants<'a>(
    dataset: &'a Dataset,
    store: &'a ScoreStore,
    query: &ListingQuery,
) -> Listing<'a> {
    let restaurants = dataset
        .restaurants
        .iter()
        .filter(|r| matches_field(r.city.as_deref(), query.city.as_deref()))
        .filter(|r| matches_field(r.cuisine.as_deref(), query.cuisine.as_deref()))
        .skip(query.offset)
        .take(query.limit)
        .map(|r| ListingEntry {
            restaurant: r,
            lbh_scores: store.get(&r.id),
        })
        .filter(|e| e.lbh_scores.map(|s| s.lbh).unwrap_or(0.0) >= query.min_lbh)
        .collect();
    Listing { restaurants }
}

fn matches_field(value: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        Some(w) => value == Some(w),
        None => true,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/listing.rs"]
mod tests;
