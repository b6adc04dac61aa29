pub mod yelp;

use async_trait::async_trait;

use crate::models::{Business, Location};

/// Candidates need more than this many reviews for their rating to count.
const MIN_REVIEW_COUNT: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub term: String,
    pub cuisine: String,
    pub location: Location,
    pub radius_meters: u32,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the best match for the query, or an error when nothing
    /// matched or the backend failed.
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<Business>;
}

/// Highest rating among candidates with enough reviews; ties keep the
/// earlier candidate. Falls back to the first candidate when none
/// qualify.
pub fn select_best(candidates: Vec<Business>) -> Option<Business> {
    let mut best: Option<usize> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        if candidate.review_count <= MIN_REVIEW_COUNT {
            continue;
        }
        match best {
            Some(j) if candidates[j].rating >= candidate.rating => {}
            _ => best = Some(i),
        }
    }
    candidates.into_iter().nth(best.unwrap_or(0))
}
