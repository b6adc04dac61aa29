use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::{select_best, SearchProvider, SearchQuery};
use crate::models::{Business, GeoPoint};

const RESULT_LIMIT: u32 = 12;

pub struct YelpClient {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl YelpClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<YelpBusiness>,
}

#[derive(Debug, Deserialize)]
struct YelpBusiness {
    name: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    review_count: Option<u32>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    location: Option<YelpLocation>,
    #[serde(default)]
    coordinates: Option<YelpCoordinates>,
    #[serde(default)]
    is_closed: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct YelpLocation {
    #[serde(default)]
    address1: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    cross_streets: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YelpCoordinates {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl From<YelpBusiness> for Business {
    fn from(b: YelpBusiness) -> Self {
        let (address, city, cross_streets) = match b.location {
            Some(l) => (l.address1, l.city, l.cross_streets),
            None => (None, None, None),
        };
        let coordinates = b.coordinates.and_then(|c| match (c.latitude, c.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
            _ => None,
        });
        Business {
            name: b.name,
            rating: b.rating.unwrap_or_default(),
            review_count: b.review_count.unwrap_or_default(),
            phone: b.phone.filter(|p| !p.is_empty()),
            image_url: b.image_url.filter(|u| !u.is_empty()),
            address: address.filter(|a| !a.is_empty()),
            city,
            cross_streets: cross_streets.filter(|c| !c.is_empty()),
            coordinates,
            is_closed: b.is_closed,
        }
    }
}

/// Yelp category alias for a recognized cuisine name.
pub fn category_alias(cuisine: &str) -> String {
    match cuisine {
        "american" => "tradamerican,newamerican".to_string(),
        "indian" => "indpak".to_string(),
        other => other.replace(' ', ""),
    }
}

#[async_trait]
impl SearchProvider for YelpClient {
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<Business> {
        anyhow::ensure!(!self.api_key.is_empty(), "YELP_API_KEY is not configured");

        let url = format!("{}/businesses/search", self.api_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[
                ("term", query.term.clone()),
                ("categories", category_alias(&query.cuisine)),
                ("latitude", query.location.lat.to_string()),
                ("longitude", query.location.long.to_string()),
                ("radius", query.radius_meters.to_string()),
                ("limit", RESULT_LIMIT.to_string()),
            ])
            .send()
            .await
            .context("failed to call Yelp search")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Yelp API error ({status}): {body}");
        }

        let data: SearchResponse = resp
            .json()
            .await
            .context("failed to parse Yelp response")?;

        tracing::debug!(
            cuisine = %query.cuisine,
            candidates = data.businesses.len(),
            "yelp search returned"
        );

        select_best(data.businesses.into_iter().map(Business::from).collect())
            .ok_or_else(|| anyhow::anyhow!("no {} restaurants found nearby", query.cuisine))
    }
}
