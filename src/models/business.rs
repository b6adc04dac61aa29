use serde::{Deserialize, Serialize};

/// The business picked for a recommendation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Business {
    pub name: String,
    pub rating: f64,
    pub review_count: u32,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub cross_streets: Option<String>,
    pub coordinates: Option<GeoPoint>,
    pub is_closed: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}
