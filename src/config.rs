use std::env;

use crate::errors::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub app_secret: String,
    pub validation_token: String,
    pub page_access_token: String,
    pub server_url: String,
    /// Directory served under `/assets`, the media behind the sample payloads.
    pub assets_dir: String,
    pub graph_api_url: String,
    pub yelp_api_url: String,
    pub yelp_api_key: String,
    pub search_radius_meters: u32,
}

impl AppConfig {
    /// Reads configuration from the environment. The Messenger credentials
    /// and the public server URL are required.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} must be set")))
        };

        Ok(Self {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            app_secret: required("MESSENGER_APP_SECRET")?,
            validation_token: required("MESSENGER_VALIDATION_TOKEN")?,
            page_access_token: required("MESSENGER_PAGE_ACCESS_TOKEN")?,
            server_url: required("SERVER_URL")?,
            assets_dir: lookup("ASSETS_DIR").unwrap_or_else(|| "public/assets".to_string()),
            graph_api_url: lookup("GRAPH_API_URL")
                .unwrap_or_else(|| "https://graph.facebook.com/v2.6".to_string()),
            yelp_api_url: lookup("YELP_API_URL")
                .unwrap_or_else(|| "https://api.yelp.com/v3".to_string()),
            yelp_api_key: lookup("YELP_API_KEY").unwrap_or_default(),
            search_radius_meters: lookup("SEARCH_RADIUS_METERS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        })
    }
}
