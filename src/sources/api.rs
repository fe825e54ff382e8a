use crate::models::{Listing, ListingRow};
use crate::sources::mock::template_offer;
use crate::sources::rows::listing_from_row;
use crate::sources::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Path of the listings endpoint on the backend
pub const LISTINGS_PATH: &str = "/api/wohnungen";

/// Loads listings from the backend proxy over HTTP
pub struct ApiListingSource {
    client: Client,
    base_url: String,
}

impl ApiListingSource {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:4000`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("mietradar/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, LISTINGS_PATH)
    }
}

#[async_trait]
impl ListingSource for ApiListingSource {
    async fn fetch(&self) -> Result<Vec<Listing>> {
        let url = self.endpoint();
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach listings API")?;

        if !response.status().is_success() {
            warn!("Listings API returned status: {}", response.status());
            anyhow::bail!("Server error: {}", response.status());
        }

        let rows: Vec<ListingRow> = response
            .json()
            .await
            .context("Failed to decode listings response")?;

        let template = template_offer();
        let mut rng = rand::thread_rng();
        let listings: Vec<Listing> = rows
            .iter()
            .map(|row| listing_from_row(row, &template, &mut rng))
            .collect();

        info!("Loaded {} listings from {}", listings.len(), url);
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Backend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let source = ApiListingSource::new("http://localhost:4000/").unwrap();
        assert_eq!(source.endpoint(), "http://localhost:4000/api/wohnungen");
    }
}
