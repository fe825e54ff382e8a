use crate::models::{Listing, ListingRow};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Common trait for everything that can fill the listing store
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Load listings, already in the client-side shape
    async fn fetch(&self) -> Result<Vec<Listing>>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}

/// Read access to the `wohnungen` table behind the backend
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Fetch at most `limit` rows
    async fn fetch_rows(&self, limit: i64) -> Result<Vec<ListingRow>>;

    /// Current time as seen by the database; used as a connectivity probe
    async fn now(&self) -> Result<DateTime<Utc>>;
}
