use crate::models::ListingRow;
use crate::sources::traits::RowStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Row store kept in memory; stands in for PostgreSQL in tests and demos
#[derive(Debug, Clone, Default)]
pub struct MemoryRowStore {
    rows: Vec<ListingRow>,
    failure: Option<String>,
}

impl MemoryRowStore {
    pub fn new(rows: Vec<ListingRow>) -> Self {
        Self { rows, failure: None }
    }

    /// A store whose every call fails with `message`
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some(message.into()),
        }
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn fetch_rows(&self, limit: i64) -> Result<Vec<ListingRow>> {
        self.check()?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.rows.iter().take(limit).cloned().collect())
    }

    async fn now(&self) -> Result<DateTime<Utc>> {
        self.check()?;
        Ok(Utc::now())
    }
}
