use crate::models::Listing;
use std::collections::HashSet;
use tracing::warn;

/// The active listing collection. Ids are unique; insertion order is kept.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
    ids: HashSet<u64>,
}

impl Catalog {
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        let mut catalog = Self::default();
        catalog.extend(listings);
        catalog
    }

    /// Append listings, skipping any whose id is already present.
    /// Returns how many were added.
    pub fn extend(&mut self, listings: impl IntoIterator<Item = Listing>) -> usize {
        let mut added = 0;
        for listing in listings {
            if !self.ids.insert(listing.id) {
                warn!("Skipping listing {}: id already in catalog", listing.id);
                continue;
            }
            self.listings.push(listing);
            added += 1;
        }
        added
    }

    pub fn get(&self, id: u64) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn as_slice(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
