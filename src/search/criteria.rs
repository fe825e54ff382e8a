use serde::{Deserialize, Serialize};

/// Upper rent bound of a fresh search
pub const DEFAULT_MAX_PRICE: u32 = 5000;

/// What the user is searching for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Free text matched against title and district
    pub query: String,
    /// Maximum cold rent (€)
    pub max_price: u32,
    /// Minimum number of rooms
    pub min_rooms: f32,
    /// Only this district, if set
    pub district: Option<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_price: DEFAULT_MAX_PRICE,
            min_rooms: 0.0,
            district: None,
        }
    }
}

impl FilterCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_max_price(mut self, max_price: u32) -> Self {
        self.max_price = max_price;
        self
    }

    /// Negative values are treated as zero
    pub fn with_min_rooms(mut self, min_rooms: f32) -> Self {
        self.min_rooms = min_rooms.max(0.0);
        self
    }

    /// An empty name clears the district filter
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        let district = district.into();
        self.district = if district.is_empty() { None } else { Some(district) };
        self
    }

    /// Back to the state of a fresh search
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
