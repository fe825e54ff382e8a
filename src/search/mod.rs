pub mod criteria;
pub mod engine;

pub use criteria::{FilterCriteria, DEFAULT_MAX_PRICE};
pub use engine::{filter_listings, matches};
