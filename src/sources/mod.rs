pub mod api;
pub mod districts;
pub mod memory;
pub mod mock;
pub mod postgres;
pub mod rows;
pub mod traits;

pub use api::ApiListingSource;
pub use memory::MemoryRowStore;
pub use mock::MockCatalog;
pub use postgres::PgRowStore;
pub use traits::{ListingSource, RowStore};
