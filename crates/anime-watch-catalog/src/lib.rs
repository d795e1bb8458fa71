pub mod error;
pub mod jikan;
pub mod outcome;
pub mod traits;
pub mod transport;

pub use error::CatalogError;
pub use jikan::{JikanClient, SEARCH_LIMIT, SEASONAL_LIMIT};
pub use outcome::FetchOutcome;
pub use traits::CatalogSource;
pub use transport::{CatalogTransport, HttpTransport};
