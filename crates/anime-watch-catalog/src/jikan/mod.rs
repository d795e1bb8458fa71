pub mod api;
pub mod client;

pub use client::{JikanClient, SEARCH_LIMIT, SEASONAL_LIMIT};
