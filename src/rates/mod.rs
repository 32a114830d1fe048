//! Currency exchange rates: remote sources and the local time-boxed cache.

mod cache;
mod client;
mod error;

pub use cache::{CachedRates, RateCache, RateTable};
pub use client::RateClient;
pub use error::RateError;
