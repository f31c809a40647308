mod client;
mod model;
mod retry;

pub use client::{FetchError, HttpSummaryClient, SummaryFetch};
pub use model::{CountryRecord, SummaryReport, GLOBAL_COUNTRY_NAME};
