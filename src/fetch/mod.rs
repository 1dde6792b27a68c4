//! Fetch module
//!
//! Issues the single GET against the source API and turns the JSON array
//! response into an Arrow RecordBatch.

mod fetcher;

pub use fetcher::Fetcher;
