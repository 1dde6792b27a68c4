//! HTTP client module
//!
//! Provides the HTTP client used to call the source API.
//!
//! # Features
//!
//! - **Timeouts**: one configurable timeout per request
//! - **Status checks**: any non-2xx response is an error
//! - **JSON bodies**: typed response parsing via serde

mod client;

pub use client::HttpClient;
