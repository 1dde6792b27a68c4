//! Upload module
//!
//! Transfers validated snapshot files to an object store bucket.

mod uploader;

pub use uploader::Uploader;
