//! Pipeline configuration
//!
//! All settings a run needs, built once at start-up and passed by
//! reference into each task. Layering is: defaults, then an optional
//! YAML file, then environment variables and CLI flags (see `cli`).

use crate::error::{Error, Result};
use crate::output::CompressionCodec;
use crate::validate::ValidationRules;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default source endpoint
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Default AWS region
pub const DEFAULT_REGION: &str = "ap-south-1";

/// Default object key prefix
pub const DEFAULT_KEY_PREFIX: &str = "raw";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Source API settings
    pub fetch: FetchConfig,

    /// Local Parquet output settings
    pub output: OutputConfig,

    /// Destination object store settings
    pub store: StoreConfig,

    /// Task retry policy
    pub retry: RetryPolicy,

    /// Data-quality rules
    pub rules: ValidationRules,
}

impl PipelineConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Check that the configuration is usable
    ///
    /// The bucket is not checked here; the upload task reports it.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.fetch.endpoint)?;

        if self.fetch.timeout_secs == 0 {
            return Err(Error::config("HTTP timeout must be at least 1 second"));
        }

        if self.rules.key_column.is_empty() {
            return Err(Error::missing_field("rules.key_column"));
        }

        Ok(())
    }
}

// ============================================================================
// Fetch
// ============================================================================

/// Source API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Endpoint returning a JSON array of records
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
            user_agent: format!("api-snapshot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetchConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Output
// ============================================================================

/// Local Parquet output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory snapshot files are written to
    pub dir: PathBuf,

    /// Block compression
    pub compression: CompressionCodec,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            compression: CompressionCodec::Snappy,
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// Destination object store settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Destination bucket; uploads fail fast when unset
    pub bucket: Option<String>,

    /// AWS region
    pub region: String,

    /// Access key id (falls back to the instance credential chain when unset)
    pub access_key_id: Option<String>,

    /// Secret access key
    pub secret_access_key: Option<String>,

    /// Custom endpoint for S3-compatible stores
    pub endpoint: Option<String>,

    /// Prefix of every object key
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            region: DEFAULT_REGION.to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("has_access_key_id", &self.access_key_id.is_some())
            .field("has_secret_access_key", &self.secret_access_key.is_some())
            .field("endpoint", &self.endpoint)
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

// ============================================================================
// Retry
// ============================================================================

/// How often a failed task is re-run before the run is aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure
    pub retries: u32,

    /// Fixed delay between attempts, in seconds
    pub delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 1,
            delay_secs: 60,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            retries: 0,
            delay_secs: 0,
        }
    }

    /// Delay between attempts
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.fetch.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(10));
        assert_eq!(config.store.region, "ap-south-1");
        assert_eq!(config.store.key_prefix, "raw");
        assert!(config.store.bucket.is_none());
        assert_eq!(config.retry.retries, 1);
        assert_eq!(config.retry.delay(), Duration::from_secs(60));
        assert_eq!(config.output.compression, CompressionCodec::Snappy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r"
fetch:
  endpoint: https://example.com/items
store:
  bucket: my-bucket
retry:
  retries: 3
";
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.fetch.endpoint, "https://example.com/items");
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.store.bucket.as_deref(), Some("my-bucket"));
        assert_eq!(config.store.region, DEFAULT_REGION);
        assert_eq!(config.retry.retries, 3);
        assert_eq!(config.retry.delay_secs, 60);
    }

    #[test]
    fn test_from_yaml_rules() {
        let yaml = r"
rules:
  required_columns: [sku, name]
  key_column: sku
";
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.rules, ValidationRules::new(["sku", "name"], "sku"));
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = PipelineConfig::from_yaml_str("retry: [1, 2").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let err = PipelineConfig::from_yaml_file("/no/such/config.yaml").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = PipelineConfig::default();
        config.fetch.endpoint = "not a url".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = PipelineConfig::default();
        config.fetch.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_debug_hides_secrets() {
        let store = StoreConfig {
            access_key_id: Some("AKIA123".to_string()),
            secret_access_key: Some("shh".to_string()),
            ..StoreConfig::default()
        };
        let debug = format!("{store:?}");
        assert!(!debug.contains("AKIA123"));
        assert!(!debug.contains("shh"));
    }
}
