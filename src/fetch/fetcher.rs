//! Source API fetcher

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::output::json_to_arrow;
use crate::types::JsonValue;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use tracing::info;

/// Fetches one batch of records from a JSON-array endpoint
#[derive(Debug)]
pub struct Fetcher {
    client: HttpClient,
    endpoint: String,
}

impl Fetcher {
    /// Create a fetcher from fetch settings
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config.timeout(), &config.user_agent)?,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the raw records
    ///
    /// The response must be a JSON array whose items are all objects.
    pub async fn fetch_records(&self) -> Result<Vec<JsonValue>> {
        info!("Requesting data from {} ...", self.endpoint);
        let body: JsonValue = self.client.get_json(&self.endpoint).await?;

        let JsonValue::Array(records) = body else {
            return Err(Error::payload(format!(
                "Expected a JSON array from {}",
                self.endpoint
            )));
        };

        if let Some(position) = records.iter().position(|r| !r.is_object()) {
            return Err(Error::payload(format!(
                "Item {position} of the response is not a JSON object"
            )));
        }

        info!("Fetched {} records.", records.len());
        Ok(records)
    }

    /// Fetch the records as a columnar batch
    ///
    /// The schema is inferred from the records. An empty response has
    /// nothing to infer from and gets `empty_schema` instead.
    pub async fn fetch(&self, empty_schema: &Schema) -> Result<RecordBatch> {
        let records = self.fetch_records().await?;
        let schema = records.is_empty().then_some(empty_schema);
        json_to_arrow(&records, schema)
    }
}
