// HTTP Token-Classification Tagger
//
// Posts one sentence per request to a token-classification endpoint
// (Hugging Face inference style) and returns the aggregated entity records.
// Request shape: {"inputs": "...", "parameters": {"aggregation_strategy": "simple"}}
// Response shape: [{"word": "...", "entity_group": "ORG", "score": 0.99, ...}, ...]

use super::Tagger;
use crate::types::TaggedRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use carlex_common::config::TaggerConfig;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct TagRequest<'a> {
    inputs: &'a str,
    parameters: TagParameters<'a>,
}

#[derive(Debug, Serialize)]
struct TagParameters<'a> {
    aggregation_strategy: &'a str,
}

/// Remote tagger client
pub struct HttpTagger {
    /// HTTP client with configured timeouts
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    aggregation_strategy: String,
    /// Client-side request rate limit
    rate_limiter: DefaultDirectRateLimiter,
}

impl HttpTagger {
    /// Create a client for `endpoint`
    ///
    /// # Arguments
    /// * `endpoint` - Token-classification URL
    /// * `api_token` - Optional bearer token
    /// * `timeout` - Total request timeout
    /// * `requests_per_second` - Client-side rate limit (0 is treated as 1)
    pub fn new(
        endpoint: String,
        api_token: Option<String>,
        timeout: Duration,
        requests_per_second: u32,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("carlex/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .context("Failed to build HTTP client")?;

        let per_second = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            client,
            endpoint,
            api_token,
            aggregation_strategy: "simple".to_string(),
            rate_limiter,
        })
    }

    /// Create a client from the `[tagger]` config section
    pub fn from_config(config: &TaggerConfig, api_token: Option<String>) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .context("HTTP tagger requires tagger.endpoint")?;

        let mut tagger = Self::new(
            endpoint,
            api_token,
            Duration::from_secs(config.timeout_secs),
            config.requests_per_second,
        )?;
        tagger.aggregation_strategy = config.aggregation_strategy.clone();
        Ok(tagger)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Extract records from a response body
///
/// A nested array (batch response for a single input) is flattened one
/// level. Entries that do not deserialize as a record are skipped.
pub fn parse_response(body: Value) -> Result<Vec<TaggedRecord>> {
    let entries = match body {
        Value::Array(entries) => entries,
        other => anyhow::bail!("Tagger response is not an array: {}", other),
    };

    let entries: Vec<Value> = if entries.iter().all(Value::is_array) && !entries.is_empty() {
        entries
            .into_iter()
            .flat_map(|inner| match inner {
                Value::Array(items) => items,
                _ => Vec::new(),
            })
            .collect()
    } else {
        entries
    };

    let total = entries.len();
    let records: Vec<TaggedRecord> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if records.len() < total {
        debug!("Skipped {} unparseable tagger records", total - records.len());
    }
    Ok(records)
}

#[async_trait]
impl Tagger for HttpTagger {
    fn tagger_id(&self) -> &'static str {
        "HTTP"
    }

    async fn tag(&self, raw_sentence: &str) -> Result<Vec<TaggedRecord>> {
        self.rate_limiter.until_ready().await;

        let request = TagRequest {
            inputs: raw_sentence,
            parameters: TagParameters {
                aggregation_strategy: &self.aggregation_strategy,
            },
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.context("Tagger request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Tagger returned error: {}", response.status());
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse tagger response")?;

        let records = parse_response(body)?;
        debug!("Tagger returned {} records", records.len());
        Ok(records)
    }

    fn is_available(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_flat_response() {
        let body = json!([
            {"entity_group": "ORG", "score": 0.98, "word": "Toyota", "start": 15, "end": 21},
            {"entity_group": "MISC", "score": 0.71, "word": "Camry", "start": 22, "end": 27}
        ]);
        let records = parse_response(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].word.as_deref(), Some("Toyota"));
        assert_eq!(records[1].entity_group.as_deref(), Some("MISC"));
    }

    #[test]
    fn test_parse_nested_response() {
        let body = json!([[{"entity_group": "PER", "score": 0.9, "word": "Bob"}]]);
        let records = parse_response(body).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let body = json!([
            "garbage",
            {"word": 12, "entity_group": "ORG"},
            {"word": "Honda"},
            {"word": "Ford", "entity_group": "ORG", "score": 0.9}
        ]);
        let records = parse_response(body).unwrap();
        // "Honda" parses (label missing) and is dropped later at mention conversion
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_non_array_is_error() {
        let body = json!({"error": "Model is currently loading"});
        assert!(parse_response(body).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = TaggerConfig {
            kind: carlex_common::config::TaggerKind::Http,
            endpoint: Some("http://127.0.0.1:9/ner".to_string()),
            aggregation_strategy: "first".to_string(),
            ..TaggerConfig::default()
        };
        let tagger = HttpTagger::from_config(&config, Some("secret".into())).unwrap();
        assert_eq!(tagger.tagger_id(), "HTTP");
        assert_eq!(tagger.endpoint(), "http://127.0.0.1:9/ner");
        assert!(tagger.is_available());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let tagger = HttpTagger::new(
            "http://127.0.0.1:9/ner".to_string(),
            None,
            Duration::from_secs(2),
            5,
        )
        .unwrap();
        assert!(tagger.tag("I love my Toyota").await.is_err());
    }
}
