//! Graph API transport over reqwest

use super::error::{map_error_payload, map_http_error};
use crate::config::models::ApiConfig;
use crate::core::batch::{BatchEntry, BatchResult, GroupRequest, PageCursor};
use crate::core::traits::BatchTransport;
use crate::utils::error::{FetchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Speaks the Graph batch protocol: one POST per group of requests, GETs for follow-up pages
#[derive(Debug, Clone)]
pub struct GraphTransport {
    client: Client,
    /// `{base_url}/{api_version}/`
    base: String,
    access_token: String,
    throttle_codes: Vec<i64>,
}

impl GraphTransport {
    /// Build a transport; the configuration must carry an access token
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let access_token = config
            .access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| FetchError::config("access_token is required for the Graph transport"))?;

        let client = Client::builder()
            .timeout(config.timeout_duration())
            .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base: config.versioned_base(),
            access_token,
            throttle_codes: config.throttle_error_codes.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    async fn error_from_response(&self, response: reqwest::Response) -> FetchError {
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => map_http_error(status, &body, &self.throttle_codes),
            Err(e) => FetchError::from(e),
        }
    }

    /// Map one element of a batch response array
    fn batch_outcome(&self, element: Option<&Value>) -> Result<PageCursor> {
        let element = match element {
            None | Some(Value::Null) => {
                return Err(FetchError::request(None, "no response for request in batch"));
            }
            Some(element) => element,
        };

        let code = element
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
            .ok_or_else(|| FetchError::parse("batch response element has no status code"))?;

        let body = match element.get("body") {
            Some(Value::String(raw)) => serde_json::from_str::<Value>(raw).map_err(|e| {
                FetchError::parse(format!("batch response body is not JSON: {}", e))
            })?,
            Some(other) => other.clone(),
            None => Value::Null,
        };

        if (200..300).contains(&code) {
            PageCursor::from_page(body)
        } else {
            Err(map_error_payload(code, body, &self.throttle_codes))
        }
    }
}

#[async_trait]
impl BatchTransport for GraphTransport {
    async fn submit_batch(&self, requests: &[GroupRequest]) -> Result<BatchResult> {
        let batch: Vec<Value> = requests
            .iter()
            .map(|r| json!({ "method": "GET", "relative_url": r.relative_url() }))
            .collect();
        let batch = serde_json::to_string(&batch)?;

        debug!("Submitting batch of {} requests", requests.len());
        let response = self
            .client
            .post(&self.base)
            .form(&[("access_token", self.access_token.as_str()), ("batch", batch.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }

        let body: Value = response.json().await?;
        let elements = body
            .as_array()
            .ok_or_else(|| FetchError::parse("batch response is not an array"))?;

        Ok(requests
            .iter()
            .enumerate()
            .map(|(index, request)| BatchEntry {
                index,
                request: request.clone(),
                outcome: self.batch_outcome(elements.get(index)),
            })
            .collect())
    }

    async fn fetch_page(&self, url: &str, params: &[(String, String)]) -> Result<PageCursor> {
        // Cursor links already carry part of the query; never send a key twice
        let url_keys: Vec<String> = url::Url::parse(url)
            .map(|u| u.query_pairs().map(|(k, _)| k.into_owned()).collect())
            .unwrap_or_default();
        let params: Vec<&(String, String)> = params
            .iter()
            .filter(|(k, _)| !url_keys.contains(k))
            .collect();
        let has_token = url_keys.iter().any(|k| k == "access_token")
            || params.iter().any(|(k, _)| k == "access_token");

        let mut request = self.client.get(url).query(&params);
        if !has_token {
            request = request.query(&[("access_token", self.access_token.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }

        let page: Value = response.json().await?;
        PageCursor::from_page(page)
    }

    fn resolve_url(&self, request: &GroupRequest) -> String {
        format!("{}{}", self.base, request.relative_path())
    }
}
