use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::PassportConfig;
use crate::error::{PassportError, Result};
use crate::models::{ScoreResponse, SigningMessage, SubmitPassportRequest};

/// Sent as `X-API-KEY`
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the scorer's score, signing-message and submission endpoints.
///
/// Requests are sent once. There is no retry and no timeout unless
/// `timeout_ms` is configured.
#[derive(Clone)]
pub struct ScorerClient {
    cfg: PassportConfig,
    client: reqwest::Client,
}

impl ScorerClient {
    pub fn new(cfg: PassportConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().default_headers(default_headers(&cfg)?);
        if let Some(timeout_ms) = cfg.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| PassportError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { cfg, client })
    }

    pub fn config(&self) -> &PassportConfig {
        &self.cfg
    }

    pub fn score_url(&self, address: &str) -> String {
        let path = format!("{}/{}", self.cfg.scorer_id, address);
        join(&self.cfg.score_endpoint, &path)
    }

    pub async fn get_score(&self, address: &str) -> Result<ScoreResponse> {
        let url = self.score_url(address);
        self.get_json("score", &url).await
    }

    pub async fn get_signing_message(&self) -> Result<SigningMessage> {
        self.get_json("signing_message", &self.cfg.sign_endpoint).await
    }

    /// The scorer's reply is only logged, so it is returned untyped
    pub async fn submit_passport(
        &self,
        request: &SubmitPassportRequest,
    ) -> Result<serde_json::Value> {
        self.post_json("submit_passport", &self.cfg.submit_endpoint, request)
            .await
    }

    async fn get_json<T>(&self, op: &'static str, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        info!(operation = op, url = %url, "sending request");
        let resp = self.client.get(url).send().await.map_err(|err| {
            warn!(operation = op, error = %err, "request error");
            PassportError::from(err)
        })?;
        Self::map_response(op, resp).await
    }

    async fn post_json<T, B>(&self, op: &'static str, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        info!(operation = op, url = %url, "sending request");
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                warn!(operation = op, error = %err, "request error");
                PassportError::from(err)
            })?;
        Self::map_response(op, resp).await
    }

    async fn map_response<T>(op: &'static str, resp: reqwest::Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| PassportError::Network(e.to_string()))?;
        if !status.is_success() {
            warn!(operation = op, status = status.as_u16(), body = %body, "non-success status");
            return Err(PassportError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        let parsed = serde_json::from_str(&body)?;
        debug!(operation = op, "response decoded");
        Ok(parsed)
    }
}

/// With an API key every request is JSON and carries the key. Without one,
/// nothing is added.
fn default_headers(cfg: &PassportConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(api_key) = &cfg.api_key {
        let value = HeaderValue::from_str(api_key)
            .map_err(|e| PassportError::Config(format!("invalid API key header: {e}")))?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
    }
    Ok(headers)
}

fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
