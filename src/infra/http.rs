//! Turbine reached over HTTP.
//!
//! `GET {endpoint}/ready` answers 2xx once ready and 503 while warming up.
//! `POST {endpoint}/query` takes the four parameters as JSON and answers
//! `{"value": n}` or `{"error": "reason"}`.
use std::thread;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};
use turbine_core::{QueryOutcome, QueryParams, RandomnessService, ServiceError};

use crate::infra::constants::{CONNECT_TIMEOUT_SECS, READY_POLL_MS};

pub struct HttpTurbine {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl HttpTurbine {
    pub fn new(endpoint: &str, api_key: Option<SecretString>) -> Result<Self, ServiceError> {
        // No overall timeout: a slow query is waited out, like readiness
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Option::<Duration>::None)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self { client, endpoint: endpoint.trim_end_matches('/').to_string(), api_key })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    fn authorized(&self, request: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key.expose_secret()),
            None => request,
        }
    }
}

impl RandomnessService for HttpTurbine {
    fn wait_for_ready(&self) -> Result<(), ServiceError> {
        loop {
            let response = self
                .authorized(self.client.get(self.url("ready")))
                .send()
                .map_err(|e| ServiceError::Transport(e.to_string()))?;
            match response.status() {
                status if status.is_success() => return Ok(()),
                StatusCode::SERVICE_UNAVAILABLE => {
                    debug!("turbine warming up");
                    thread::sleep(Duration::from_millis(READY_POLL_MS));
                }
                status => return Err(ServiceError::NotReady(format!("HTTP {}", status))),
            }
        }
    }

    fn query(&self, params: QueryParams) -> QueryOutcome {
        let response = match self.authorized(self.client.post(self.url("query"))).json(&params).send() {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "query request failed");
                return QueryOutcome::Failure(format!("request failed: {}", e));
            }
        };

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            return QueryOutcome::Failure(format!("HTTP {}", status));
        }
        parse_query_response(&body)
    }
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    value: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}

/// An explicit `error` wins over a `value`; a body with neither is a failure.
pub fn parse_query_response(body: &str) -> QueryOutcome {
    match serde_json::from_str::<QueryResponse>(body) {
        Ok(QueryResponse { error: Some(reason), .. }) => QueryOutcome::Failure(reason),
        Ok(QueryResponse { value: Some(value), .. }) => QueryOutcome::Success(value),
        Ok(_) => QueryOutcome::Failure("response has neither value nor error".to_string()),
        Err(e) => QueryOutcome::Failure(format!("parse error: {}", e)),
    }
}
