//! HTTP-backed live trade executor.
//!
//! Posts each intent to a configured execution endpoint and reads back the
//! realised profit or loss. The endpoint authenticates with a bearer key
//! taken from `POLYPULSE_API_KEY`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::money::{amount_from_f64, amount_to_f64, round_amount, Amount};
use crate::domain::signal::Signal;
use crate::domain::trade::TradeIntent;
use crate::error::{ConfigError, ExecutionError};
use crate::port::outbound::execution::TradeExecutor;

/// Reported as the missing field when no API key was supplied.
const API_KEY_FIELD: &str = "POLYPULSE_API_KEY";

/// Decimal places kept from the venue's reported P/L.
const PNL_PRECISION: u32 = 6;

/// Executor delegating to an external HTTP venue.
#[derive(Debug)]
pub struct LiveExecutor {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl LiveExecutor {
    /// Build the executor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` when the endpoint or API key is
    /// absent or blank, and `ConfigError::InvalidValue` when the HTTP client
    /// cannot be constructed.
    pub fn new(
        endpoint: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or(ConfigError::MissingField { field: "endpoint" })?;
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingField { field: API_KEY_FIELD })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "live",
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Endpoint trades are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Serialize)]
struct ExecuteRequest {
    signal: Signal,
    stake: f64,
    take_profit: f64,
    stop_loss: f64,
    confidence: f64,
}

impl From<&TradeIntent> for ExecuteRequest {
    fn from(intent: &TradeIntent) -> Self {
        Self {
            signal: intent.signal,
            stake: amount_to_f64(intent.stake),
            take_profit: amount_to_f64(intent.take_profit),
            stop_loss: amount_to_f64(intent.stop_loss),
            confidence: intent.confidence,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    profit_loss: f64,
}

fn classify(status: StatusCode, body: &str) -> ExecutionError {
    let detail = if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    };
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ExecutionError::Unauthorized(detail),
        _ => ExecutionError::Rejected(detail),
    }
}

#[async_trait]
impl TradeExecutor for LiveExecutor {
    async fn execute(&self, intent: &TradeIntent) -> Result<Amount, ExecutionError> {
        let request = ExecuteRequest::from(intent);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExecutionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = classify(status, body.trim());
            warn!(%status, error = %error, "Live execution refused");
            return Err(error);
        }

        let body: ExecuteResponse = response
            .json()
            .await
            .map_err(|e| ExecutionError::Rejected(format!("malformed response: {e}")))?;
        if !body.profit_loss.is_finite() {
            return Err(ExecutionError::Rejected(
                "non-finite profit_loss in response".into(),
            ));
        }

        let pnl = round_amount(amount_from_f64(body.profit_loss), PNL_PRECISION);
        debug!(signal = %intent.signal, profit_loss = %pnl, "Live fill");
        Ok(pnl)
    }

    fn executor_name(&self) -> &'static str {
        "live"
    }
}
