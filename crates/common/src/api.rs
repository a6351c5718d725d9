use crate::types::{MarketSummary, UserAccount};
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure modes of one backend request, distinguishable so the session
/// layer can tell an auth-fatal failure from a degraded one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("credential rejected by the backend")]
    Unauthorized,
    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Stable label for metrics.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Status { .. } => "status",
            Self::Transport(_) => "transport",
            Self::Decode { .. } => "decode",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Client for the GoldSave backend: one authenticated account endpoint, one
/// public market endpoint.
pub struct GoldsaveClient {
    base_url: String,
    client: reqwest::Client,
}

impl GoldsaveClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn account_url(&self) -> String {
        format!("{}/api/users/me", self.base_url)
    }

    pub fn market_summary_url(&self) -> String {
        format!("{}/api/market/gold-summary", self.base_url)
    }

    /// GET `/api/users/me` with a bearer credential.
    pub async fn fetch_account(&self, token: &str) -> Result<UserAccount, ApiError> {
        let start = Instant::now();
        let res = self.fetch_account_inner(token).await;
        observe("account", start, &res);
        res
    }

    /// GET `/api/market/gold-summary`, unauthenticated.
    pub async fn fetch_market_summary(&self) -> Result<MarketSummary, ApiError> {
        let start = Instant::now();
        let res = self.fetch_market_summary_inner().await;
        observe("market_summary", start, &res);
        res
    }

    async fn fetch_account_inner(&self, token: &str) -> Result<UserAccount, ApiError> {
        let url = self.account_url();
        debug!(url = %url, "fetching account snapshot");
        let resp = self.client.get(&url).bearer_auth(token).send().await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "account request rejected as unauthorized");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        resp.json().await.map_err(|source| ApiError::Decode {
            endpoint: "account",
            source,
        })
    }

    async fn fetch_market_summary_inner(&self) -> Result<MarketSummary, ApiError> {
        let url = self.market_summary_url();
        debug!(url = %url, "fetching market summary");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        resp.json().await.map_err(|source| ApiError::Decode {
            endpoint: "market_summary",
            source,
        })
    }
}

fn observe<T>(endpoint: &'static str, start: Instant, res: &Result<T, ApiError>) {
    let ms = start.elapsed().as_secs_f64() * 1000.0;
    metrics::histogram!("wallet_api_latency_ms", "endpoint" => endpoint).record(ms);
    match res {
        Ok(_) => {
            metrics::counter!("wallet_api_requests_total", "endpoint" => endpoint, "status" => "ok")
                .increment(1);
        }
        Err(e) => {
            metrics::counter!("wallet_api_requests_total", "endpoint" => endpoint, "status" => "error")
                .increment(1);
            metrics::counter!("wallet_api_errors_total", "endpoint" => endpoint, "kind" => e.kind_str())
                .increment(1);
        }
    }
}
