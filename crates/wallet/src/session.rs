use crate::credentials::CredentialStore;
use common::api::GoldsaveClient;
use common::types::{MarketSummary, UserAccount};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Balance-dependent sections are unusable.
    Blocking,
    /// Render everything; values may be estimates.
    Advisory,
}

/// User-facing page errors. Exceptions never cross into the derived-metrics
/// or list-pipeline layers; they see absent data as empty/zero instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Authentication token not found. Please log in.")]
    MissingCredential,
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,
    #[error("Failed to load user data: {0}")]
    AccountUnavailable(String),
    #[error("Failed to load market data. Values might be estimates.")]
    MarketUnavailable,
    #[error("An unexpected error occurred while loading wallet data.")]
    Unexpected(String),
}

impl PageError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MarketUnavailable => Severity::Advisory,
            _ => Severity::Blocking,
        }
    }

    fn kind_str(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::SessionExpired => "session_expired",
            Self::AccountUnavailable(_) => "account_unavailable",
            Self::MarketUnavailable => "market_unavailable",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

/// What the embedding shell should do after a cycle is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    Stay,
    RedirectToLogin,
}

/// Reactive state tuple consumed by the rendering layer.
#[derive(Debug, Default)]
pub struct WalletState {
    pub user: Option<UserAccount>,
    pub market: Option<MarketSummary>,
    pub loading: bool,
    pub error: Option<PageError>,
}

/// Settled result of one fetch cycle, not yet applied to any state.
#[derive(Debug)]
pub struct CycleOutcome {
    pub user: Option<UserAccount>,
    pub market: Option<MarketSummary>,
    pub error: Option<PageError>,
    pub signal: SessionSignal,
}

/// One fetch cycle: credential gate, then both requests fanned out
/// concurrently. Either request may fail without aborting the other; the
/// account result dominates classification.
pub async fn run_cycle(
    client: &GoldsaveClient,
    credentials: &dyn CredentialStore,
) -> CycleOutcome {
    let token = match credentials.token() {
        Ok(Some(token)) => token,
        Ok(None) => {
            warn!("no persisted credential, redirecting to login");
            return CycleOutcome {
                user: None,
                market: None,
                error: Some(PageError::MissingCredential),
                signal: SessionSignal::RedirectToLogin,
            };
        }
        Err(e) => {
            error!(error = %e, "credential store read failed");
            return CycleOutcome {
                user: None,
                market: None,
                error: Some(PageError::Unexpected(e.to_string())),
                signal: SessionSignal::Stay,
            };
        }
    };

    let (account_res, market_res) = tokio::join!(
        client.fetch_account(&token),
        client.fetch_market_summary()
    );

    let market = match market_res {
        Ok(market) => Some(market),
        Err(e) => {
            warn!(error = %e, "market fetch failed");
            None
        }
    };

    match account_res {
        Ok(user) => {
            let error = market.is_none().then_some(PageError::MarketUnavailable);
            CycleOutcome {
                user: Some(user),
                market,
                error,
                signal: SessionSignal::Stay,
            }
        }
        Err(err) if err.is_unauthorized() => {
            // Fatal: wipe the session and discard the market result,
            // whatever its outcome was.
            credentials.clear();
            CycleOutcome {
                user: None,
                market: None,
                error: Some(PageError::SessionExpired),
                signal: SessionSignal::RedirectToLogin,
            }
        }
        Err(err) => {
            error!(error = %err, "account fetch failed");
            // The market snapshot, if any, is still stored; the account
            // failure stays the headline error.
            CycleOutcome {
                user: None,
                market,
                error: Some(PageError::AccountUnavailable(err.to_string())),
                signal: SessionSignal::Stay,
            }
        }
    }
}

/// Session-scoped page state with a generation counter. Overlapping refresh
/// cycles apply last-writer-wins: an outcome from a superseded generation is
/// discarded instead of overwriting fresher state.
#[derive(Debug, Default)]
pub struct WalletSession {
    state: WalletState,
    generation: u64,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    /// Start a refresh cycle: bump the generation, raise the loading flag,
    /// drop the previous error.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.state.loading = true;
        self.state.error = None;
        self.generation
    }

    /// Apply a settled cycle. `loading` transitions to false exactly once
    /// per applied cycle, whatever the outcome was.
    pub fn apply(&mut self, generation: u64, outcome: CycleOutcome) -> SessionSignal {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "discarding stale refresh cycle"
            );
            metrics::counter!("wallet_refresh_stale_discards_total").increment(1);
            return SessionSignal::Stay;
        }
        let outcome_label = outcome.error.as_ref().map_or("ok", PageError::kind_str);
        metrics::counter!("wallet_refresh_cycles_total", "outcome" => outcome_label).increment(1);

        self.state.user = outcome.user;
        self.state.market = outcome.market;
        self.state.error = outcome.error;
        self.state.loading = false;
        outcome.signal
    }

    pub async fn refresh(
        &mut self,
        client: &GoldsaveClient,
        credentials: &dyn CredentialStore,
    ) -> SessionSignal {
        let generation = self.begin_refresh();
        let outcome = run_cycle(client, credentials).await;
        self.apply(generation, outcome)
    }
}
