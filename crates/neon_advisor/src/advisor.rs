//! The advisor seam and the total hint client built on it.

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, AdvisorErrorKind};
use crate::llm_client::LlmClient;
use crate::parse::parse_suggestion;
use crate::request::HintRequest;
use crate::suggestion::{HintOutcome, HintSuggestion};
use async_trait::async_trait;
use neon_tictactoe::{Board, Mark};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// External move-suggestion collaborator.
///
/// Returns the raw reply text; validation happens in [`HintAdvisor`].
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Asks for a move suggestion.
    async fn advise(&self, request: &HintRequest) -> Result<String, AdvisorError>;
}

/// Advisor that always fails, used when no provider is configured.
#[derive(Debug, Clone)]
pub struct UnavailableAdvisor {
    reason: String,
}

impl UnavailableAdvisor {
    /// Creates an unavailable advisor that reports `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Advisor for UnavailableAdvisor {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn advise(&self, _request: &HintRequest) -> Result<String, AdvisorError> {
        Err(AdvisorError::new(
            AdvisorErrorKind::Unavailable,
            self.reason.clone(),
        ))
    }
}

/// Hint client that never fails.
///
/// Every call returns a [`HintOutcome`]; advisor errors, timeouts and bad
/// payloads all become the fallback suggestion. No retries, no caching.
#[derive(Clone)]
pub struct HintAdvisor {
    advisor: Arc<dyn Advisor>,
    timeout: Duration,
}

impl std::fmt::Debug for HintAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HintAdvisor")
            .field("advisor", &self.advisor.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HintAdvisor {
    /// Wraps an advisor with a request timeout.
    pub fn new(advisor: Arc<dyn Advisor>, timeout: Duration) -> Self {
        Self { advisor, timeout }
    }

    /// Builds the client from configuration.
    ///
    /// A missing API key does not fail: hints then always fall back.
    #[instrument(skip(config), fields(provider = %config.provider()))]
    pub fn from_config(config: &AdvisorConfig) -> Self {
        let advisor: Arc<dyn Advisor> = match config.create_llm_config() {
            Ok(llm) => Arc::new(LlmClient::new(llm)),
            Err(e) => {
                warn!(error = %e, "Advisor not configured, hints will fall back");
                Arc::new(UnavailableAdvisor::new(e.message))
            }
        };
        Self::new(advisor, config.timeout())
    }

    /// Client whose hints always fall back.
    pub fn offline() -> Self {
        Self::new(
            Arc::new(UnavailableAdvisor::new("Advisor disabled (offline mode)")),
            Duration::from_secs(1),
        )
    }

    /// Name of the wrapped advisor.
    pub fn name(&self) -> &str {
        self.advisor.name()
    }

    /// Requests a hint for `mark` to move on `board`.
    ///
    /// The caller is expected to ask only while the game is in progress.
    /// The reply is checked against `board`: out-of-range indices and
    /// indices of occupied cells come back as the fallback suggestion, with
    /// [`AdvisorErrorKind::Malformed`] as the cause.
    #[instrument(skip(self, board), fields(advisor = %self.advisor.name()))]
    pub async fn request_hint(&self, board: &Board, mark: Mark) -> HintOutcome {
        let request = HintRequest::new(*board, mark);
        let outcome = HintOutcome::from(self.try_request(&request).await);
        match &outcome {
            HintOutcome::Advised(suggestion) => {
                info!(index = *suggestion.suggested_index(), "Hint received");
            }
            HintOutcome::Fallback { cause, .. } => {
                warn!(kind = %cause.kind, "Hint fell back");
            }
        }
        outcome
    }

    async fn try_request(&self, request: &HintRequest) -> Result<HintSuggestion, AdvisorError> {
        let text = tokio::time::timeout(self.timeout, self.advisor.advise(request))
            .await
            .map_err(|_| {
                AdvisorError::new(
                    AdvisorErrorKind::Timeout,
                    format!("No reply within {:?}", self.timeout),
                )
            })??;
        parse_suggestion(&text, request.board())
    }
}
