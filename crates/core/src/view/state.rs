use crate::analysis::{normalize_ticker, AnalysisError};
use crate::domain::analysis::AnalysisResult;
use serde::Serialize;

pub const EMPTY_TICKER_NOTICE: &str = "Please enter a stock ticker.";
pub const FALLBACK_ERROR: &str = "An unknown error occurred. Check your API key and try again.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        ticker: String,
    },
    Error {
        message: String,
    },
    Loaded {
        result: Box<AnalysisResult>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Please enter a stock ticker.")]
    EmptyTicker,

    #[error("an analysis for {ticker} is already running")]
    Busy { ticker: String },
}

/// One user's search session. Only one analysis may be in flight; a submit while loading is
/// rejected rather than raced.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    input: String,
    notice: Option<String>,
    state: ViewState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Inline validation message shown next to the search box.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            ViewState::Loaded { result } => Some(result),
            _ => None,
        }
    }

    /// Validates the input and moves to `Loading`, dropping any previous result. Returns the
    /// normalized ticker to analyze.
    pub fn submit(&mut self, raw: &str) -> Result<String, SubmitError> {
        if let ViewState::Loading { ticker } = &self.state {
            return Err(SubmitError::Busy {
                ticker: ticker.clone(),
            });
        }

        let Some(ticker) = normalize_ticker(raw) else {
            self.notice = Some(EMPTY_TICKER_NOTICE.to_string());
            return Err(SubmitError::EmptyTicker);
        };

        self.input = ticker.clone();
        self.notice = None;
        self.state = ViewState::Loading {
            ticker: ticker.clone(),
        };
        Ok(ticker)
    }

    /// Settles the in-flight analysis. Ignored unless the session is loading.
    pub fn finish(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        match outcome {
            Ok(result) => {
                if self.is_loading() {
                    self.state = ViewState::Loaded {
                        result: Box::new(result),
                    };
                } else {
                    tracing::warn!(ticker = %result.ticker, "dropping analysis result; session not loading");
                }
            }
            Err(err) => self.fail(&err.to_string()),
        }
    }

    pub fn fail(&mut self, message: &str) {
        if !self.is_loading() {
            tracing::warn!(message, "dropping analysis failure; session not loading");
            return;
        }
        let message = message.trim();
        let message = if message.is_empty() {
            FALLBACK_ERROR
        } else {
            message
        };
        self.state = ViewState::Error {
            message: message.to_string(),
        };
    }
}
