//! Runs one research analysis: synthetic fundamentals and chart, then the sentiment call, then
//! the recommendation call that depends on both. The result is only assembled once every step
//! has succeeded.

use crate::domain::analysis::AnalysisResult;
use crate::llm::{LlmClient, RecommendationInput, SentimentInput};
use crate::market;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Please enter a stock ticker.")]
    EmptyTicker,

    #[error("Failed to get sentiment analysis from AI. Please check the logs for details.")]
    Sentiment(#[source] anyhow::Error),

    #[error("Failed to get investment recommendation from AI. Please check the logs for details.")]
    Recommendation(#[source] anyhow::Error),
}

impl AnalysisError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyTicker)
    }

    /// The provider-level cause, if any.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            Self::EmptyTicker => None,
            Self::Sentiment(e) | Self::Recommendation(e) => Some(e),
        }
    }
}

/// Trims and upper-cases user input; `None` when nothing is left.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim();
    if ticker.is_empty() {
        return None;
    }
    Some(ticker.to_uppercase())
}

#[derive(Clone)]
pub struct Analyzer {
    llm: Arc<dyn LlmClient>,
}

impl Analyzer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn run_analysis(&self, raw_input: &str) -> Result<AnalysisResult, AnalysisError> {
        let mut rng = StdRng::from_entropy();
        self.run_analysis_with(raw_input, Utc::now(), &mut rng).await
    }

    pub async fn run_analysis_with<R: Rng + Send>(
        &self,
        raw_input: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<AnalysisResult, AnalysisError> {
        let ticker = normalize_ticker(raw_input).ok_or(AnalysisError::EmptyTicker)?;
        let analysis_id = Uuid::new_v4();
        tracing::info!(%analysis_id, %ticker, provider = self.llm.provider_name(), "analysis started");

        let fundamentals = market::generate_fundamentals(&ticker, rng);
        let chart_data = market::generate_chart_series(now.date_naive(), rng);
        let company_name = fundamentals.company_name.clone();

        let sentiment = self
            .llm
            .request_sentiment(SentimentInput {
                ticker: ticker.clone(),
                company_name: company_name.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!(%analysis_id, %ticker, stage = "sentiment", error = %format!("{e:#}"), "analysis failed");
                AnalysisError::Sentiment(e)
            })?;

        let recommendation = self
            .llm
            .request_recommendation(RecommendationInput {
                ticker: ticker.clone(),
                company_name: company_name.clone(),
                fundamentals: fundamentals.clone(),
                sentiment: sentiment.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!(%analysis_id, %ticker, stage = "recommendation", error = %format!("{e:#}"), "analysis failed");
                AnalysisError::Recommendation(e)
            })?;

        tracing::info!(
            %analysis_id,
            %ticker,
            verdict = %recommendation.recommendation,
            confidence = %recommendation.confidence,
            "analysis finished"
        );

        Ok(AnalysisResult {
            analysis_id,
            generated_at: now,
            ticker,
            company_name,
            fundamental_data: fundamentals,
            chart_data,
            sentiment,
            recommendation,
        })
    }
}
