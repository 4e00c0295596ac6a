use crate::domain::recommendation::Recommendation;
use crate::domain::sentiment::Sentiment;
use crate::llm::{json, LlmClient, RecommendationInput, SentimentInput};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub(crate) const SENTIMENT_OK: &str = r#"{
  "sentiment": "Positive",
  "summary": "Quarterly profit rose on strong loan growth.",
  "justification": "Earnings beat consensus."
}"#;

pub(crate) const RECOMMENDATION_OK: &str = r#"{
  "recommendation": "Buy",
  "confidence": "High",
  "summary": "Quality lender at a fair price.",
  "fundamentalAnalysis": "ROE above 20% with low leverage.",
  "technicalAnalysis": "Consolidating above the 50-day average.",
  "sentimentAnalysis": "Positive news flow supports the call.",
  "riskDisclaimer": "Rate cuts could compress margins."
}"#;

/// Replays canned model output through the real parsers.
pub(crate) struct ScriptedLlm {
    sentiment: Result<String, String>,
    recommendation: Result<String, String>,
    pub sentiment_calls: AtomicUsize,
    pub recommendation_calls: AtomicUsize,
    pub last_recommendation_input: Mutex<Option<RecommendationInput>>,
}

impl ScriptedLlm {
    pub fn new(sentiment: Result<&str, &str>, recommendation: Result<&str, &str>) -> Self {
        Self {
            sentiment: sentiment.map(str::to_string).map_err(str::to_string),
            recommendation: recommendation.map(str::to_string).map_err(str::to_string),
            sentiment_calls: AtomicUsize::new(0),
            recommendation_calls: AtomicUsize::new(0),
            last_recommendation_input: Mutex::new(None),
        }
    }

    pub fn happy() -> Self {
        Self::new(Ok(SENTIMENT_OK), Ok(RECOMMENDATION_OK))
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.sentiment_calls.load(Ordering::SeqCst),
            self.recommendation_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    async fn request_sentiment(&self, _input: SentimentInput) -> anyhow::Result<Sentiment> {
        self.sentiment_calls.fetch_add(1, Ordering::SeqCst);
        match &self.sentiment {
            Ok(text) => json::parse_sentiment(text),
            Err(e) => Err(anyhow::anyhow!("{e}")),
        }
    }

    async fn request_recommendation(
        &self,
        input: RecommendationInput,
    ) -> anyhow::Result<Recommendation> {
        self.recommendation_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_recommendation_input.lock().unwrap() = Some(input);
        match &self.recommendation {
            Ok(text) => json::parse_recommendation(text),
            Err(e) => Err(anyhow::anyhow!("{e}")),
        }
    }
}
