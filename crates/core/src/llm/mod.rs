use crate::domain::market::FundamentalData;
use crate::domain::recommendation::Recommendation;
use crate::domain::sentiment::Sentiment;

pub mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod gemini;
pub mod json;
pub mod prompt;

#[derive(Debug, Clone)]
pub struct SentimentInput {
    pub ticker: String,
    pub company_name: String,
}

#[derive(Debug, Clone)]
pub struct RecommendationInput {
    pub ticker: String,
    pub company_name: String,
    pub fundamentals: FundamentalData,
    pub sentiment: Sentiment,
}

/// Schema-constrained generation. Implementations return validated records or an error; they
/// never fill in or coerce fields the model got wrong.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn request_sentiment(&self, input: SentimentInput) -> anyhow::Result<Sentiment>;

    async fn request_recommendation(
        &self,
        input: RecommendationInput,
    ) -> anyhow::Result<Recommendation>;
}
