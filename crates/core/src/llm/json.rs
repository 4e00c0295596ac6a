use crate::domain::contract::{LlmRecommendation, LlmSentiment};
use crate::domain::recommendation::Recommendation;
use crate::domain::sentiment::Sentiment;
use anyhow::Context;

pub fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        // Remove Markdown fences (```json ... ``` or ``` ... ```).
        let mut inner = trimmed;
        if let Some(after_first) = inner.split_once('\n').map(|(_, rest)| rest) {
            inner = after_first;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(trimmed[start..=end].trim().to_string())
}

fn json_body(text: &str) -> String {
    extract_json(text).unwrap_or_else(|| text.trim().to_string())
}

pub fn parse_sentiment(text: &str) -> anyhow::Result<Sentiment> {
    let json_str = json_body(text);
    let parsed = serde_json::from_str::<LlmSentiment>(&json_str)
        .with_context(|| format!("LLM output does not match the sentiment schema: {json_str}"))?;
    parsed.validate_and_into_sentiment()
}

pub fn parse_recommendation(text: &str) -> anyhow::Result<Recommendation> {
    let json_str = json_body(text);
    let parsed = serde_json::from_str::<LlmRecommendation>(&json_str).with_context(|| {
        format!("LLM output does not match the recommendation schema: {json_str}")
    })?;
    parsed.validate_and_into_recommendation()
}
