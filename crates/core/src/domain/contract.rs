use crate::domain::recommendation::{Confidence, Recommendation, Verdict};
use crate::domain::sentiment::{Sentiment, SentimentLabel};
use anyhow::ensure;
use serde::{Deserialize, Serialize};

// Wire shapes of the model output. Enum fields deserialize straight into the domain enums so an
// out-of-set value fails at decode time instead of being coerced.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmSentiment {
    pub sentiment: SentimentLabel,
    pub summary: String,
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LlmRecommendation {
    pub recommendation: Verdict,
    pub confidence: Confidence,
    pub summary: String,
    pub fundamental_analysis: String,
    pub technical_analysis: String,
    pub sentiment_analysis: String,
    pub risk_disclaimer: String,
}

fn required_text(field: &str, value: String) -> anyhow::Result<String> {
    let value = value.trim().to_string();
    ensure!(!value.is_empty(), "{field} must be non-empty");
    Ok(value)
}

impl LlmSentiment {
    pub fn validate_and_into_sentiment(self) -> anyhow::Result<Sentiment> {
        Ok(Sentiment {
            sentiment: self.sentiment,
            summary: required_text("summary", self.summary)?,
            justification: required_text("justification", self.justification)?,
        })
    }
}

impl LlmRecommendation {
    pub fn validate_and_into_recommendation(self) -> anyhow::Result<Recommendation> {
        Ok(Recommendation {
            recommendation: self.recommendation,
            confidence: self.confidence,
            summary: required_text("summary", self.summary)?,
            fundamental_analysis: required_text("fundamentalAnalysis", self.fundamental_analysis)?,
            technical_analysis: required_text("technicalAnalysis", self.technical_analysis)?,
            sentiment_analysis: required_text("sentimentAnalysis", self.sentiment_analysis)?,
            risk_disclaimer: required_text("riskDisclaimer", self.risk_disclaimer)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recommendation_json() -> serde_json::Value {
        json!({
            "recommendation": "Hold",
            "confidence": "Medium",
            "summary": "s",
            "fundamentalAnalysis": "f",
            "technicalAnalysis": "t",
            "sentimentAnalysis": "n",
            "riskDisclaimer": "r",
        })
    }

    #[test]
    fn accepts_every_verdict_and_confidence() {
        for verdict in Verdict::ALL {
            for confidence in Confidence::ALL {
                let mut v = recommendation_json();
                v["recommendation"] = json!(verdict.as_str());
                v["confidence"] = json!(confidence.as_str());
                let parsed: LlmRecommendation = serde_json::from_value(v).unwrap();
                let rec = parsed.validate_and_into_recommendation().unwrap();
                assert_eq!(rec.recommendation, verdict);
                assert_eq!(rec.confidence, confidence);
            }
        }
    }

    #[test]
    fn rejects_out_of_set_enums() {
        let mut v = recommendation_json();
        v["recommendation"] = json!("Strong Buy");
        assert!(serde_json::from_value::<LlmRecommendation>(v).is_err());

        let mut v = recommendation_json();
        v["confidence"] = json!("Very High");
        assert!(serde_json::from_value::<LlmRecommendation>(v).is_err());

        let v = json!({"sentiment": "Mixed", "summary": "s", "justification": "j"});
        assert!(serde_json::from_value::<LlmSentiment>(v).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let mut v = recommendation_json();
        v["targetPrice"] = json!(5000);
        assert!(serde_json::from_value::<LlmRecommendation>(v).is_err());
    }

    #[test]
    fn rejects_blank_narrative() {
        let mut v = recommendation_json();
        v["riskDisclaimer"] = json!("   ");
        let parsed: LlmRecommendation = serde_json::from_value(v).unwrap();
        let err = parsed.validate_and_into_recommendation().unwrap_err();
        assert!(err.to_string().contains("riskDisclaimer"));
    }

    #[test]
    fn trims_sentiment_text() {
        let v = json!({"sentiment": "Positive", "summary": " good news ", "justification": "j"});
        let parsed: LlmSentiment = serde_json::from_value(v).unwrap();
        let sentiment = parsed.validate_and_into_sentiment().unwrap();
        assert_eq!(sentiment.sentiment, SentimentLabel::Positive);
        assert_eq!(sentiment.summary, "good news");
    }
}
