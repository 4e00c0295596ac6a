use crate::config::Settings;
use crate::domain::recommendation::{Confidence, Recommendation, Verdict};
use crate::domain::sentiment::{Sentiment, SentimentLabel};
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::{json, prompt};
use crate::llm::{LlmClient, RecommendationInput, SentimentInput};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "gemini";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// `None` waits for the service however long it takes.
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut config = Self::new(settings.require_gemini_api_key()?);
        if let Some(base_url) = &settings.gemini_base_url {
            config.base_url = base_url.clone();
        }
        if let Some(model) = &settings.gemini_model {
            config.model = model.clone();
        }
        config.timeout = settings.gemini_timeout_secs.map(Duration::from_secs);
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build reqwest client")?;
        Ok(Self { http, config })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(GeminiConfig::from_settings(settings)?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// One `generateContent` call; returns the model's text output.
    async fn generate_json(
        &self,
        stage: &'static str,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> anyhow::Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(&self.config.api_key)?);

        let req = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
            },
        };

        tracing::debug!(stage, model = %self.config.model, "gemini request");
        let res = self
            .http
            .post(self.url())
            .headers(headers)
            .json(&req)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Gemini response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            return Err(LlmDiagnosticsError {
                provider: PROVIDER,
                stage,
                detail: format!("status={status}"),
                raw_output: Some(text),
                raw_response_json,
            }
            .into());
        }

        let raw_json = serde_json::from_str::<serde_json::Value>(&text)
            .with_context(|| format!("failed to parse Gemini response JSON: {text}"))?;
        let parsed = serde_json::from_value::<GenerateContentResponse>(raw_json.clone())
            .context("failed to decode Gemini response into GenerateContentResponse")?;

        Self::response_text(&parsed).ok_or_else(|| {
            LlmDiagnosticsError {
                provider: PROVIDER,
                stage,
                detail: Self::empty_reason(&parsed),
                raw_output: None,
                raw_response_json: Some(raw_json),
            }
            .into()
        })
    }

    fn response_text(res: &GenerateContentResponse) -> Option<String> {
        let content = res.candidates.first()?.content.as_ref()?;
        let mut out = String::new();
        for part in &content.parts {
            if let Some(text) = &part.text {
                out.push_str(text);
            }
        }
        if out.trim().is_empty() {
            return None;
        }
        Some(out)
    }

    fn empty_reason(res: &GenerateContentResponse) -> String {
        if let Some(reason) = res
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("prompt blocked: {reason}");
        }
        match res.candidates.first() {
            None => "response has no candidates".to_string(),
            Some(c) => format!(
                "candidate has no text (finish_reason={})",
                c.finish_reason.as_deref().unwrap_or("unknown")
            ),
        }
    }

    fn parse_failure(stage: &'static str, err: anyhow::Error, text: String) -> anyhow::Error {
        LlmDiagnosticsError {
            provider: PROVIDER,
            stage,
            detail: format!("{err:#}"),
            raw_output: Some(text),
            raw_response_json: None,
        }
        .into()
    }

    pub fn sentiment_schema() -> serde_json::Value {
        let labels: Vec<&str> = SentimentLabel::ALL.iter().map(|s| s.as_str()).collect();
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "sentiment": {
                    "type": "STRING",
                    "enum": labels,
                    "description": "The overall sentiment."
                },
                "summary": {
                    "type": "STRING",
                    "description": "A brief summary of recent hypothetical news."
                },
                "justification": {
                    "type": "STRING",
                    "description": "A short reason for the sentiment classification."
                }
            },
            "required": ["sentiment", "summary", "justification"]
        })
    }

    pub fn recommendation_schema() -> serde_json::Value {
        let verdicts: Vec<&str> = Verdict::ALL.iter().map(|v| v.as_str()).collect();
        let confidences: Vec<&str> = Confidence::ALL.iter().map(|c| c.as_str()).collect();
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "recommendation": {
                    "type": "STRING",
                    "enum": verdicts,
                    "description": "The final investment recommendation."
                },
                "confidence": {
                    "type": "STRING",
                    "enum": confidences,
                    "description": "The confidence level in this recommendation."
                },
                "summary": {
                    "type": "STRING",
                    "description": "A concise executive summary of the recommendation and key drivers."
                },
                "fundamentalAnalysis": {
                    "type": "STRING",
                    "description": "A detailed analysis based on the provided fundamental metrics."
                },
                "technicalAnalysis": {
                    "type": "STRING",
                    "description": "A brief analysis of the technical snapshot provided."
                },
                "sentimentAnalysis": {
                    "type": "STRING",
                    "description": "How the news sentiment influences the overall recommendation."
                },
                "riskDisclaimer": {
                    "type": "STRING",
                    "description": "A standard risk disclaimer for this AI-generated report."
                }
            },
            "required": [
                "recommendation",
                "confidence",
                "summary",
                "fundamentalAnalysis",
                "technicalAnalysis",
                "sentimentAnalysis",
                "riskDisclaimer"
            ]
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    async fn request_sentiment(&self, input: SentimentInput) -> anyhow::Result<Sentiment> {
        let stage = "sentiment";
        let text = self
            .generate_json(stage, prompt::sentiment_prompt(&input), Self::sentiment_schema())
            .await?;
        json::parse_sentiment(&text).map_err(|e| Self::parse_failure(stage, e, text))
    }

    async fn request_recommendation(
        &self,
        input: RecommendationInput,
    ) -> anyhow::Result<Recommendation> {
        let stage = "recommendation";
        let text = self
            .generate_json(
                stage,
                prompt::recommendation_prompt(&input),
                Self::recommendation_schema(),
            )
            .await?;
        json::parse_recommendation(&text).map_err(|e| Self::parse_failure(stage, e, text))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,

    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,

    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
