use serde_json::Value;

#[derive(Debug, Clone, thiserror::Error)]
#[error("LLM error (provider={provider}, stage={stage}): {detail}")]
pub struct LlmDiagnosticsError {
    pub provider: &'static str,
    pub stage: &'static str,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}
