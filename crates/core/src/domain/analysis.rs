use crate::domain::market::{ChartPoint, FundamentalData};
use crate::domain::recommendation::Recommendation;
use crate::domain::sentiment::Sentiment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub ticker: String,
    pub company_name: String,
    pub fundamental_data: FundamentalData,
    pub chart_data: Vec<ChartPoint>,
    pub sentiment: Sentiment,
    pub recommendation: Recommendation,
}
