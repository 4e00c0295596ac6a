use crate::domain::analysis::AnalysisResult;
use crate::domain::market::FundamentalData;
use crate::domain::recommendation::{Recommendation, Verdict};
use crate::domain::sentiment::{Sentiment, SentimentLabel};
use crate::export;
use crate::view::chart::ChartPanels;
use crate::view::state::{Session, ViewState};
use serde::Serialize;

pub const APP_TITLE: &str = "AI Stock Research";
pub const WELCOME_TITLE: &str = "AI Stock Research Assistant";
pub const WELCOME_BODY: &str = "Enter a stock ticker for an Indonesian company (e.g., BBCA, TLKM, BBRI) to get a comprehensive analysis powered by AI. We'll provide fundamental data, technical charts, news sentiment, and an investment recommendation.";
pub const PROGRESS_MESSAGE: &str = "Analyzing... fetching data and asking the AI for its view.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub search: SearchBox,
    pub notice: Option<String>,
    pub body: Body,
    /// Present only when a report is loaded.
    pub downloads: Option<Downloads>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBox {
    pub value: String,
    pub placeholder: &'static str,
    pub button_label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Body {
    Welcome { title: &'static str, text: &'static str },
    Progress { message: &'static str },
    Failure { message: String },
    Report(Box<ReportView>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Downloads {
    pub pdf: String,
    pub csv: String,
    pub txt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Positive,
    Caution,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub header: CompanyHeader,
    pub recommendation: RecommendationCard,
    pub chart: ChartPanels,
    pub fundamentals: FundamentalsCard,
    pub sentiment: SentimentCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHeader {
    pub company_name: String,
    pub ticker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationCard {
    pub verdict: String,
    pub tone: Tone,
    pub confidence: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundamentalsCard {
    pub rows: Vec<MetricRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentCard {
    pub label: String,
    pub tone: Tone,
    pub justification: String,
    pub summary: String,
}

pub fn render(session: &Session) -> Screen {
    let loading = session.is_loading();
    let search = SearchBox {
        value: session.input().to_string(),
        placeholder: "Enter stock ticker (e.g., BBCA)",
        button_label: if loading { "..." } else { "Analyze" },
        disabled: loading,
    };

    let (body, downloads) = match session.state() {
        ViewState::Idle => (
            Body::Welcome {
                title: WELCOME_TITLE,
                text: WELCOME_BODY,
            },
            None,
        ),
        ViewState::Loading { .. } => (
            Body::Progress {
                message: PROGRESS_MESSAGE,
            },
            None,
        ),
        ViewState::Error { message } => (
            Body::Failure {
                message: message.clone(),
            },
            None,
        ),
        ViewState::Loaded { result } => (
            Body::Report(Box::new(report_view(result))),
            Some(Downloads {
                pdf: export::pdf_file_name(&result.ticker),
                csv: export::csv_file_name(&result.ticker),
                txt: export::text_file_name(&result.ticker),
            }),
        ),
    };

    Screen {
        search,
        notice: session.notice().map(str::to_string),
        body,
        downloads,
    }
}

pub fn report_view(result: &AnalysisResult) -> ReportView {
    ReportView {
        header: CompanyHeader {
            company_name: result.company_name.clone(),
            ticker: result.ticker.clone(),
        },
        recommendation: recommendation_card(&result.recommendation),
        chart: ChartPanels::from_points(&result.chart_data),
        fundamentals: fundamentals_card(&result.fundamental_data),
        sentiment: sentiment_card(&result.sentiment),
    }
}

fn verdict_tone(verdict: Verdict) -> Tone {
    match verdict {
        Verdict::Buy => Tone::Positive,
        Verdict::Hold => Tone::Caution,
        Verdict::Sell => Tone::Negative,
    }
}

fn sentiment_tone(label: SentimentLabel) -> Tone {
    match label {
        SentimentLabel::Positive => Tone::Positive,
        SentimentLabel::Neutral => Tone::Caution,
        SentimentLabel::Negative => Tone::Negative,
    }
}

fn recommendation_card(rec: &Recommendation) -> RecommendationCard {
    let section = |title, body: &String| Section {
        title,
        body: body.clone(),
    };
    RecommendationCard {
        verdict: rec.recommendation.as_str().to_uppercase(),
        tone: verdict_tone(rec.recommendation),
        confidence: rec.confidence.to_string(),
        sections: vec![
            section("Executive Summary", &rec.summary),
            section("Fundamental Analysis", &rec.fundamental_analysis),
            section("Technical Analysis", &rec.technical_analysis),
            section("Sentiment Analysis", &rec.sentiment_analysis),
            section("Risks & Disclaimer", &rec.risk_disclaimer),
        ],
    }
}

fn fundamentals_card(data: &FundamentalData) -> FundamentalsCard {
    let row = |label, value: String| MetricRow { label, value };
    FundamentalsCard {
        rows: vec![
            row("EPS", data.eps.to_string()),
            row("PER", format!("{:.2}", data.per)),
            row("PBV", format!("{:.2}", data.pbv)),
            row("ROE", format!("{:.2}%", data.roe)),
            row("DER", format!("{:.2}", data.der)),
            row("Dividend Yield", format!("{:.2}%", data.dividend_yield)),
        ],
    }
}

fn sentiment_card(sentiment: &Sentiment) -> SentimentCard {
    SentimentCard {
        label: sentiment.sentiment.to_string(),
        tone: sentiment_tone(sentiment.sentiment),
        justification: sentiment.justification.clone(),
        summary: sentiment.summary.clone(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::market::{ChartPoint, Ohlc};
    use crate::domain::recommendation::Confidence;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    pub(crate) fn sample_result() -> AnalysisResult {
        let fundamentals = FundamentalData {
            company_name: "PT Bank Central Asia Tbk".to_string(),
            eps: 251.3,
            per: 24.1,
            pbv: 4.75,
            roe: 21.5,
            der: 1.2,
            dividend_yield: 2.08,
        };
        AnalysisResult {
            analysis_id: Uuid::nil(),
            generated_at: Utc.with_ymd_and_hms(2026, 10, 19, 3, 0, 0).unwrap(),
            ticker: "BBCA".to_string(),
            company_name: fundamentals.company_name.clone(),
            fundamental_data: fundamentals,
            chart_data: (1..=3)
                .map(|d| ChartPoint {
                    date: NaiveDate::from_ymd_opt(2026, 10, 16 + d).unwrap(),
                    price: Ohlc {
                        open: 4000.0,
                        high: 4100.0,
                        low: 3950.0,
                        close: 4050.0,
                    },
                    rsi: 48.5,
                })
                .collect(),
            sentiment: Sentiment {
                sentiment: SentimentLabel::Neutral,
                summary: "Mixed quarter.".to_string(),
                justification: "Margins flat.".to_string(),
            },
            recommendation: Recommendation {
                recommendation: Verdict::Hold,
                confidence: Confidence::Medium,
                summary: "Fairly valued.".to_string(),
                fundamental_analysis: "Solid ROE.".to_string(),
                technical_analysis: "Range-bound.".to_string(),
                sentiment_analysis: "Neutral news.".to_string(),
                risk_disclaimer: "Rates.".to_string(),
            },
        }
    }

    fn loaded_session() -> Session {
        let mut session = Session::new();
        session.submit("bbca").unwrap();
        session.finish(Ok(sample_result()));
        session
    }

    #[test]
    fn idle_shows_welcome() {
        let screen = render(&Session::new());
        assert!(matches!(screen.body, Body::Welcome { .. }));
        assert!(!screen.search.disabled);
        assert!(screen.downloads.is_none());
    }

    #[test]
    fn loading_disables_search() {
        let mut session = Session::new();
        session.submit("tlkm").unwrap();
        let screen = render(&session);
        assert!(matches!(screen.body, Body::Progress { .. }));
        assert!(screen.search.disabled);
        assert_eq!(screen.search.button_label, "...");
        assert_eq!(screen.search.value, "TLKM");
    }

    #[test]
    fn error_shows_message_and_accepts_input() {
        let mut session = Session::new();
        session.submit("BBCA").unwrap();
        session.fail("boom");
        let screen = render(&session);
        assert_eq!(
            screen.body,
            Body::Failure {
                message: "boom".to_string()
            }
        );
        assert!(!screen.search.disabled);
        assert!(screen.downloads.is_none());
    }

    #[test]
    fn loaded_populates_every_section() {
        let screen = render(&loaded_session());
        let Body::Report(report) = &screen.body else {
            panic!("expected report body");
        };

        assert_eq!(report.header.company_name, "PT Bank Central Asia Tbk");
        assert_eq!(report.header.ticker, "BBCA");
        assert_eq!(report.recommendation.verdict, "HOLD");
        assert_eq!(report.recommendation.tone, Tone::Caution);
        assert_eq!(report.recommendation.sections.len(), 5);
        assert_eq!(report.chart.candles.len(), 3);
        assert_eq!(report.fundamentals.rows.len(), 6);
        assert_eq!(report.sentiment.label, "Neutral");

        let downloads = screen.downloads.unwrap();
        assert_eq!(downloads.pdf, "BBCA-Research-Report.pdf");
        assert_eq!(downloads.csv, "BBCA-Fundamental-Data.csv");
        assert_eq!(downloads.txt, "BBCA-Full-Report.txt");
    }

    #[test]
    fn fundamentals_are_formatted_for_display() {
        let card = fundamentals_card(&sample_result().fundamental_data);
        let values: Vec<(&str, &str)> = card
            .rows
            .iter()
            .map(|r| (r.label, r.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("EPS", "251.3"),
                ("PER", "24.10"),
                ("PBV", "4.75"),
                ("ROE", "21.50%"),
                ("DER", "1.20"),
                ("Dividend Yield", "2.08%"),
            ]
        );
    }

    #[test]
    fn inline_notice_survives_render() {
        let mut session = loaded_session();
        let _ = session.submit("");
        let screen = render(&session);
        assert_eq!(screen.notice.as_deref(), Some("Please enter a stock ticker."));
        assert!(matches!(screen.body, Body::Report(_)));
    }
}
