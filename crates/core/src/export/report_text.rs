use crate::domain::analysis::AnalysisResult;
use crate::export::{text_file_name, ExportFile};

pub const DISCLAIMER: &str = "This report is generated by an AI assistant and is for informational purposes only. It does not constitute financial advice. Always do your own research before making any investment decisions.";

pub fn render_report_text(result: &AnalysisResult) -> String {
    let rec = &result.recommendation;
    let f = &result.fundamental_data;
    let s = &result.sentiment;
    format!(
        "STOCK RESEARCH REPORT
=======================

Company: {company} ({ticker})
Date: {date}

---

EXECUTIVE SUMMARY
Recommendation: {verdict}
Confidence: {confidence}

{summary}

---

FUNDAMENTAL ANALYSIS
{fundamental}

Key Metrics:
- EPS: {eps}
- PER: {per}
- PBV: {pbv}
- ROE: {roe}%
- DER: {der}
- Dividend Yield: {dy}%

---

TECHNICAL ANALYSIS
{technical}
(See charts for visual details)

---

NEWS SENTIMENT ANALYSIS
Sentiment: {sentiment}
{sentiment_analysis}

Summary: {news}

---

RISKS & DISCLAIMER
{risk}
{DISCLAIMER}
",
        company = result.company_name,
        ticker = result.ticker,
        date = result.generated_at.date_naive().format("%Y-%m-%d"),
        verdict = rec.recommendation,
        confidence = rec.confidence,
        summary = rec.summary,
        fundamental = rec.fundamental_analysis,
        eps = f.eps,
        per = f.per,
        pbv = f.pbv,
        roe = f.roe,
        der = f.der,
        dy = f.dividend_yield,
        technical = rec.technical_analysis,
        sentiment = s.sentiment,
        sentiment_analysis = rec.sentiment_analysis,
        news = s.summary,
        risk = rec.risk_disclaimer,
    )
}

pub fn export_text(result: &AnalysisResult) -> ExportFile {
    ExportFile {
        file_name: text_file_name(&result.ticker),
        content_type: "text/plain; charset=utf-8",
        bytes: render_report_text(result).into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::render::tests::sample_result;

    #[test]
    fn sections_appear_in_template_order() {
        let text = render_report_text(&sample_result());
        let order = [
            "STOCK RESEARCH REPORT",
            "Company: PT Bank Central Asia Tbk (BBCA)",
            "Date: 2026-10-19",
            "EXECUTIVE SUMMARY",
            "Recommendation: Hold",
            "Confidence: Medium",
            "Fairly valued.",
            "FUNDAMENTAL ANALYSIS",
            "Solid ROE.",
            "- EPS: 251.3",
            "- PER: 24.1",
            "- PBV: 4.75",
            "- ROE: 21.5%",
            "- DER: 1.2",
            "- Dividend Yield: 2.08%",
            "TECHNICAL ANALYSIS",
            "Range-bound.",
            "(See charts for visual details)",
            "NEWS SENTIMENT ANALYSIS",
            "Sentiment: Neutral",
            "Neutral news.",
            "Summary: Mixed quarter.",
            "RISKS & DISCLAIMER",
            "Rates.",
            DISCLAIMER,
        ];
        let mut from = 0;
        for needle in order {
            let at = text[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("{needle:?} missing or out of order"));
            from += at + needle.len();
        }
    }

    #[test]
    fn export_is_named_after_ticker() {
        let file = export_text(&sample_result());
        assert_eq!(file.file_name, "BBCA-Full-Report.txt");
        assert!(file.content_type.starts_with("text/plain"));
    }
}
