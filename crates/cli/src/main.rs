use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockdesk_core::analysis::{AnalysisError, Analyzer};
use stockdesk_core::domain::analysis::AnalysisResult;
use stockdesk_core::export;
use stockdesk_core::llm::error::LlmDiagnosticsError;
use stockdesk_core::llm::gemini::GeminiClient;
use stockdesk_core::view::{self, text, Session, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportKind {
    Pdf,
    Csv,
    Txt,
}

#[derive(Debug, Parser)]
#[command(name = "stockdesk_cli")]
struct Args {
    /// IDX ticker, e.g. BBCA.
    ticker: String,

    /// Directory the exports are written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Export to write once the report is loaded. Repeatable.
    #[arg(long = "export", value_enum)]
    exports: Vec<ExportKind>,

    /// Print the analysis result as JSON instead of the terminal report.
    #[arg(long)]
    json: bool,

    /// Report date (YYYY-MM-DD) the chart window ends on. Defaults to today's UTC date.
    #[arg(long)]
    as_of_date: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockdesk_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let now = chrono::Utc::now();
    let report_date =
        stockdesk_core::time::window::resolve_report_date(args.as_of_date.as_deref(), now)?;
    let now = report_date.and_time(now.time()).and_utc();

    let mut session = Session::new();
    let ticker = session.submit(&args.ticker)?;

    let llm = GeminiClient::from_settings(&settings)?;
    let analyzer = Analyzer::new(Arc::new(llm));
    let mut rng = StdRng::from_entropy();
    let outcome = analyzer.run_analysis_with(&ticker, now, &mut rng).await;
    if let Err(e) = &outcome {
        report_failure(e);
    }
    session.finish(outcome);

    match session.state() {
        ViewState::Loaded { result } => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                print_lines(&text::render_screen(&view::render(&session)));
            }
            for path in write_exports(result, &args.exports, &args.out_dir)? {
                tracing::info!(path = %path.display(), "export written");
            }
            Ok(())
        }
        ViewState::Error { message } => {
            print_lines(&text::render_screen(&view::render(&session)));
            anyhow::bail!("{message}")
        }
        other => anyhow::bail!("analysis did not settle: {other:?}"),
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn report_failure(e: &AnalysisError) {
    let Some(cause) = e.cause() else {
        return;
    };
    sentry_anyhow::capture_anyhow(cause);
    if let Some(diag) = cause.downcast_ref::<LlmDiagnosticsError>() {
        tracing::debug!(
            provider = diag.provider,
            stage = diag.stage,
            raw_output = diag.raw_output.as_deref().unwrap_or(""),
            "raw model output"
        );
    }
}

/// Writes each requested export once. A PDF with nothing to lay out is skipped.
fn write_exports(
    result: &AnalysisResult,
    kinds: &[ExportKind],
    out_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut seen = Vec::new();
    for &kind in kinds {
        if seen.contains(&kind) {
            continue;
        }
        seen.push(kind);

        let file = match kind {
            ExportKind::Pdf => {
                let region = text::render_report(&view::report_view(result));
                match export::export_pdf(&region, &result.ticker)? {
                    Some(file) => file,
                    None => {
                        tracing::warn!(ticker = %result.ticker, "nothing to lay out; pdf skipped");
                        continue;
                    }
                }
            }
            ExportKind::Csv => export::export_csv(&result.fundamental_data, &result.ticker)?,
            ExportKind::Txt => export::export_text(result),
        };
        written.push(file.write_to(out_dir)?);
    }
    Ok(written)
}

fn init_sentry(settings: &stockdesk_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use stockdesk_core::domain::recommendation::{Confidence, Recommendation, Verdict};
    use stockdesk_core::domain::sentiment::{Sentiment, SentimentLabel};
    use stockdesk_core::market;

    fn sample() -> AnalysisResult {
        let mut rng = StdRng::seed_from_u64(3);
        let fundamentals = market::generate_fundamentals("TLKM", &mut rng);
        let end = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        AnalysisResult {
            analysis_id: uuid::Uuid::new_v4(),
            generated_at: Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap(),
            ticker: "TLKM".to_string(),
            company_name: fundamentals.company_name.clone(),
            fundamental_data: fundamentals,
            chart_data: market::generate_chart_series(end, &mut rng),
            sentiment: Sentiment {
                sentiment: SentimentLabel::Negative,
                summary: "Subscriber losses.".to_string(),
                justification: "Churn rose.".to_string(),
            },
            recommendation: Recommendation {
                recommendation: Verdict::Sell,
                confidence: Confidence::Low,
                summary: "Trim.".to_string(),
                fundamental_analysis: "Margins shrinking.".to_string(),
                technical_analysis: "Below trend.".to_string(),
                sentiment_analysis: "Negative.".to_string(),
                risk_disclaimer: "Could rebound.".to_string(),
            },
        }
    }

    #[test]
    fn parses_repeatable_exports() {
        let args = Args::try_parse_from([
            "stockdesk_cli",
            "bbca",
            "--export",
            "pdf",
            "--export",
            "csv",
            "--out-dir",
            "/tmp/out",
        ])
        .unwrap();
        assert_eq!(args.ticker, "bbca");
        assert_eq!(args.exports, vec![ExportKind::Pdf, ExportKind::Csv]);
        assert_eq!(args.out_dir, PathBuf::from("/tmp/out"));
        assert!(!args.json);
    }

    #[test]
    fn rejects_unknown_export_kind() {
        assert!(Args::try_parse_from(["stockdesk_cli", "BBCA", "--export", "docx"]).is_err());
    }

    #[test]
    fn writes_each_export_once() {
        let dir = std::env::temp_dir().join(format!("stockdesk-cli-{}", uuid::Uuid::new_v4()));
        let kinds = [ExportKind::Txt, ExportKind::Csv, ExportKind::Txt, ExportKind::Pdf];
        let paths = write_exports(&sample(), &kinds, &dir).unwrap();

        assert_eq!(
            paths,
            vec![
                dir.join("TLKM-Full-Report.txt"),
                dir.join("TLKM-Fundamental-Data.csv"),
                dir.join("TLKM-Research-Report.pdf"),
            ]
        );
        let csv = std::fs::read_to_string(&paths[1]).unwrap();
        assert!(csv.starts_with("Metric,Value\ncompanyName,PT Telkom Indonesia Tbk\n"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
