use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinHandle};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockdesk_core::analysis::{AnalysisError, Analyzer};
use stockdesk_core::domain::analysis::AnalysisResult;
use stockdesk_core::export::{self, ExportFile};
use stockdesk_core::llm::gemini::GeminiClient;
use stockdesk_core::view::state::FALLBACK_ERROR;
use stockdesk_core::view::{self, html, text, Session, SubmitError, ViewState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockdesk_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let llm = GeminiClient::from_settings(&settings).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "gemini client unavailable; refusing to start");
        e
    })?;
    tracing::info!(model = llm.model(), "gemini client ready");

    let state = AppState::new(Analyzer::new(Arc::new(llm)));
    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(index))
        .route("/search", post(search))
        .route("/analyze", post(analyze))
        .route("/state", get(get_state))
        .route("/report.pdf", get(report_pdf))
        .route("/report.csv", get(report_csv))
        .route("/report.txt", get(report_txt))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

/// The session lock is only held for state transitions, never across the AI calls.
#[derive(Clone)]
struct AppState {
    analyzer: Analyzer,
    session: Arc<Mutex<Session>>,
}

impl AppState {
    fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            session: Arc::new(Mutex::new(Session::new())),
        }
    }

    async fn submit(&self, raw: &str) -> Result<String, SubmitError> {
        self.session.lock().await.submit(raw)
    }

    /// Runs an accepted submission to completion on its own task and settles the session with the
    /// outcome. The run outlives the caller, so a dropped request still settles the session; a
    /// panicking run settles it as a failure.
    fn start_analysis(&self, ticker: String) -> JoinHandle<Result<AnalysisResult, String>> {
        let state = self.clone();
        tokio::spawn(async move {
            let analyzer = state.analyzer.clone();
            let run = tokio::spawn(async move { analyzer.run_analysis(&ticker).await });
            state.settle(run.await).await
        })
    }

    async fn settle(
        &self,
        joined: Result<Result<AnalysisResult, AnalysisError>, JoinError>,
    ) -> Result<AnalysisResult, String> {
        let mut session = self.session.lock().await;
        match joined {
            Ok(Ok(result)) => {
                session.finish(Ok(result.clone()));
                Ok(result)
            }
            Ok(Err(e)) => {
                report_failure(&e);
                session.finish(Err(e));
                Err(match session.state() {
                    ViewState::Error { message } => message.clone(),
                    _ => FALLBACK_ERROR.to_string(),
                })
            }
            Err(e) => {
                let err = anyhow::Error::new(e).context("analysis task did not complete");
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %format!("{err:#}"), "analysis aborted");
                session.fail(FALLBACK_ERROR);
                Err(FALLBACK_ERROR.to_string())
            }
        }
    }

    async fn loaded_result(&self) -> Option<AnalysisResult> {
        self.session.lock().await.result().cloned()
    }
}

fn report_failure(e: &AnalysisError) {
    if let Some(cause) = e.cause() {
        sentry_anyhow::capture_anyhow(cause);
    }
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(e: SubmitError) -> Self {
        let status = match e {
            SubmitError::EmptyTicker => StatusCode::BAD_REQUEST,
            SubmitError::Busy { .. } => StatusCode::CONFLICT,
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
struct TickerInput {
    ticker: String,
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let screen = view::render(&*state.session.lock().await);
    let page = html::render_page(&screen).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %format!("{e:#}"), "page render failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Html(page))
}

/// Form submit from the page. The analysis runs in the background while the page shows progress.
async fn search(State(state): State<AppState>, Form(input): Form<TickerInput>) -> Redirect {
    match state.submit(&input.ticker).await {
        Ok(ticker) => {
            // Detached; the run settles the session itself.
            drop(state.start_analysis(ticker));
        }
        Err(e) => tracing::info!(error = %e, "search rejected"),
    }
    Redirect::to("/")
}

async fn analyze(
    State(state): State<AppState>,
    Json(input): Json<TickerInput>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let ticker = state.submit(&input.ticker).await?;
    let result = state
        .start_analysis(ticker)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "analysis supervisor failed");
            ApiError::new(StatusCode::BAD_GATEWAY, FALLBACK_ERROR)
        })?
        .map_err(|message| ApiError::new(StatusCode::BAD_GATEWAY, message))?;
    Ok(Json(result))
}

async fn get_state(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.session.lock().await.state().clone())
}

fn attachment(file: ExportFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    )
        .into_response()
}

fn export_failed(e: anyhow::Error) -> StatusCode {
    sentry_anyhow::capture_anyhow(&e);
    tracing::error!(error = %e, "export failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn report_pdf(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let result = state.loaded_result().await.ok_or(StatusCode::NOT_FOUND)?;
    let region = text::render_report(&view::report_view(&result));
    let file = export::export_pdf(&region, &result.ticker)
        .map_err(export_failed)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(attachment(file))
}

async fn report_csv(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let result = state.loaded_result().await.ok_or(StatusCode::NOT_FOUND)?;
    let file = export::export_csv(&result.fundamental_data, &result.ticker).map_err(export_failed)?;
    Ok(attachment(file))
}

async fn report_txt(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let result = state.loaded_result().await.ok_or(StatusCode::NOT_FOUND)?;
    Ok(attachment(export::export_text(&result)))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
