use crate::view::render::{Body, Screen, APP_TITLE};
use anyhow::Context;
use minijinja::{context, Environment, Value};
use std::sync::OnceLock;

const PAGE_TEMPLATE: &str = "page.html";

static ENVIRONMENT: OnceLock<Environment<'static>> = OnceLock::new();

/// Template environment, built on first use. The `.html` name turns on HTML auto-escaping.
fn environment() -> anyhow::Result<&'static Environment<'static>> {
    if let Some(env) = ENVIRONMENT.get() {
        return Ok(env);
    }
    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE, include_str!("templates/page.html"))
        .context("failed to load page template")?;
    Ok(ENVIRONMENT.get_or_init(|| env))
}

/// Whole HTML document for a screen.
pub fn render_page(screen: &Screen) -> anyhow::Result<String> {
    let chart_svg = match &screen.body {
        Body::Report(report) => Value::from_safe_string(report.chart.to_svg(800.0, 420.0)),
        _ => Value::from(()),
    };

    environment()?
        .get_template(PAGE_TEMPLATE)
        .context("page template missing")?
        .render(context! {
            title => APP_TITLE,
            loading => matches!(screen.body, Body::Progress { .. }),
            screen => Value::from_serialize(screen),
            chart_svg => chart_svg,
        })
        .context("failed to render page")
}
