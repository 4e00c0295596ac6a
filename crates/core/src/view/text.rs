use crate::view::render::{Body, ReportView, Screen};

pub const LINE_WIDTH: usize = 88;

/// Greedy word wrap; words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.len()
            } else {
                line.len() + 1 + word.len()
            };
            if needed > width && !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        out.push(line);
    }
    out
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push("-".repeat(title.len()));
}

/// Plain-text rendering of a loaded report, one entry per output line.
pub fn render_report(report: &ReportView) -> Vec<String> {
    let mut lines = Vec::new();
    let title = format!("{} ({})", report.header.company_name, report.header.ticker);
    lines.push(title.clone());
    lines.push("=".repeat(title.chars().count()));

    let rec = &report.recommendation;
    heading(&mut lines, "AI Investment Recommendation");
    lines.push(format!(
        "Recommendation: {}    Confidence Level: {}",
        rec.verdict, rec.confidence
    ));
    for section in &rec.sections {
        heading(&mut lines, section.title);
        lines.extend(wrap(&section.body, LINE_WIDTH));
    }

    heading(&mut lines, "Price Chart");
    let chart = &report.chart;
    match (chart.first_date(), chart.last()) {
        (Some(first), Some((last, rsi))) => {
            lines.push(format!(
                "{} sessions, {} to {}",
                chart.candles.len(),
                first,
                last.date
            ));
            lines.push(format!(
                "Last: O {} H {} L {} C {}   RSI {} (overbought {}, oversold {})",
                last.price.open,
                last.price.high,
                last.price.low,
                last.price.close,
                rsi,
                chart.overbought,
                chart.oversold
            ));
            lines.push(format!(
                "Price range: {:.2} - {:.2}",
                chart.price_domain.0, chart.price_domain.1
            ));
        }
        _ => lines.push("No price data.".to_string()),
    }

    heading(&mut lines, "Fundamental Data");
    let label_width = report
        .fundamentals
        .rows
        .iter()
        .map(|r| r.label.len())
        .max()
        .unwrap_or(0);
    for row in &report.fundamentals.rows {
        lines.push(format!("{:<label_width$}  {}", row.label, row.value));
    }

    heading(&mut lines, "News Sentiment");
    let s = &report.sentiment;
    lines.extend(wrap(&format!("[{}] {}", s.label, s.justification), LINE_WIDTH));
    lines.push(String::new());
    lines.push("News Summary:".to_string());
    lines.extend(wrap(&s.summary, LINE_WIDTH));

    lines
}

/// Terminal rendering of any screen state.
pub fn render_screen(screen: &Screen) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(notice) = &screen.notice {
        lines.push(notice.clone());
    }
    match &screen.body {
        Body::Welcome { title, text } => {
            lines.push(title.to_string());
            lines.extend(wrap(text, LINE_WIDTH));
        }
        Body::Progress { message } => lines.push(message.to_string()),
        Body::Failure { message } => lines.push(format!("Error: {message}")),
        Body::Report(report) => lines.extend(render_report(report)),
    }
    lines
}
