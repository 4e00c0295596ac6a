use crate::domain::market::FundamentalData;
use crate::export::{csv_file_name, ExportFile};
use anyhow::Context;

/// `Metric,Value` table of every fundamental field, in declaration order.
pub fn fundamentals_csv(data: &FundamentalData) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(["Metric", "Value"])
        .context("failed to write CSV header")?;
    for (name, value) in data.fields() {
        wtr.write_record([name, value.as_str()])
            .with_context(|| format!("failed to write CSV row {name}"))?;
    }

    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

pub fn export_csv(data: &FundamentalData, ticker: &str) -> anyhow::Result<ExportFile> {
    Ok(ExportFile {
        file_name: csv_file_name(ticker),
        content_type: "text/csv; charset=utf-8",
        bytes: fundamentals_csv(data)?.into_bytes(),
    })
}
