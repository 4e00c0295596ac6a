//! Downloadable renditions of a loaded report. Everything here is local and synchronous.

pub mod csv_table;
pub mod pdf;
pub mod report_text;

use anyhow::Context;
use std::path::{Path, PathBuf};

pub use csv_table::export_csv;
pub use pdf::export_pdf;
pub use report_text::export_text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Saves into `dir` under the export's own file name.
    pub fn write_to(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

pub fn pdf_file_name(ticker: &str) -> String {
    format!("{ticker}-Research-Report.pdf")
}

pub fn csv_file_name(ticker: &str) -> String {
    format!("{ticker}-Fundamental-Data.csv")
}

pub fn text_file_name(ticker: &str) -> String {
    format!("{ticker}-Full-Report.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_under_own_file_name() {
        let dir = std::env::temp_dir().join(format!("stockdesk-export-{}", uuid::Uuid::new_v4()));
        let file = ExportFile {
            file_name: text_file_name("BBCA"),
            content_type: "text/plain; charset=utf-8",
            bytes: b"hello".to_vec(),
        };
        let path = file.write_to(&dir).unwrap();
        assert_eq!(path, dir.join("BBCA-Full-Report.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
