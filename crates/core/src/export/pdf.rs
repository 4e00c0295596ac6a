use crate::export::{pdf_file_name, ExportFile};
use printpdf::{BuiltinFont, Mm, PdfDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const MARGIN_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 9.0;
const LINE_HEIGHT_MM: f32 = FONT_SIZE_PT * 1.25 * 25.4 / 72.0;

/// Page height that fits `lines` at A4 width, so the page keeps the content's aspect ratio.
pub fn page_height_mm(lines: usize) -> f32 {
    MARGIN_MM * 2.0 + LINE_HEIGHT_MM * lines as f32
}

// Builtin PDF fonts only cover Latin-1.
fn latin1(line: &str) -> String {
    line.chars()
        .map(|c| if (c as u32) < 0x100 { c } else { '?' })
        .collect()
}

/// Lays the rendered report region onto one page. An empty region has nothing to capture and
/// yields `None`.
pub fn export_pdf(region: &[String], ticker: &str) -> anyhow::Result<Option<ExportFile>> {
    if region.iter().all(|l| l.trim().is_empty()) {
        tracing::debug!(%ticker, "pdf export skipped; report region is empty");
        return Ok(None);
    }

    let height = page_height_mm(region.len());
    let (doc, page, layer) = PdfDocument::new(
        format!("{ticker} Research Report"),
        Mm(PAGE_WIDTH_MM),
        Mm(height),
        "Report".to_string(),
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| anyhow::anyhow!("failed to load builtin PDF font: {e:?}"))?;
    let layer = doc.get_page(page).get_layer(layer);

    for (i, line) in region.iter().enumerate() {
        let y = height - MARGIN_MM - LINE_HEIGHT_MM * (i as f32 + 1.0);
        layer.use_text(latin1(line), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| anyhow::anyhow!("failed to serialize PDF: {e:?}"))?;

    Ok(Some(ExportFile {
        file_name: pdf_file_name(ticker),
        content_type: "application/pdf",
        bytes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::render::report_view;
    use crate::view::render::tests::sample_result;
    use crate::view::text::render_report;

    #[test]
    fn empty_region_is_a_no_op() {
        assert!(export_pdf(&[], "BBCA").unwrap().is_none());
        assert!(export_pdf(&["  ".to_string()], "BBCA").unwrap().is_none());
    }

    #[test]
    fn renders_report_region_to_single_pdf() {
        let region = render_report(&report_view(&sample_result()));
        let file = export_pdf(&region, "BBCA").unwrap().unwrap();
        assert_eq!(file.file_name, "BBCA-Research-Report.pdf");
        assert_eq!(file.content_type, "application/pdf");
        assert!(file.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn page_grows_with_content() {
        assert!(page_height_mm(120) > page_height_mm(60));
        assert_eq!(page_height_mm(0), MARGIN_MM * 2.0);
    }

    #[test]
    fn replaces_characters_outside_latin1() {
        assert_eq!(latin1("Rp 5.000 → naik"), "Rp 5.000 ? naik");
    }
}
