use crate::catalog::record::PriceRecord;
use crate::error::PriceMachineError;
use crate::report::title;
use crate::report::Destination;
use crate::report::RenderOutcome;
use crate::report::ReportError;
use crate::report::ReportSink;
use crate::report::COLUMN_CAPTIONS;
use quick_xml::escape::escape;
use std::fs;

/// Renders record listings as a bordered HTML table.
pub struct HtmlReport {
    destination: Destination,
}

impl HtmlReport {
    /// Full catalog listing written to a fixed file.
    pub fn catalog(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            destination: Destination::File(path.into()),
        }
    }

    /// Search listings written to `<directory>/<query>.html`.
    pub fn search(directory: impl Into<std::path::PathBuf>) -> Self {
        Self {
            destination: Destination::Directory(directory.into()),
        }
    }
}

impl ReportSink for HtmlReport {
    fn render(&mut self, records: &[&PriceRecord], query: Option<&str>) -> Result<RenderOutcome, PriceMachineError> {
        let path = self.destination.prepare(query, "html")?;
        let document = render_document(records, title(query));
        fs::write(&path, document).map_err(|source| ReportError::WriteFile {
            path: path.display().to_string(),
            source,
        })?;
        Ok(RenderOutcome::File(path))
    }
}

/// Builds the whole HTML document; numbering starts at 1.
pub(crate) fn render_document(records: &[&PriceRecord], title: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n");
    html.push_str(&format!("    <title>{}</title>\n", escape(title)));
    html.push_str("</head>\n<body>\n    <table border=\"1\">\n        <tr>\n");
    for caption in COLUMN_CAPTIONS {
        html.push_str(&format!("            <th>{}</th>\n", escape(caption)));
    }
    html.push_str("        </tr>\n");
    for (index, record) in records.iter().enumerate() {
        html.push_str("        <tr>\n");
        html.push_str(&format!("            <td>{}</td>\n", index + 1));
        html.push_str(&format!("            <td>{}</td>\n", escape(record.product_name())));
        html.push_str(&format!("            <td>{}</td>\n", record.unit_price()));
        html.push_str(&format!("            <td>{}</td>\n", record.unit_weight()));
        html.push_str(&format!("            <td>{}</td>\n", escape(record.source_file())));
        html.push_str(&format!("            <td>{:.2}</td>\n", record.price_per_weight_unit()));
        html.push_str("        </tr>\n");
    }
    html.push_str("    </table>\n</body>\n</html>\n");
    html
}
