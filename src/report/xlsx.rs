//! Minimal Office Open XML workbook writer.
//! Produces a single-sheet `.xlsx` package with inline strings, so no shared
//! string table or style sheet is needed.

use crate::catalog::record::PriceRecord;
use crate::error::PriceMachineError;
use crate::helpers::xml::XmlWriter;
use crate::helpers::zip::ZipHelper;
use crate::report::title;
use crate::report::Destination;
use crate::report::RenderOutcome;
use crate::report::ReportSink;
use crate::report::COLUMN_CAPTIONS;
use chrono::Utc;
use std::fs::File;
use std::io::Seek;
use std::io::Write;
use zip::ZipWriter;

const MAIN_NAMESPACE: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIPS_NAMESPACE: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const DOCUMENT_RELATIONSHIPS_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Renders record listings as Excel workbooks.
pub struct XlsxReport {
    destination: Destination,
}

impl XlsxReport {
    /// Search listings written to `<directory>/<query>.xlsx`.
    pub fn search(directory: impl Into<std::path::PathBuf>) -> Self {
        Self {
            destination: Destination::Directory(directory.into()),
        }
    }
}

impl ReportSink for XlsxReport {
    fn render(&mut self, records: &[&PriceRecord], query: Option<&str>) -> Result<RenderOutcome, PriceMachineError> {
        let path = self.destination.prepare(query, "xlsx")?;
        let file = File::create(&path)?;
        write_workbook(file, records, title(query))?;
        Ok(RenderOutcome::File(path))
    }
}

/// Cell value of a worksheet row.
enum CellValue<'a> {
    Number(f64),
    Text(&'a str),
}

/// Writes a complete workbook package and returns the underlying writer.
pub(crate) fn write_workbook<W: Write + Seek>(
    writer: W,
    records: &[&PriceRecord],
    sheet_name: &str,
) -> Result<W, PriceMachineError> {
    let mut archive = ZipWriter::new(writer);
    write_content_types(&mut archive)?;
    write_package_relationships(&mut archive)?;
    write_core_properties(&mut archive, sheet_name)?;
    write_workbook_part(&mut archive, sheet_name)?;
    write_workbook_relationships(&mut archive)?;
    write_worksheet(&mut archive, records)?;
    Ok(archive.finish()?)
}

fn write_content_types<W: Write + Seek>(archive: &mut ZipWriter<W>) -> Result<(), PriceMachineError> {
    let mut xml = archive.xml_writer("[Content_Types].xml")?;
    xml.start("Types", &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")])?;
    xml.empty(
        "Default",
        &[("Extension", "rels"), ("ContentType", "application/vnd.openxmlformats-package.relationships+xml")],
    )?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    xml.empty(
        "Override",
        &[
            ("PartName", "/xl/workbook.xml"),
            ("ContentType", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"),
        ],
    )?;
    xml.empty(
        "Override",
        &[
            ("PartName", "/xl/worksheets/sheet1.xml"),
            ("ContentType", "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"),
        ],
    )?;
    xml.empty(
        "Override",
        &[
            ("PartName", "/docProps/core.xml"),
            ("ContentType", "application/vnd.openxmlformats-package.core-properties+xml"),
        ],
    )?;
    xml.end("Types")
}

fn write_package_relationships<W: Write + Seek>(archive: &mut ZipWriter<W>) -> Result<(), PriceMachineError> {
    let mut xml = archive.xml_writer("_rels/.rels")?;
    xml.start("Relationships", &[("xmlns", RELATIONSHIPS_NAMESPACE)])?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument"),
            ("Target", "xl/workbook.xml"),
        ],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId2"),
            ("Type", "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"),
            ("Target", "docProps/core.xml"),
        ],
    )?;
    xml.end("Relationships")
}

fn write_core_properties<W: Write + Seek>(archive: &mut ZipWriter<W>, title: &str) -> Result<(), PriceMachineError> {
    let created = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut xml = archive.xml_writer("docProps/core.xml")?;
    xml.start(
        "cp:coreProperties",
        &[
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.text_element("dc:title", &[], title)?;
    xml.text_element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
    xml.end("cp:coreProperties")
}

fn write_workbook_part<W: Write + Seek>(archive: &mut ZipWriter<W>, sheet_name: &str) -> Result<(), PriceMachineError> {
    let mut xml = archive.xml_writer("xl/workbook.xml")?;
    xml.start("workbook", &[("xmlns", MAIN_NAMESPACE), ("xmlns:r", DOCUMENT_RELATIONSHIPS_NAMESPACE)])?;
    xml.start("sheets", &[])?;
    xml.empty("sheet", &[("name", sheet_name), ("sheetId", "1"), ("r:id", "rId1")])?;
    xml.end("sheets")?;
    xml.end("workbook")
}

fn write_workbook_relationships<W: Write + Seek>(archive: &mut ZipWriter<W>) -> Result<(), PriceMachineError> {
    let mut xml = archive.xml_writer("xl/_rels/workbook.xml.rels")?;
    xml.start("Relationships", &[("xmlns", RELATIONSHIPS_NAMESPACE)])?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet"),
            ("Target", "worksheets/sheet1.xml"),
        ],
    )?;
    xml.end("Relationships")
}

fn write_worksheet<W: Write + Seek>(archive: &mut ZipWriter<W>, records: &[&PriceRecord]) -> Result<(), PriceMachineError> {
    let mut xml = archive.xml_writer("xl/worksheets/sheet1.xml")?;
    xml.start("worksheet", &[("xmlns", MAIN_NAMESPACE)])?;
    xml.start("sheetData", &[])?;

    let captions: Vec<CellValue> = COLUMN_CAPTIONS.iter().map(|caption| CellValue::Text(*caption)).collect();
    write_row(&mut xml, 0, &captions)?;
    for (index, record) in records.iter().enumerate() {
        let cells = [
            CellValue::Number((index + 1) as f64),
            CellValue::Text(record.product_name()),
            CellValue::Number(record.unit_price()),
            CellValue::Number(record.unit_weight()),
            CellValue::Text(record.source_file()),
            CellValue::Number(record.price_per_weight_unit()),
        ];
        write_row(&mut xml, index + 1, &cells)?;
    }

    xml.end("sheetData")?;
    xml.end("worksheet")
}

fn write_row<W: Write>(xml: &mut XmlWriter<W>, row: usize, cells: &[CellValue]) -> Result<(), PriceMachineError> {
    let row_number = (row + 1).to_string();
    xml.start("row", &[("r", row_number.as_str())])?;
    for (column, cell) in cells.iter().enumerate() {
        let reference = cell_reference(row, column);
        match cell {
            CellValue::Number(value) => {
                xml.start("c", &[("r", reference.as_str())])?;
                xml.text_element("v", &[], &value.to_string())?;
            }
            CellValue::Text(value) => {
                xml.start("c", &[("r", reference.as_str()), ("t", "inlineStr")])?;
                xml.start("is", &[])?;
                xml.text_element("t", &[], value)?;
                xml.end("is")?;
            }
        }
        xml.end("c")?;
    }
    xml.end("row")
}

/// Converts 0-based row and column indexes to an Excel-style cell reference such as `B3`.
fn cell_reference(row: usize, column: usize) -> String {
    let mut letters = String::new();
    let mut column = column + 1;
    while column > 0 {
        column -= 1;
        letters.insert(0, (b'A' + (column % 26) as u8) as char);
        column /= 26;
    }
    format!("{}{}", letters, row + 1)
}
