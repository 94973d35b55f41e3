//! # Report Sinks
//!
//! Renderers that turn an ordered record sequence into an artifact: an HTML
//! table, an Excel workbook or a fixed-width console table. The catalog only
//! supplies records in presentation order; numbering, escaping, number
//! formatting and file naming happen here.

pub mod console;
pub mod html;
pub mod xlsx;

use crate::catalog::record::PriceRecord;
use crate::error::PriceMachineError;
use crate::helpers::string::sanitize_file_name;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Errors related to writing report artifacts.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Cannot create directory '{path}': {source}")]
    CreateDirectory { path: String, source: std::io::Error },

    #[error("Cannot write report '{path}': {source}")]
    WriteFile { path: String, source: std::io::Error },
}

/// Column captions shared by every tabular rendering.
pub const COLUMN_CAPTIONS: [&str; 6] = ["№ п/п", "Название", "Цена", "Вес", "Файл", "Цена за кг."];

/// Title of a full catalog listing.
pub const CATALOG_TITLE: &str = "Позиции продуктов";

/// Title of a search result listing.
pub const SEARCH_TITLE: &str = "Результаты поиска";

/// File stem used for listings without a query.
const CATALOG_FILE_STEM: &str = "catalog";

/// Returns the listing title for an optional query.
pub(crate) fn title(query: Option<&str>) -> &'static str {
    if query.is_some() {
        SEARCH_TITLE
    } else {
        CATALOG_TITLE
    }
}

/// Where a rendered artifact went.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    /// Written to a file
    File(PathBuf),
    /// Printed to a stream
    Printed,
}

impl Display for RenderOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderOutcome::File(path) => write!(f, "File '{}' created", path.display()),
            RenderOutcome::Printed => f.write_str("Printed"),
        }
    }
}

/// Consumer of an ordered record sequence.
pub trait ReportSink {
    /// Renders records, already in presentation order, optionally labelled with the search query.
    fn render(&mut self, records: &[&PriceRecord], query: Option<&str>) -> Result<RenderOutcome, PriceMachineError>;
}

/// Target location of a file report.
#[derive(Clone, Debug, PartialEq)]
pub enum Destination {
    /// Always write to this file
    File(PathBuf),
    /// Write `<sanitized query>.<extension>` into this directory, creating it when absent
    Directory(PathBuf),
}

impl Destination {
    /// Resolves the output file path for a query and prepares its parent directory.
    pub(crate) fn prepare(&self, query: Option<&str>, extension: &str) -> Result<PathBuf, ReportError> {
        let path = match self {
            Destination::File(path) => path.to_owned(),
            Destination::Directory(directory) => {
                let stem = sanitize_file_name(query.unwrap_or(CATALOG_FILE_STEM));
                directory.join(format!("{stem}.{extension}"))
            }
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            create_directory(parent)?;
        }
        Ok(path)
    }
}

fn create_directory(path: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(path).map_err(|source| ReportError::CreateDirectory {
        path: path.display().to_string(),
        source,
    })
}
