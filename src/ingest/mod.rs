//! # Ingestion Pipeline
//!
//! Discovers price-list files under a directory, resolves each file's header
//! row to canonical columns, parses the data rows and appends the accepted
//! records to a [`Catalog`].
//!
//! Failures are handled at the smallest scope: a bad row is skipped, a file
//! without the required columns is skipped, and only a missing root directory
//! stops the ingestion phase.

pub mod criteria;
pub mod discovery;
pub mod header;
pub mod parser;

use crate::catalog::Catalog;
use crate::error::PriceMachineError;
use crate::error::ResultMessage;
use crate::ingest::criteria::Criteria;
use crate::ingest::discovery::discover;
use crate::ingest::header::HeaderResolver;
use crate::ingest::parser::ParsedRows;
use crate::ingest::parser::RecordParser;
use csv::ReaderBuilder;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;

/// Errors related to turning file bytes into text.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("File is not valid {encoding} text")]
    InvalidText { encoding: String },
}

/// Stage of the ingestion driver.
#[derive(Clone, Debug, PartialEq)]
pub enum IngestPhase {
    Idle,
    Discovering,
    Resolving,
    Parsing,
    Appending,
    Done,
    /// Discovery failed; no file was processed
    Failed(String),
}

/// Counters reported once ingestion finishes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestSummary {
    pub files_found: usize,
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub records: usize,
    pub rows_rejected: usize,
}

impl IngestSummary {
    /// Short user-facing verdict on the ingestion result.
    pub fn message(&self) -> &'static str {
        if self.records > 0 {
            "Data loaded"
        } else {
            "No data loaded"
        }
    }
}

/// Sequential driver that loads every discovered price list into a catalog.
pub struct Ingestor {
    criteria: Criteria,
    encoding: &'static Encoding,
    phase: IngestPhase,
}

impl Ingestor {
    /// Creates a driver, failing if the configured encoding is unknown.
    pub fn new(criteria: Criteria) -> Result<Self, PriceMachineError> {
        let encoding = Encoding::for_label(criteria.encoding.trim().as_bytes())
            .ok_or_else(|| DecodeError::UnknownEncoding(criteria.encoding.to_owned()))?;
        Ok(Self {
            criteria,
            encoding,
            phase: IngestPhase::Idle,
        })
    }

    pub fn phase(&self) -> &IngestPhase {
        &self.phase
    }

    fn transition(&mut self, phase: IngestPhase) {
        trace!(from = ?self.phase, to = ?phase, "Ingestion phase");
        self.phase = phase;
    }

    /// Loads every price list under `root` into `catalog`.
    ///
    /// Returns an error only when `root` is not a directory; the catalog is left untouched then.
    pub fn load(&mut self, root: &Path, catalog: &mut Catalog) -> Result<IngestSummary, PriceMachineError> {
        self.transition(IngestPhase::Discovering);
        let files = match discover(root, &self.criteria.marker) {
            Ok(files) => files,
            Err(error) => {
                self.transition(IngestPhase::Failed(error.to_string()));
                return Err(error);
            }
        };

        let mut summary = IngestSummary {
            files_found: files.len(),
            ..IngestSummary::default()
        };
        for path in &files {
            match self.load_file(path).with_prefix(&path.display().to_string()) {
                Ok(parsed) => {
                    self.transition(IngestPhase::Appending);
                    summary.files_loaded += 1;
                    summary.records += parsed.records.len();
                    summary.rows_rejected += parsed.rejections.len();
                    catalog.append(parsed.records);
                }
                Err(error) => {
                    warn!("Skip file {}", error);
                    summary.files_skipped += 1;
                }
            }
        }
        self.transition(IngestPhase::Done);

        info!(
            files_found = summary.files_found,
            files_loaded = summary.files_loaded,
            files_skipped = summary.files_skipped,
            records = summary.records,
            rows_rejected = summary.rows_rejected,
            "{}",
            summary.message()
        );
        Ok(summary)
    }

    /// Reads one file and parses its rows; the file is closed before parsing starts.
    fn load_file(&mut self, path: &Path) -> Result<ParsedRows, PriceMachineError> {
        info!(file = %path.display(), "Loading price list");
        let content = self.read_text(path)?;

        self.transition(IngestPhase::Resolving);
        let mut reader = ReaderBuilder::new()
            .delimiter(self.criteria.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = reader.headers()?.clone();
        info!(file = %path.display(), headers = ?headers.iter().collect::<Vec<_>>(), "Headers");
        let columns = HeaderResolver::new(&self.criteria.synonyms).resolve(&headers).require()?;

        self.transition(IngestPhase::Parsing);
        let source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let parsed = RecordParser::new(columns, &source_file).parse(reader.records());
        for rejection in &parsed.rejections {
            debug!(file = %source_file, line = rejection.line, "Skip row: {}", rejection.error);
        }
        Ok(parsed)
    }

    /// Decodes a whole file with the configured encoding, dropping any byte order mark.
    fn read_text(&self, path: &Path) -> Result<String, PriceMachineError> {
        let bytes = fs::read(path)?;
        let (text, encoding, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            Err(DecodeError::InvalidText {
                encoding: encoding.name().to_owned(),
            })?;
        }
        Ok(text.into_owned())
    }
}
