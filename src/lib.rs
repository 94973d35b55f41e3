//! # Price Machine
//!
//! Consolidates supplier price lists into one searchable catalog ordered by
//! price per weight unit.
//!
//! ## Features
//!
//! - **Recursive discovery**: every file whose name contains a marker (default `price`)
//!   anywhere under a root directory
//! - **Header heuristics**: arbitrary column layouts are mapped to product, price and
//!   weight columns through a configurable synonym table
//! - **Tolerant parsing**: short rows, non-numeric values and zero weights are skipped
//!   without stopping the file; files lacking a required column are skipped entirely
//! - **Derived metric**: price per weight unit, always computed from price and weight
//! - **Reports**: full catalog and search results as HTML, search results as Excel
//!   workbooks and fixed-width console tables
//!
//! ## Pipeline
//!
//! `discover` → `HeaderResolver` → `RecordParser` → `Catalog`, driven by [`ingest::Ingestor`].
//! The catalog is then read by [`report::ReportSink`] implementations and by the
//! [`console::QueryConsole`].

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
mod helpers;
pub mod ingest;
pub mod report;

pub use crate::catalog::record::PriceRecord;
pub use crate::catalog::Catalog;
pub use crate::error::PriceMachineError;
pub use crate::ingest::IngestSummary;
pub use crate::ingest::Ingestor;
