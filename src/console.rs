//! Interactive query loop over a loaded catalog.

use crate::catalog::Catalog;
use crate::error::PriceMachineError;
use crate::report::console::ConsoleReport;
use crate::report::ReportSink;
use std::io::BufRead;
use std::io::Write;
use tracing::warn;

/// Answers free-text queries: prints matches and hands them to every exporter.
pub struct QueryConsole<'a, W: Write> {
    catalog: &'a Catalog,
    exit_keyword: String,
    exporters: Vec<Box<dyn ReportSink>>,
    output: W,
}

impl<'a, W: Write> QueryConsole<'a, W> {
    pub fn new(catalog: &'a Catalog, exit_keyword: &str, output: W) -> Self {
        Self {
            catalog,
            exit_keyword: exit_keyword.to_owned(),
            exporters: Vec::new(),
            output,
        }
    }

    /// Adds a sink that receives every non-empty search result.
    pub fn with_exporter(mut self, exporter: Box<dyn ReportSink>) -> Self {
        self.exporters.push(exporter);
        self
    }

    /// Returns true if the trimmed line is the exit keyword, ignoring case.
    pub fn is_exit(&self, line: &str) -> bool {
        line.trim().to_lowercase() == self.exit_keyword.to_lowercase()
    }

    /// Searches, prints and exports one query. Returns the number of matches.
    ///
    /// A failing exporter is logged and does not affect the others.
    pub fn answer(&mut self, query: &str) -> Result<usize, PriceMachineError> {
        let results = self.catalog.search(query);
        if results.is_empty() {
            writeln!(self.output, "Nothing found.")?;
            return Ok(0);
        }

        ConsoleReport::new(&mut self.output, self.catalog.max_name_length()).render(&results, Some(query))?;
        for exporter in self.exporters.iter_mut() {
            match exporter.render(&results, Some(query)) {
                Ok(outcome) => writeln!(self.output, "{}", outcome)?,
                Err(error) => warn!(query, "Export failed: {}", error),
            }
        }
        Ok(results.len())
    }

    /// Reads queries line by line until the exit keyword or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<(), PriceMachineError> {
        let mut line = String::new();
        loop {
            write!(self.output, "Enter search text or '{}' to quit: ", self.exit_keyword)?;
            self.output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }
            if self.is_exit(&line) {
                break;
            }
            self.answer(line.trim())?;
        }
        writeln!(self.output, "Done.")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}
