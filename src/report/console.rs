use crate::catalog::record::PriceRecord;
use crate::error::PriceMachineError;
use crate::helpers::string::char_width;
use crate::report::RenderOutcome;
use crate::report::ReportSink;
use std::io::Write;

const NAME_CAPTION: &str = "Наименование";

/// Prints record listings as a fixed-width table.
pub struct ConsoleReport<W: Write> {
    output: W,
    /// Width of the product name column in characters
    name_width: usize,
}

impl<W: Write> ConsoleReport<W> {
    /// Creates a console table; the name column is at least as wide as its caption.
    pub fn new(output: W, name_width: usize) -> Self {
        Self {
            output,
            name_width: name_width.max(char_width(NAME_CAPTION)),
        }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> ReportSink for ConsoleReport<W> {
    fn render(&mut self, records: &[&PriceRecord], _query: Option<&str>) -> Result<RenderOutcome, PriceMachineError> {
        let width = self.name_width;
        writeln!(
            self.output,
            "{:<3} {:<width$} {:<6} {:<5} {:<15} {}",
            "№", NAME_CAPTION, "цена", "вес", "файл", "цена за кг."
        )?;
        for (index, record) in records.iter().enumerate() {
            writeln!(
                self.output,
                "{:<3} {:<width$} {:<6.2} {:<5.2} {:<15} {:.2}",
                index + 1,
                record.product_name(),
                record.unit_price(),
                record.unit_weight(),
                record.source_file(),
                record.price_per_weight_unit(),
            )?;
        }
        self.output.flush()?;
        Ok(RenderOutcome::Printed)
    }
}
