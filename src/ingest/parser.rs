use crate::catalog::record::PriceRecord;
use crate::catalog::record::RecordError;
use crate::ingest::header::ResolvedColumns;
use csv::StringRecord;

/// A data row that did not become a record.
#[derive(Clone, Debug, PartialEq)]
pub struct RowRejection {
    /// 1-based line number in the source file
    pub line: usize,
    pub error: RecordError,
}

/// Records accepted from one file together with the rows that were skipped.
#[derive(Debug, Default)]
pub struct ParsedRows {
    pub records: Vec<PriceRecord>,
    pub rejections: Vec<RowRejection>,
}

/// Turns raw data rows of one file into validated price records.
pub struct RecordParser<'a> {
    columns: ResolvedColumns,
    source_file: &'a str,
}

impl<'a> RecordParser<'a> {
    pub fn new(columns: ResolvedColumns, source_file: &'a str) -> Self {
        Self { columns, source_file }
    }

    /// Parses every row, rejecting malformed ones and continuing with the rest.
    pub fn parse<I>(&self, rows: I) -> ParsedRows
    where
        I: IntoIterator<Item = Result<StringRecord, csv::Error>>,
    {
        let mut parsed = ParsedRows::default();
        for (index, row) in rows.into_iter().enumerate() {
            // Header occupies line 1
            let fallback_line = index + 2;
            let result = match row {
                Ok(row) => {
                    let line = row.position().map(|position| position.line() as usize).unwrap_or(fallback_line);
                    self.parse_row(&row).map_err(|error| RowRejection { line, error })
                }
                Err(error) => {
                    let line = error.position().map(|position| position.line() as usize).unwrap_or(fallback_line);
                    Err(RowRejection {
                        line,
                        error: RecordError::Unreadable(error.to_string()),
                    })
                }
            };
            match result {
                Ok(record) => parsed.records.push(record),
                Err(rejection) => parsed.rejections.push(rejection),
            }
        }
        parsed
    }

    /// Parses a single row into a record.
    pub fn parse_row(&self, row: &StringRecord) -> Result<PriceRecord, RecordError> {
        let required = self.columns.max_index() + 1;
        if row.len() < required {
            return Err(RecordError::ShortRow { found: row.len(), required });
        }
        let product_name = &row[self.columns.product];
        let price = parse_number("price", &row[self.columns.price])?;
        let weight = parse_number("weight", &row[self.columns.weight])?;
        PriceRecord::new(product_name, price, weight, self.source_file)
    }
}

/// Parses a decimal number using `.` as the separator, ignoring surrounding whitespace.
fn parse_number(field: &'static str, value: &str) -> Result<f64, RecordError> {
    value.trim().parse::<f64>().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}
