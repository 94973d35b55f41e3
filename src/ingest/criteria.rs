use crate::ingest::header::SynonymTable;

/// Criteria for selecting and reading price-list files.
#[derive(Clone, Debug)]
pub struct Criteria {
    /// File name fragment that marks a price list, matched case-insensitively.
    pub marker: String,

    /// Field delimiter of the delimited text tables.
    pub delimiter: u8,

    /// Encoding label understood by `encoding_rs` (default: utf-8).
    pub encoding: String,

    /// Header synonyms for each column role.
    pub synonyms: SynonymTable,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            marker: String::from("price"),
            delimiter: b',',
            encoding: String::from("utf-8"),
            synonyms: SynonymTable::default(),
        }
    }
}
