//! ZIP archive helper utilities for writing Excel (.xlsx) packages
//! Provides convenient methods for adding deflated parts to an archive

use crate::error::PriceMachineError;
use crate::helpers::xml::XmlWriter;
use std::io::Seek;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Helper trait for ZIP archive writing with specialized writer creation
pub(crate) trait ZipHelper<W: Write + Seek> {
    /// Starts a new deflated entry, normalizing backslashes to forward slashes
    fn start_part(&mut self, name: &str) -> Result<(), PriceMachineError>;

    /// Starts a new entry and returns an XML writer positioned at its beginning
    fn xml_writer(&mut self, name: &str) -> Result<XmlWriter<&mut ZipWriter<W>>, PriceMachineError>;
}

impl<W: Write + Seek> ZipHelper<W> for ZipWriter<W> {
    fn start_part(&mut self, name: &str) -> Result<(), PriceMachineError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.start_file(name.replace('\\', "/"), options)?;
        Ok(())
    }

    fn xml_writer(&mut self, name: &str) -> Result<XmlWriter<&mut ZipWriter<W>>, PriceMachineError> {
        self.start_part(name)?;
        XmlWriter::new(self)
    }
}
