//! XML writing utilities for Office Open XML parts.
//! Provides a thin writer wrapper over quick-xml with element helpers.

use crate::error::PriceMachineError;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Writer;
use std::io::Write;

/// XML writer wrapper used to emit spreadsheet parts
pub(crate) struct XmlWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a new XML writer and emits the standalone UTF-8 declaration
    pub(crate) fn new(inner: W) -> Result<XmlWriter<W>, PriceMachineError> {
        let mut writer = Writer::new(inner);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(XmlWriter { writer })
    }

    /// Opens an element with the given attributes
    pub(crate) fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), PriceMachineError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    /// Closes an element
    pub(crate) fn end(&mut self, name: &str) -> Result<(), PriceMachineError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes a self-closing element
    pub(crate) fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), PriceMachineError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    /// Writes escaped text content
    pub(crate) fn text(&mut self, content: &str) -> Result<(), PriceMachineError> {
        self.writer.write_event(Event::Text(BytesText::new(content)))?;
        Ok(())
    }

    /// Writes `<name attributes>content</name>`
    pub(crate) fn text_element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        content: &str,
    ) -> Result<(), PriceMachineError> {
        self.start(name, attributes)?;
        self.text(content)?;
        self.end(name)
    }

    /// Returns the underlying writer
    pub(crate) fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
