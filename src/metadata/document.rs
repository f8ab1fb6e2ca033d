//! ESPA XML metadata document model
//!
//! The document is kept as a stream of `quick_xml` events so that everything
//! outside the `<bands>` container is written back exactly as it was read.
//! Only the children of `<bands>` are broken out into [`Band`] values that can
//! be edited or removed.

use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;

use log::debug;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};

use crate::metadata::errors::{MetadataError, MetadataResult};

/// Local name of the band container element
pub const BANDS_ELEMENT: &[u8] = b"bands";
/// Local name of a single band element
pub const BAND_ELEMENT: &[u8] = b"band";

/// A single `<band>` element inside the `<bands>` container
#[derive(Debug, Clone)]
pub struct Band {
    /// Start tag carrying the attributes
    start: BytesStart<'static>,
    /// Inner events, `None` for a self-closing `<band/>`
    body: Option<Vec<Event<'static>>>,
}

impl Band {
    /// Create a band from its start tag and inner content
    ///
    /// Attributes are validated here so that later lookups can not fail.
    fn new(start: BytesStart<'static>, body: Option<Vec<Event<'static>>>) -> MetadataResult<Self> {
        for attr in start.attributes() {
            attr?.unescape_value()?;
        }
        Ok(Band { start, body })
    }

    /// Get an attribute value by name, unescaped
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.start
            .try_get_attribute(key)
            .ok()
            .flatten()
            .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
    }

    /// The `name` attribute
    pub fn name(&self) -> Option<String> {
        self.attribute("name")
    }

    /// The `product` attribute
    pub fn product(&self) -> Option<String> {
        self.attribute("product")
    }

    /// Set an attribute, replacing it in place or appending it if absent
    ///
    /// Attribute order is kept. Other attributes keep their raw (escaped)
    /// text.
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        let escaped_value = quick_xml::escape::escape(value);
        let mut attrs: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();
        let mut replaced = false;

        for attr in self.start.attributes().flatten() {
            let attr_key = attr.key.as_ref().to_vec();
            if attr_key == key.as_bytes() {
                attrs.push((attr_key, escaped_value.as_bytes().to_vec()));
                replaced = true;
            } else {
                attrs.push((attr_key, requote(&attr.value)));
            }
        }
        if !replaced {
            attrs.push((key.as_bytes().to_vec(), escaped_value.as_bytes().to_vec()));
        }

        self.start.clear_attributes();
        for (k, v) in &attrs {
            self.start.push_attribute(Attribute {
                key: QName(k.as_slice()),
                value: Cow::Borrowed(v.as_slice()),
            });
        }
    }

    /// Set the `name` attribute
    pub fn set_name(&mut self, name: &str) {
        self.set_attribute("name", name);
    }

    /// Set the `product` attribute
    pub fn set_product(&mut self, product: &str) {
        self.set_attribute("product", product);
    }

    /// Name used in diagnostics when the band has no `name` attribute
    pub fn display_name(&self) -> String {
        self.name().unwrap_or_else(|| "(unnamed)".to_string())
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> MetadataResult<()> {
        match &self.body {
            None => writer.write_event(Event::Empty(self.start.borrow()))?,
            Some(body) => {
                writer.write_event(Event::Start(self.start.borrow()))?;
                for event in body {
                    writer.write_event(event.borrow())?;
                }
                writer.write_event(Event::End(self.start.to_end()))?;
            }
        }
        Ok(())
    }
}

/// Attribute values are always written back double-quoted
fn requote(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    for &b in raw {
        if b == b'"' {
            out.extend_from_slice(b"&quot;");
        } else {
            out.push(b);
        }
    }
    out
}

/// A child node of the `<bands>` container
#[derive(Debug, Clone)]
enum BandsChild {
    Band(Band),
    Other(Event<'static>),
}

impl BandsChild {
    fn is_whitespace(&self) -> bool {
        match self {
            BandsChild::Other(Event::Text(text)) => text.iter().all(|b| b.is_ascii_whitespace()),
            _ => false,
        }
    }
}

/// Where the parser currently is relative to the `<bands>` container
enum Section {
    Head,
    Bands,
    Tail,
}

/// Parsed ESPA metadata document
#[derive(Debug, Clone)]
pub struct MetadataDocument {
    /// Everything before `<bands>`
    head: Vec<Event<'static>>,
    /// The `<bands>` start tag
    container: BytesStart<'static>,
    /// The container was written as `<bands/>`
    container_empty: bool,
    /// Children of `<bands>` in document order
    children: Vec<BandsChild>,
    /// Everything after `</bands>`
    tail: Vec<Event<'static>>,
}

impl MetadataDocument {
    /// Parse a metadata document from an XML string
    ///
    /// # Errors
    /// `XmlError` if the XML is not well-formed, `ParseError` if elements are
    /// left open at the end of input, `MissingBandsContainer` if there is no
    /// `<bands>` element.
    pub fn parse(xml: &str) -> MetadataResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().check_end_names = true;

        let mut head = Vec::new();
        let mut tail = Vec::new();
        let mut children = Vec::new();
        let mut container: Option<BytesStart<'static>> = None;
        let mut container_empty = false;
        let mut section = Section::Head;
        let mut depth: usize = 0;

        loop {
            let event = reader.read_event()?;
            match section {
                Section::Head => match event {
                    Event::Start(e) if e.local_name().as_ref() == BANDS_ELEMENT => {
                        container = Some(e.into_owned());
                        depth += 1;
                        section = Section::Bands;
                    }
                    Event::Empty(e) if e.local_name().as_ref() == BANDS_ELEMENT => {
                        container = Some(e.into_owned());
                        container_empty = true;
                        section = Section::Tail;
                    }
                    Event::Eof => break,
                    other => {
                        track_depth(&other, &mut depth);
                        head.push(other.into_owned());
                    }
                },
                Section::Bands => match event {
                    Event::Start(e) => {
                        let body = read_element_body(&mut reader)?;
                        if e.local_name().as_ref() == BAND_ELEMENT {
                            children.push(BandsChild::Band(Band::new(e.into_owned(), Some(body))?));
                        } else {
                            let end = Event::End(e.to_end().into_owned());
                            children.push(BandsChild::Other(Event::Start(e.into_owned())));
                            children.extend(body.into_iter().map(BandsChild::Other));
                            children.push(BandsChild::Other(end));
                        }
                    }
                    Event::Empty(e) if e.local_name().as_ref() == BAND_ELEMENT => {
                        children.push(BandsChild::Band(Band::new(e.into_owned(), None)?));
                    }
                    Event::End(_) => {
                        depth -= 1;
                        section = Section::Tail;
                    }
                    Event::Eof => {
                        return Err(MetadataError::ParseError(
                            "unexpected end of document inside <bands>".to_string(),
                        ))
                    }
                    other => children.push(BandsChild::Other(other.into_owned())),
                },
                Section::Tail => match event {
                    Event::Eof => break,
                    other => {
                        track_depth(&other, &mut depth);
                        tail.push(other.into_owned());
                    }
                },
            }
        }

        if depth != 0 {
            return Err(MetadataError::ParseError(format!(
                "unexpected end of document with {} unclosed element(s)",
                depth
            )));
        }

        let container = container.ok_or(MetadataError::MissingBandsContainer)?;
        let doc = MetadataDocument {
            head,
            container,
            container_empty,
            children,
            tail,
        };
        debug!("Parsed metadata document with {} band(s)", doc.band_count());
        Ok(doc)
    }

    /// Load and parse a metadata document from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> MetadataResult<Self> {
        let path = path.as_ref();
        debug!("Reading metadata document {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Bands in document order
    pub fn bands(&self) -> impl Iterator<Item = &Band> {
        self.children.iter().filter_map(|child| match child {
            BandsChild::Band(band) => Some(band),
            BandsChild::Other(_) => None,
        })
    }

    /// Mutable bands in document order
    pub fn bands_mut(&mut self) -> impl Iterator<Item = &mut Band> {
        self.children.iter_mut().filter_map(|child| match child {
            BandsChild::Band(band) => Some(band),
            BandsChild::Other(_) => None,
        })
    }

    /// Number of bands in the container
    pub fn band_count(&self) -> usize {
        self.bands().count()
    }

    /// Names of all bands, in document order
    pub fn band_names(&self) -> Vec<String> {
        self.bands().map(Band::display_name).collect()
    }

    /// Remove every band for which `predicate` returns true
    ///
    /// Surviving bands keep their relative order. A whitespace text node
    /// directly before a removed band goes with it. Removed bands are returned
    /// in document order.
    pub fn remove_bands_where<F>(&mut self, mut predicate: F) -> Vec<Band>
    where
        F: FnMut(&Band) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept: Vec<BandsChild> = Vec::with_capacity(self.children.len());

        for child in self.children.drain(..) {
            match child {
                BandsChild::Band(band) if predicate(&band) => {
                    if kept.last().is_some_and(BandsChild::is_whitespace) {
                        kept.pop();
                    }
                    removed.push(band);
                }
                other => kept.push(other),
            }
        }

        self.children = kept;
        removed
    }

    /// Serialize the document into a writer
    pub fn write_to<W: Write>(&self, inner: W) -> MetadataResult<()> {
        let mut writer = Writer::new(inner);

        for event in &self.head {
            writer.write_event(event.borrow())?;
        }

        if self.container_empty && self.children.is_empty() {
            writer.write_event(Event::Empty(self.container.borrow()))?;
        } else {
            writer.write_event(Event::Start(self.container.borrow()))?;
            for child in &self.children {
                match child {
                    BandsChild::Band(band) => band.write_to(&mut writer)?,
                    BandsChild::Other(event) => writer.write_event(event.borrow())?,
                }
            }
            writer.write_event(Event::End(self.container.to_end()))?;
        }

        for event in &self.tail {
            writer.write_event(event.borrow())?;
        }
        Ok(())
    }

    /// Serialize the document to a string
    pub fn to_xml_string(&self) -> MetadataResult<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| MetadataError::GenericError(format!("Serialized XML is not UTF-8: {}", e)))
    }

    /// Write the document to a file, replacing it if it exists
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> MetadataResult<()> {
        let path = path.as_ref();
        let xml = self.to_xml_string()?;
        fs::write(path, xml)?;
        debug!("Wrote metadata document {}", path.display());
        Ok(())
    }
}

fn track_depth(event: &Event<'_>, depth: &mut usize) {
    match event {
        Event::Start(_) => *depth += 1,
        Event::End(_) => *depth = depth.saturating_sub(1),
        _ => {}
    }
}

/// Read events up to and including the end tag matching an already consumed
/// start tag, returning the inner events
fn read_element_body(reader: &mut Reader<&[u8]>) -> MetadataResult<Vec<Event<'static>>> {
    let mut body = Vec::new();
    let mut depth: usize = 0;

    loop {
        match reader.read_event()? {
            Event::End(e) => {
                if depth == 0 {
                    return Ok(body);
                }
                depth -= 1;
                body.push(Event::End(e.into_owned()));
            }
            Event::Start(e) => {
                depth += 1;
                body.push(Event::Start(e.into_owned()));
            }
            Event::Eof => {
                return Err(MetadataError::ParseError(
                    "unexpected end of document inside <band>".to_string(),
                ))
            }
            other => body.push(other.into_owned()),
        }
    }
}
