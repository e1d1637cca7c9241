use crate::error::SvgError;
use crate::path::parse_path_data;
use crate::style::parse_style;
use crate::types::*;
use quick_xml::Reader;
use quick_xml::escape::{EscapeError, resolve_predefined_entity};
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;
use tracing::{debug, trace};

/// Parse an SVG document held in memory.
pub fn parse_document(xml: &str) -> Result<Document, SvgError> {
    read_document(Reader::from_str(xml))
}

/// Parse an SVG document from a buffered byte stream.
pub fn parse_document_from_reader<R: BufRead>(source: R) -> Result<Document, SvgError> {
    read_document(Reader::from_reader(source))
}

fn read_document<R: BufRead>(mut reader: Reader<R>) -> Result<Document, SvgError> {
    let config = reader.config_mut();
    config.trim_text(true);
    config.expand_empty_elements = true;

    let mut doc = Document::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let root = element_name(e);
                read_root(&mut reader, &root, &mut doc)?;
                return Ok(doc);
            }
            Event::Eof => return Err(SvgError::MissingRoot),
            _ => {}
        }
        buf.clear();
    }
}

/// Read the children of the root element: a `title` and top-level groups.
fn read_root<R: BufRead>(
    reader: &mut Reader<R>,
    root: &str,
    doc: &mut Document,
) -> Result<(), SvgError> {
    let defaults = AttributeSet::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = element_name(e);
                match name.as_str() {
                    "title" => doc.title = read_text(reader, &name)?,
                    "g" => {
                        let attrs = collect_attributes(e)?;
                        doc.groups.push(read_group(reader, &defaults, attrs)?);
                    }
                    _ => {
                        debug!(element = %name, "Skipping unsupported element under <{}>", root);
                        skip_element(reader, &name)?;
                    }
                }
            }
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(SvgError::UnexpectedEof(root.to_string())),
            _ => {}
        }
        buf.clear();
    }
}

fn read_group<R: BufRead>(
    reader: &mut Reader<R>,
    parent: &AttributeSet,
    attrs: Vec<(String, String)>,
) -> Result<Group, SvgError> {
    let mut group = Group {
        id: String::new(),
        attributes: AttributeSet::inherit(parent),
        transform: None,
        children: Vec::new(),
    };

    for (key, value) in attrs {
        match key.as_str() {
            "id" => group.id = value,
            "style" => parse_style(&mut group.attributes, &value),
            "transform" => group.transform = Some(value),
            _ => {}
        }
    }

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = element_name(e);
                let attrs = collect_attributes(e)?;
                let child = match name.as_str() {
                    "g" => Node::Group(read_group(reader, &group.attributes, attrs)?),
                    "path" => Node::Path(read_path(reader, &group.attributes, attrs)?),
                    _ => return Err(SvgError::UnknownElement(name)),
                };
                group.children.push(child);
            }
            Event::End(_) => break,
            Event::Eof => return Err(SvgError::UnexpectedEof("g".to_string())),
            _ => {}
        }
        buf.clear();
    }

    trace!(id = %group.id, children = group.children.len(), "Parsed group");
    Ok(group)
}

fn read_path<R: BufRead>(
    reader: &mut Reader<R>,
    parent: &AttributeSet,
    attrs: Vec<(String, String)>,
) -> Result<Path, SvgError> {
    let mut id = String::new();
    let mut attributes = AttributeSet::inherit(parent);
    let mut data = String::new();

    for (key, value) in attrs {
        match key.as_str() {
            "id" => id = value,
            "style" => parse_style(&mut attributes, &value),
            "d" => data = value,
            _ => {}
        }
    }

    let segments = match parse_path_data(&data) {
        Ok(segments) => segments,
        Err(source) => return Err(SvgError::PathData { id, source }),
    };

    // Paths have no children we care about
    skip_element(reader, "path")?;

    trace!(id = %id, segments = segments.len(), "Parsed path");
    Ok(Path {
        id,
        attributes,
        segments,
    })
}

/// Collect the text content of an element, ignoring any nested markup.
///
/// Trimming is switched off while reading so whitespace next to entity
/// references survives; the joined text is trimmed once at the end.
fn read_text<R: BufRead>(reader: &mut Reader<R>, name: &str) -> Result<String, SvgError> {
    reader.config_mut().trim_text(false);
    let text = collect_text(reader, name);
    reader.config_mut().trim_text(true);
    text.map(|t| t.trim().to_string())
}

fn collect_text<R: BufRead>(reader: &mut Reader<R>, name: &str) -> Result<String, SvgError> {
    let mut text = String::new();
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::Text(ref e) => text.push_str(&e.decode().map_err(quick_xml::Error::from)?),
            Event::CData(ref e) => text.push_str(&e.decode().map_err(quick_xml::Error::from)?),
            Event::GeneralRef(ref e) => {
                if let Some(ch) = e.resolve_char_ref()? {
                    text.push(ch);
                } else {
                    let entity = e.decode().map_err(quick_xml::Error::from)?;
                    match resolve_predefined_entity(&entity) {
                        Some(resolved) => text.push_str(resolved),
                        None => {
                            return Err(SvgError::Escape(EscapeError::UnrecognizedEntity(
                                0..entity.len(),
                                entity.into_owned(),
                            )));
                        }
                    }
                }
            }
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(text);
                }
            }
            Event::Eof => return Err(SvgError::UnexpectedEof(name.to_string())),
            _ => {}
        }
        buf.clear();
    }
}

/// Consume everything up to and including the end tag of the current element.
fn skip_element<R: BufRead>(reader: &mut Reader<R>, name: &str) -> Result<(), SvgError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(SvgError::UnexpectedEof(name.to_string())),
            _ => {}
        }
        buf.clear();
    }
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Local names and unescaped values of an element's attributes
fn collect_attributes(e: &BytesStart) -> Result<Vec<(String, String)>, SvgError> {
    let mut attrs = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = quick_xml::escape::unescape(&raw)?.into_owned();
        attrs.push((key, value));
    }

    Ok(attrs)
}
