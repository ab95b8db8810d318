//! SVG document parser
//!
//! Reads an SVG file into a generic [`Element`] tree rooted at `<svg>`.

use super::{Element, XmlNode};
use crate::error::{Result, RoundError};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;

/// Parse SVG file from path
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read (`RoundError::Io`)
/// - The content is not valid XML (`RoundError::Xml`)
/// - The root element is missing or not `<svg>`
pub fn parse_svg(path: &Path) -> Result<Element> {
    let content = fs::read_to_string(path)?;
    parse_svg_str(&content)
}

/// Parse SVG from string content
pub fn parse_svg_str(content: &str) -> Result<Element> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(element_from_start(&e)?),
            Ok(Event::Empty(e)) => {
                let el = element_from_start(&e)?;
                attach(&mut stack, &mut root, XmlNode::Element(el));
            }
            Ok(Event::End(_)) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| RoundError::Xml("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, XmlNode::Element(el));
            }
            Ok(Event::Text(e)) => {
                if !stack.is_empty() {
                    let text = e
                        .unescape()
                        .map_err(|err| RoundError::Xml(err.to_string()))?;
                    attach(&mut stack, &mut root, XmlNode::Text(text.into_owned()));
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                attach(&mut stack, &mut root, XmlNode::CData(text));
            }
            Ok(Event::Comment(e)) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                attach(&mut stack, &mut root, XmlNode::Comment(text));
            }
            Ok(Event::Eof) => break,
            // Declarations, processing instructions and doctypes are regenerated on write
            Ok(_) => {}
            Err(e) => {
                log::warn!("XML parse error in SVG: {e}");
                return Err(RoundError::Xml(format!(
                    "{e} (at byte {})",
                    reader.buffer_position()
                )));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(RoundError::Xml(format!("unclosed element <{}>", open.name)));
    }

    let root = root.ok_or(RoundError::MissingRoot)?;
    if root.local_name() != "svg" {
        return Err(RoundError::UnexpectedRoot(root.name));
    }
    Ok(root)
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element> {
    let mut el = Element::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes() {
        let attr = attr.map_err(|err| RoundError::Xml(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| RoundError::Xml(err.to_string()))?
            .into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}

/// Hang `node` under the innermost open element; the first top-level element
/// becomes the root and anything else outside it is dropped.
fn attach(stack: &mut [Element], root: &mut Option<Element>, node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if let XmlNode::Element(el) = node {
        if root.is_none() {
            *root = Some(el);
        }
    }
}
