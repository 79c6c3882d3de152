//! Parsing XML text into a [`Document`].

use crate::document::{Document, Name, NodeId};
use crate::error::{Result, TreeError};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

impl Document {
    /// Parses a well-formed XML document.
    ///
    /// Namespace prefixes are resolved, so every element and attribute name
    /// in the result carries its namespace URI. `xmlns` declarations are not
    /// kept as attributes. Comments, processing instructions and the
    /// doctype are discarded.
    pub fn parse(xml: &str) -> Result<Document> {
        let mut reader = NsReader::from_str(xml);
        let mut document = Document::new();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let node = open_element(&reader, &mut document, &stack, &start)?;
                    stack.push(node);
                }
                Event::Empty(start) => {
                    open_element(&reader, &mut document, &stack, &start)?;
                }
                Event::End(_) => {
                    if let Some(node) = stack.pop() {
                        let element = document.element_mut(node);
                        let trimmed = element.text.trim();
                        if trimmed.len() != element.text.len() {
                            element.text = trimmed.to_string();
                        }
                    }
                }
                Event::Text(text) => {
                    let text = String::from_utf8_lossy(text.as_ref());
                    push_text(&mut document, &stack, &text)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(data.as_ref());
                    push_text(&mut document, &stack, &text)?;
                }
                Event::GeneralRef(reference) => {
                    let name = String::from_utf8_lossy(reference.as_ref());
                    let resolved = resolve_entity(&name)?;
                    push_text(&mut document, &stack, &resolved)?;
                }
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.last() {
            return Err(TreeError::Unclosed(document.element(*open).name.local.clone()));
        }
        if document.root().is_none() {
            return Err(TreeError::NoRoot);
        }
        Ok(document)
    }
}

fn open_element(
    reader: &NsReader<&[u8]>,
    document: &mut Document,
    stack: &[NodeId],
    start: &BytesStart<'_>,
) -> Result<NodeId> {
    let (resolved, local) = reader.resolve_element(start.name());
    let name = Name {
        namespace: namespace_of(resolved)?,
        local: String::from_utf8_lossy(local.as_ref()).into_owned(),
    };
    let node = document.create_element(name);

    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = attribute.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attribute.key);
        let name = Name {
            namespace: namespace_of(resolved)?,
            local: String::from_utf8_lossy(local.as_ref()).into_owned(),
        };
        let raw = String::from_utf8_lossy(&attribute.value);
        let value = quick_xml::escape::unescape(&raw)?.into_owned();
        document.set_attribute(node, name, value);
    }

    match stack.last() {
        Some(parent) => document.append_existing(*parent, node),
        None if document.root().is_some() => return Err(TreeError::MultipleRoots),
        None => document.set_root(node),
    }
    Ok(node)
}

fn namespace_of(resolved: ResolveResult<'_>) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(namespace) => {
            Ok(Some(String::from_utf8_lossy(namespace.as_ref()).into_owned()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(TreeError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

fn push_text(document: &mut Document, stack: &[NodeId], text: &str) -> Result<()> {
    match stack.last() {
        Some(node) => {
            document.element_mut(*node).text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(TreeError::TextOutsideRoot),
    }
}

/// Resolves a character reference or one of the five predefined entities.
fn resolve_entity(name: &str) -> Result<String> {
    let predefined = match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => None,
    };
    if let Some(c) = predefined {
        return Ok(c.to_string());
    }
    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(decimal) = name.strip_prefix('#') {
        decimal.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32)
        .map(|c| c.to_string())
        .ok_or_else(|| TreeError::UnknownEntity(name.to_string()))
}
