//! Writing a [`Document`] as XML text.

use crate::document::{Document, Name, NodeId};
use crate::error::{Result, TreeError};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::collections::HashMap;
use std::io::Write;

/// The namespace bound to the `xml` prefix by definition.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Options controlling how a document is written.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Indentation width; 0 writes everything on one line.
    pub indent: usize,
    /// Whether to start with an `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub declaration: bool,
    /// Preferred prefixes as `(namespace URI, prefix)` pairs. Namespaces not
    /// listed get generated `ns1`, `ns2`, ... prefixes.
    pub prefixes: Vec<(String, String)>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: true,
            prefixes: Vec::new(),
        }
    }
}

impl Document {
    /// Writes the document as a UTF-8 string.
    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, options)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Writes the document to `writer`.
    ///
    /// Every namespace used in the document is declared once, on the root
    /// element, in order of first use.
    pub fn write_to<W: Write>(&self, writer: W, options: &WriteOptions) -> Result<()> {
        let root = self.root().ok_or(TreeError::NoRoot)?;
        let prefixes = assign_prefixes(self, root, options);

        let mut writer = if options.indent > 0 {
            Writer::new_with_indent(writer, b' ', options.indent)
        } else {
            Writer::new(writer)
        };
        if options.declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        write_element(self, &mut writer, root, &prefixes, true)
    }
}

/// Namespace URI to prefix, in declaration order.
struct Prefixes {
    order: Vec<(String, String)>,
    by_uri: HashMap<String, String>,
}

impl Prefixes {
    fn qualify(&self, name: &Name) -> String {
        match name.namespace.as_deref() {
            Some(XML_NAMESPACE) => format!("xml:{}", name.local),
            Some(uri) => match self.by_uri.get(uri) {
                Some(prefix) => format!("{}:{}", prefix, name.local),
                None => name.local.clone(),
            },
            None => name.local.clone(),
        }
    }
}

fn assign_prefixes(document: &Document, root: NodeId, options: &WriteOptions) -> Prefixes {
    let mut prefixes = Prefixes {
        order: Vec::new(),
        by_uri: HashMap::new(),
    };
    let mut generated = 0;
    for node in document.descendants(root) {
        let element = document.element(node);
        let names = std::iter::once(&element.name).chain(element.attributes.iter().map(|a| &a.name));
        for name in names {
            let Some(uri) = name.namespace.as_deref() else {
                continue;
            };
            if uri == XML_NAMESPACE || prefixes.by_uri.contains_key(uri) {
                continue;
            }
            let preferred = options
                .prefixes
                .iter()
                .find(|(known, _)| known == uri)
                .map(|(_, prefix)| prefix.clone())
                .filter(|prefix| !prefixes.order.iter().any(|(_, taken)| taken == prefix));
            let prefix = preferred.unwrap_or_else(|| loop {
                generated += 1;
                let candidate = format!("ns{}", generated);
                if !prefixes.order.iter().any(|(_, taken)| *taken == candidate) {
                    break candidate;
                }
            });
            prefixes.by_uri.insert(uri.to_string(), prefix.clone());
            prefixes.order.push((uri.to_string(), prefix));
        }
    }
    prefixes
}

fn write_element<W: Write>(
    document: &Document,
    writer: &mut Writer<W>,
    node: NodeId,
    prefixes: &Prefixes,
    is_root: bool,
) -> Result<()> {
    let element = document.element(node);
    let qualified = prefixes.qualify(&element.name);
    let mut start = BytesStart::new(qualified.as_str());

    if is_root {
        for (uri, prefix) in &prefixes.order {
            let key = format!("xmlns:{}", prefix);
            start.push_attribute((key.as_str(), uri.as_str()));
        }
    }
    for attribute in &element.attributes {
        let key = prefixes.qualify(&attribute.name);
        start.push_attribute((key.as_str(), attribute.value.as_str()));
    }

    if element.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(document, writer, *child, prefixes, false)?;
    }
    writer.write_event(Event::End(BytesEnd::new(qualified.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new();
        let root = doc.create_element(Name::new("urn:a", "root"));
        doc.set_root(root);
        let child = doc.append(root, Name::new("urn:b", "child"));
        doc.set_attribute(child, Name::new("urn:c", "href"), "#x & y");
        doc.set_text(child, "1 < 2");
        doc.append(root, Name::new("urn:a", "empty"));
        doc
    }

    #[test]
    fn test_write_with_preferred_prefixes() {
        let options = WriteOptions {
            indent: 0,
            declaration: false,
            prefixes: vec![
                ("urn:a".to_string(), "a".to_string()),
                ("urn:c".to_string(), "c".to_string()),
            ],
        };
        let xml = sample().to_xml_string(&options).unwrap();
        assert_eq!(
            xml,
            r##"<a:root xmlns:a="urn:a" xmlns:ns1="urn:b" xmlns:c="urn:c"><ns1:child c:href="#x &amp; y">1 &lt; 2</ns1:child><a:empty/></a:root>"##
        );
    }

    #[test]
    fn test_round_trip_through_parse() {
        let original = sample();
        let xml = original.to_xml_string(&WriteOptions::default()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        let parsed = Document::parse(&xml).unwrap();
        let root = parsed.root().unwrap();
        let child = parsed.children(root).next().unwrap();
        assert_eq!(parsed.element(child).attribute(Some("urn:c"), "href"), Some("#x & y"));
        assert_eq!(parsed.element(child).text(), "1 < 2");
    }

    #[test]
    fn test_write_without_root_fails() {
        let doc = Document::new();
        assert!(matches!(
            doc.to_xml_string(&WriteOptions::default()),
            Err(TreeError::NoRoot)
        ));
    }
}
