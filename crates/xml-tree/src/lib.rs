//! # isomd-xml-tree
//!
//! A small namespace-aware XML element tree built on
//! [quick-xml](https://docs.rs/quick-xml).
//!
//! [`Document`] keeps every element in an arena and hands out [`NodeId`]
//! handles, so an element that was already placed in the tree can still
//! receive attributes. The metadata codec relies on this to mark an
//! object with an `id` once a second reference to it shows up.
//!
//! ```
//! use isomd_xml_tree::{Document, Name, WriteOptions};
//!
//! let mut doc = Document::new();
//! let root = doc.create_element(Name::new("urn:example", "root"));
//! doc.set_root(root);
//! let child = doc.append(root, Name::new("urn:example", "child"));
//! doc.set_text(child, "value");
//!
//! let options = WriteOptions {
//!     indent: 0,
//!     declaration: false,
//!     prefixes: vec![("urn:example".to_string(), "ex".to_string())],
//! };
//! let xml = doc.to_xml_string(&options).unwrap();
//! assert_eq!(xml, r#"<ex:root xmlns:ex="urn:example"><ex:child>value</ex:child></ex:root>"#);
//!
//! let parsed = Document::parse(&xml).unwrap();
//! assert_eq!(parsed.element(parsed.root().unwrap()).children.len(), 1);
//! ```

mod de;
mod document;
mod error;
mod ser;

pub use document::{Attribute, Descendants, Document, Element, Name, NodeId};
pub use error::{Result, TreeError};
pub use ser::WriteOptions;
