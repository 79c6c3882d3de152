//! Conversions between scalar model values and their XML shapes.
//!
//! Each adapter works on a *property element*, the element named after the
//! property (for example `gmd:title`), and writes or reads the value
//! element inside it (for example `gco:CharacterString`).

pub(crate) mod code;
pub(crate) mod measure;
pub(crate) mod primitive;
pub(crate) mod text;

use crate::dialect::{DialectContext, Namespace};
use crate::terms::Term;
use crate::warning::{MessageKey, Warnings};
use isomd_xml_tree::{Document, Name, NodeId};

/// Appends the element of `term` to `parent`, if the dialect has one.
pub(crate) fn append(
    doc: &mut Document,
    ctx: &DialectContext,
    parent: NodeId,
    term: Term,
) -> Option<NodeId> {
    ctx.element_name(term)
        .map(|name| doc.append(parent, name.to_name()))
}

/// Returns `true` if `node` is the element of `term` in this dialect.
pub(crate) fn is(doc: &Document, ctx: &DialectContext, node: NodeId, term: Term) -> bool {
    ctx.element_name(term)
        .is_some_and(|name| name.matches(&doc.element(node).name))
}

/// The first child element of `node`.
pub(crate) fn first_child(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.children(node).next()
}

/// The `xlink:href` of `node`.
pub(crate) fn href(doc: &Document, node: NodeId) -> Option<&str> {
    doc.element(node).attribute(Some(Namespace::Xlink.uri()), "href")
}

/// Returns `true` if the property element explains why it has no value.
pub(crate) fn is_nil(doc: &Document, ctx: &DialectContext, node: NodeId) -> bool {
    doc.element(node)
        .attribute(Some(ctx.gco().uri()), "nilReason")
        .is_some()
}

/// `prefix:local` form of a tree name, for messages.
pub(crate) fn display_name(name: &Name) -> String {
    match name.namespace.as_deref().and_then(Namespace::from_uri) {
        Some(namespace) => format!("{}:{}", namespace.prefix(), name.local),
        None => name.local.clone(),
    }
}

/// Reports `child` of `parent` as an element the codec does not know.
pub(crate) fn unexpected(doc: &Document, warnings: &mut Warnings<'_>, parent: NodeId, child: NodeId) {
    warnings.emit(
        MessageKey::UnexpectedElement,
        [
            display_name(&doc.element(parent).name),
            display_name(&doc.element(child).name),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(
            display_name(&Name::new(Namespace::Gmd.uri(), "title")),
            "gmd:title"
        );
        assert_eq!(display_name(&Name::new("urn:x", "title")), "title");
        assert_eq!(display_name(&Name::unqualified("title")), "title");
    }
}
