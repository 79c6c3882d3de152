//! Code list values.
//!
//! A code is written as `<gmd:MD_RestrictionCode codeList="…#MD_RestrictionCode"
//! codeListValue="licence">licence</gmd:MD_RestrictionCode>`. ISO 19115-3
//! drops the element text, so the `codeListValue` attribute wins on read.

use super::{first_child, is_nil, unexpected};
use crate::dialect::DialectContext;
use crate::warning::{MessageKey, Warnings};
use isomd_metadata::CodeList;
use isomd_xml_tree::{Document, Name, NodeId};

/// Whether the property holding a code is one value of a collection.
///
/// Decides which warning reports an empty code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Multiplicity {
    Single,
    Collection,
}

pub(crate) fn write<C: CodeList>(doc: &mut Document, ctx: &DialectContext, prop: NodeId, code: C) {
    let spelling = ctx.code_spelling(code);
    let node = doc.append(prop, ctx.code_element::<C>().to_name());
    doc.set_attribute(node, Name::unqualified("codeList"), ctx.code_list_uri::<C>());
    doc.set_attribute(node, Name::unqualified("codeListValue"), spelling);
    if ctx.is_legacy() {
        doc.set_text(node, spelling);
    }
}

pub(crate) fn read<C: CodeList>(
    doc: &Document,
    ctx: &DialectContext,
    prop: NodeId,
    multiplicity: Multiplicity,
    warnings: &mut Warnings<'_>,
) -> Option<C> {
    if is_nil(doc, ctx, prop) {
        return None;
    }
    let empty = |warnings: &mut Warnings<'_>| match multiplicity {
        Multiplicity::Collection => warnings.emit(MessageKey::NullCollectionElement, [C::NAME]),
        Multiplicity::Single => {
            warnings.emit(MessageKey::NullValue, [doc.element(prop).name.local.as_str()])
        }
    };
    let Some(node) = first_child(doc, prop) else {
        empty(warnings);
        return None;
    };
    if !ctx.code_element::<C>().matches(&doc.element(node).name) {
        unexpected(doc, warnings, prop, node);
        return None;
    }

    let element = doc.element(node);
    let spelling = element
        .attribute(None, "codeListValue")
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| element.text());
    if spelling.is_empty() {
        empty(warnings);
        return None;
    }
    let code = ctx.parse_code::<C>(spelling);
    if code.is_none() {
        warnings.emit(MessageKey::UnknownCodeValue, [C::NAME, spelling]);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Dialect, Direction, Namespace};
    use isomd_metadata::{Restriction, Role};

    fn parse(xml: &str) -> (Document, NodeId) {
        let doc = Document::parse(xml).unwrap();
        let root = doc.root().unwrap();
        (doc, root)
    }

    #[test]
    fn test_licence_spelling_per_dialect() {
        for (dialect, expected) in [(Dialect::Legacy, "license"), (Dialect::Current, "licence")] {
            let ctx = DialectContext::new(dialect, Direction::Writing);
            let mut doc = Document::new();
            let prop = doc.create_element(Name::unqualified("useConstraints"));
            doc.set_root(prop);
            write(&mut doc, &ctx, prop, Restriction::Licence);

            let node = first_child(&doc, prop).unwrap();
            let element = doc.element(node);
            assert_eq!(element.attribute(None, "codeListValue"), Some(expected));
            assert!(
                element
                    .attribute(None, "codeList")
                    .unwrap()
                    .ends_with("#MD_RestrictionCode")
            );
            assert_eq!(element.text().is_empty(), dialect == Dialect::Current);

            let mut warnings = Warnings::new(None);
            let ctx = DialectContext::new(dialect, Direction::Reading);
            assert_eq!(
                read::<Restriction>(&doc, &ctx, prop, Multiplicity::Collection, &mut warnings),
                Some(Restriction::Licence)
            );
        }
    }

    #[test]
    fn test_empty_code_in_collection() {
        let ctx = DialectContext::new(Dialect::Current, Direction::Reading);
        let (doc, prop) = parse(&format!(
            r#"<mco:useConstraints xmlns:mco="{mco}"><mco:MD_RestrictionCode codeList="x" codeListValue=""/></mco:useConstraints>"#,
            mco = Namespace::Mco.uri()
        ));
        let mut warnings = Warnings::new(None);
        assert_eq!(
            read::<Restriction>(&doc, &ctx, prop, Multiplicity::Collection, &mut warnings),
            None
        );
        let warnings = warnings.into_vec();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, MessageKey::NullCollectionElement);
        assert_eq!(warnings[0].params, vec!["MD_RestrictionCode"]);
    }

    #[test]
    fn test_empty_single_code_names_the_property() {
        let ctx = DialectContext::new(Dialect::Legacy, Direction::Reading);
        let (doc, prop) = parse(&format!(
            r#"<gmd:role xmlns:gmd="{gmd}"/>"#,
            gmd = Namespace::Gmd.uri()
        ));
        let mut warnings = Warnings::new(None);
        assert_eq!(
            read::<Role>(&doc, &ctx, prop, Multiplicity::Single, &mut warnings),
            None
        );
        let warnings = warnings.into_vec();
        assert_eq!(warnings[0].key, MessageKey::NullValue);
        assert_eq!(warnings[0].params, vec!["role"]);
    }

    #[test]
    fn test_text_is_used_without_attribute() {
        let ctx = DialectContext::new(Dialect::Legacy, Direction::Reading);
        let (doc, prop) = parse(&format!(
            r#"<gmd:role xmlns:gmd="{gmd}"><gmd:CI_RoleCode codeList="x">pointOfContact</gmd:CI_RoleCode></gmd:role>"#,
            gmd = Namespace::Gmd.uri()
        ));
        let mut warnings = Warnings::new(None);
        assert_eq!(
            read::<Role>(&doc, &ctx, prop, Multiplicity::Single, &mut warnings),
            Some(Role::PointOfContact)
        );
    }

    #[test]
    fn test_unknown_code_value() {
        let ctx = DialectContext::new(Dialect::Legacy, Direction::Reading);
        let (doc, prop) = parse(&format!(
            r#"<gmd:role xmlns:gmd="{gmd}"><gmd:CI_RoleCode codeList="x" codeListValue="boss"/></gmd:role>"#,
            gmd = Namespace::Gmd.uri()
        ));
        let mut warnings = Warnings::new(None);
        assert_eq!(
            read::<Role>(&doc, &ctx, prop, Multiplicity::Single, &mut warnings),
            None
        );
        let warnings = warnings.into_vec();
        assert_eq!(warnings[0].key, MessageKey::UnknownCodeValue);
        assert_eq!(warnings[0].params, vec!["CI_RoleCode", "boss"]);
    }
}
