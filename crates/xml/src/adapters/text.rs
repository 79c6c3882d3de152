//! Free text with locale-tagged translations.
//!
//! Both dialects write the default text as a character string followed by a
//! `PT_FreeText` holding the translations. ISO 19115-3 puts each
//! translation in its own `textGroup`; ISO 19139 puts all of them in a
//! single group:
//!
//! ```xml
//! <gmd:title xsi:type="gmd:PT_FreeText_PropertyType">
//!   <gco:CharacterString>OpenSource Project</gco:CharacterString>
//!   <gmd:PT_FreeText>
//!     <gmd:textGroup>
//!       <gmd:LocalisedCharacterString locale="#locale-eng">OpenSource Project</gmd:LocalisedCharacterString>
//!       <gmd:LocalisedCharacterString locale="#locale-ita">Progetto OpenSource</gmd:LocalisedCharacterString>
//!     </gmd:textGroup>
//!   </gmd:PT_FreeText>
//! </gmd:title>
//! ```
//!
//! Reading accepts any number of groups holding any number of strings, so
//! either shape reads back the same value. Empty strings are values too: an
//! empty translation is kept, and so is an empty default written next to
//! translations.

use super::{append, is, is_nil, unexpected};
use crate::dialect::{DialectContext, Namespace};
use crate::terms::Term;
use crate::warning::{MessageKey, Warnings};
use isomd_metadata::{InternationalString, Locale};
use isomd_xml_tree::{Document, Name, NodeId};
use std::collections::HashSet;

const LOCALE_PREFIX: &str = "locale-";

/// The `locale` attribute value designating `locale`.
pub(crate) fn locale_reference(locale: &Locale) -> String {
    match locale.region() {
        Some(region) => format!("#{}{}-{}", LOCALE_PREFIX, locale.iso3_language(), region),
        None => format!("#{}{}", LOCALE_PREFIX, locale.iso3_language()),
    }
}

/// Parses a `locale` attribute value such as `#locale-fra` or `fr`.
pub(crate) fn parse_locale_reference(reference: &str) -> Option<Locale> {
    let reference = reference.trim();
    let reference = reference.strip_prefix('#').unwrap_or(reference);
    let tag = reference.strip_prefix(LOCALE_PREFIX).unwrap_or(reference);
    Locale::parse(tag)
}

pub(crate) fn write(doc: &mut Document, ctx: &DialectContext, prop: NodeId, value: &InternationalString) {
    if let Some(node) = append(doc, ctx, prop, Term::CharacterString) {
        doc.set_text(node, value.text());
    }
    if !value.has_translations() {
        return;
    }
    let Some(free_text) = append(doc, ctx, prop, Term::FreeText) else {
        return;
    };
    if let Some(name) = ctx.element_name(Term::FreeText) {
        doc.set_attribute(
            prop,
            Name::new(Namespace::Xsi.uri(), "type"),
            format!("{}:PT_FreeText_PropertyType", name.namespace.prefix()),
        );
    }

    let mut group = None;
    for (locale, text) in value.translations() {
        let target = match group {
            Some(shared) if ctx.is_legacy() => shared,
            _ => match append(doc, ctx, free_text, Term::TextGroup) {
                Some(created) => created,
                None => return,
            },
        };
        group = Some(target);
        if let Some(node) = append(doc, ctx, target, Term::LocalisedCharacterString) {
            doc.set_attribute(node, Name::unqualified("locale"), locale_reference(locale));
            doc.set_text(node, text);
        }
    }
}

pub(crate) fn read(
    doc: &Document,
    ctx: &DialectContext,
    prop: NodeId,
    warnings: &mut Warnings<'_>,
) -> Option<InternationalString> {
    if is_nil(doc, ctx, prop) {
        return None;
    }
    let mut default: Option<String> = None;
    let mut translations: Vec<(Locale, String)> = Vec::new();
    let mut seen: HashSet<Locale> = HashSet::new();

    for child in doc.children(prop) {
        if is(doc, ctx, child, Term::CharacterString) || is(doc, ctx, child, Term::Anchor) {
            if default.is_none() {
                default = Some(doc.element(child).text().to_string());
            }
        } else if is(doc, ctx, child, Term::FreeText) {
            for group in doc.children(child) {
                if !is(doc, ctx, group, Term::TextGroup) {
                    unexpected(doc, warnings, child, group);
                    continue;
                }
                for entry in doc.children(group) {
                    if !is(doc, ctx, entry, Term::LocalisedCharacterString) {
                        unexpected(doc, warnings, group, entry);
                        continue;
                    }
                    read_entry(doc, entry, &mut translations, &mut seen, warnings);
                }
            }
        } else {
            unexpected(doc, warnings, prop, child);
        }
    }

    // An empty default is kept when translations come with it.
    match default {
        Some(text) if !text.is_empty() || !translations.is_empty() => Some(
            translations
                .into_iter()
                .fold(InternationalString::new(text), |string, (locale, text)| {
                    string.with_translation(locale, text)
                }),
        ),
        _ => InternationalString::from_translations(translations),
    }
}

fn read_entry(
    doc: &Document,
    entry: NodeId,
    translations: &mut Vec<(Locale, String)>,
    seen: &mut HashSet<Locale>,
    warnings: &mut Warnings<'_>,
) {
    let element = doc.element(entry);
    let text = element.text();
    let reference = element.attribute(None, "locale").unwrap_or_default();
    let Some(locale) = parse_locale_reference(reference) else {
        warnings.emit(MessageKey::UnrecognizedLocale, [reference]);
        return;
    };
    if !seen.insert(locale.clone()) {
        warnings.emit(MessageKey::DuplicatedLocale, [locale.to_string()]);
        return;
    }
    translations.push((locale, text.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Dialect, Direction};

    fn project_name() -> InternationalString {
        InternationalString::new("OpenSource Project")
            .with_translation(Locale::parse("en").unwrap(), "OpenSource Project")
            .with_translation(Locale::parse("it").unwrap(), "Progetto OpenSource")
            .with_translation(Locale::parse("fr").unwrap(), "Projet OpenSource")
    }

    fn write_title(ctx: &DialectContext, value: &InternationalString) -> (Document, NodeId) {
        let mut doc = Document::new();
        let prop = doc.create_element(ctx.element_name(Term::Title).unwrap().to_name());
        doc.set_root(prop);
        write(&mut doc, ctx, prop, value);
        (doc, prop)
    }

    fn groups(doc: &Document, prop: NodeId) -> Vec<usize> {
        let free_text = doc.children(prop).nth(1).unwrap();
        doc.children(free_text)
            .map(|group| doc.children(group).count())
            .collect()
    }

    #[test]
    fn test_locale_reference() {
        assert_eq!(locale_reference(&Locale::parse("fr").unwrap()), "#locale-fra");
        assert_eq!(
            parse_locale_reference("#locale-fra"),
            Locale::parse("fr")
        );
        assert_eq!(parse_locale_reference("en"), Locale::parse("en"));
        assert_eq!(parse_locale_reference("#locale-???"), None);
    }

    #[test]
    fn test_shapes_per_dialect() {
        let value = project_name();
        let legacy = DialectContext::new(Dialect::Legacy, Direction::Writing);
        let (doc, prop) = write_title(&legacy, &value);
        assert_eq!(groups(&doc, prop), vec![3]);
        assert_eq!(
            doc.element(prop).attribute(Some(Namespace::Xsi.uri()), "type"),
            Some("gmd:PT_FreeText_PropertyType")
        );

        let current = DialectContext::new(Dialect::Current, Direction::Writing);
        let (doc, prop) = write_title(&current, &value);
        assert_eq!(groups(&doc, prop), vec![1, 1, 1]);
        assert_eq!(
            doc.element(prop).attribute(Some(Namespace::Xsi.uri()), "type"),
            Some("lan:PT_FreeText_PropertyType")
        );
    }

    #[test]
    fn test_both_shapes_read_back_equal() {
        let value = project_name();
        for dialect in [Dialect::Legacy, Dialect::Current] {
            let ctx = DialectContext::new(dialect, Direction::Writing);
            let (doc, prop) = write_title(&ctx, &value);
            let mut warnings = Warnings::new(None);
            assert_eq!(read(&doc, &ctx, prop, &mut warnings), Some(value.clone()));
            assert!(warnings.into_vec().is_empty());
        }
    }

    #[test]
    fn test_plain_string_has_no_free_text() {
        let ctx = DialectContext::new(Dialect::Legacy, Direction::Writing);
        let (doc, prop) = write_title(&ctx, &InternationalString::new("Plain"));
        assert_eq!(doc.children(prop).count(), 1);
        assert!(doc.element(prop).attributes.is_empty());
    }

    #[test]
    fn test_localized_only_uses_first_entry_as_default() {
        let ctx = DialectContext::new(Dialect::Current, Direction::Reading);
        let doc = Document::parse(&format!(
            r##"<cit:title xmlns:cit="{cit}" xmlns:lan="{lan}">
                <lan:PT_FreeText>
                  <lan:textGroup><lan:LocalisedCharacterString locale="#locale-ita">Progetto</lan:LocalisedCharacterString></lan:textGroup>
                  <lan:textGroup><lan:LocalisedCharacterString locale="#locale-ita">Doppio</lan:LocalisedCharacterString></lan:textGroup>
                  <lan:textGroup><lan:LocalisedCharacterString locale="#locale-1">Rotto</lan:LocalisedCharacterString></lan:textGroup>
                </lan:PT_FreeText>
              </cit:title>"##,
            cit = Namespace::Cit.uri(),
            lan = Namespace::Lan.uri(),
        ))
        .unwrap();
        let mut warnings = Warnings::new(None);
        let value = read(&doc, &ctx, doc.root().unwrap(), &mut warnings).unwrap();
        assert_eq!(value.text(), "Progetto");
        assert_eq!(value.translations().count(), 1);

        let keys: Vec<_> = warnings.into_vec().into_iter().map(|w| w.key).collect();
        assert_eq!(keys, vec![MessageKey::DuplicatedLocale, MessageKey::UnrecognizedLocale]);
    }

    #[test]
    fn test_empty_translation_is_kept() {
        let value = InternationalString::new("Title")
            .with_translation(Locale::parse("fr").unwrap(), "")
            .with_translation(Locale::parse("it").unwrap(), "Titolo");
        for dialect in [Dialect::Legacy, Dialect::Current] {
            let ctx = DialectContext::new(dialect, Direction::Writing);
            let (doc, prop) = write_title(&ctx, &value);
            let mut warnings = Warnings::new(None);
            let read = read(&doc, &ctx, prop, &mut warnings).unwrap();
            assert_eq!(read.translation(&Locale::parse("fr").unwrap()), Some(""));
            assert_eq!(read, value);
            assert!(warnings.into_vec().is_empty());
        }
    }

    #[test]
    fn test_empty_default_next_to_translations_is_kept() {
        let value = InternationalString::new("")
            .with_translation(Locale::parse("de").unwrap(), "Titel");
        for dialect in [Dialect::Legacy, Dialect::Current] {
            let ctx = DialectContext::new(dialect, Direction::Writing);
            let (doc, prop) = write_title(&ctx, &value);
            let mut warnings = Warnings::new(None);
            let read = read(&doc, &ctx, prop, &mut warnings).unwrap();
            assert_eq!(read.text(), "");
            assert_eq!(read, value);
        }
    }

    #[test]
    fn test_blank_string_alone_reads_as_absent() {
        let ctx = DialectContext::new(Dialect::Legacy, Direction::Writing);
        let (doc, prop) = write_title(&ctx, &InternationalString::new(""));
        let mut warnings = Warnings::new(None);
        assert_eq!(read(&doc, &ctx, prop, &mut warnings), None);
    }
}
