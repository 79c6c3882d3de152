//! Measures and units of measure.
//!
//! A unit is designated either by its symbol (`uom="m"`) or by a pointer to
//! its canonical definition: a `gmxUom.xml` xpointer in ISO 19139, an EPSG
//! URL in ISO 19115-3. Units without an EPSG code are always written by
//! symbol. Quantitative results may also carry an inline
//! `gml:UnitDefinition`.

use super::{append, display_name, first_child, is, is_nil, unexpected};
use crate::dialect::{DialectContext, Namespace};
use crate::error::{CodecError, Result};
use crate::terms::Term;
use crate::warning::{MessageKey, Warnings};
use isomd_metadata::{Measure, Unit};
use isomd_xml_tree::{Document, Name, NodeId};

use super::primitive::parse_decimal;

const EPSG_URN: &str = "urn:ogc:def:uom:EPSG::";

/// The `uom` designation of a measured unit.
pub(crate) fn designation(ctx: &DialectContext, unit: Unit, prefer_pointer: bool) -> String {
    prefer_pointer
        .then(|| ctx.unit_reference(unit))
        .flatten()
        .unwrap_or_else(|| unit.symbol().to_string())
}

/// Parses a unit designation in any of the accepted forms.
///
/// Returns the unit and whether it was designated by pointer.
pub(crate) fn parse_unit(text: &str) -> Option<(Unit, bool)> {
    let text = text.trim();
    if let Some(code) = epsg_code(text) {
        return Unit::from_epsg_code(code).map(|unit| (unit, true));
    }
    if let Some(symbol) = xpointer_id(text) {
        return Unit::from_symbol(symbol).map(|unit| (unit, true));
    }
    Unit::from_symbol(text).map(|unit| (unit, false))
}

fn epsg_code(text: &str) -> Option<u32> {
    let code = if let Some(code) = text.strip_prefix(EPSG_URN) {
        code
    } else if let Some(code) = text.strip_prefix("EPSG:") {
        code
    } else if text.contains("/def/uom/EPSG/") {
        text.rsplit('/').next()?
    } else {
        return None;
    };
    code.trim().parse().ok()
}

/// The `gml:id` selected by a `#xpointer(//*[@gml:id='m'])` reference.
fn xpointer_id(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("@gml:id=")?;
    let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let rest = &rest[quote.len_utf8()..];
    rest.split(quote).next().filter(|id| !id.is_empty())
}

pub(crate) fn write_distance(doc: &mut Document, ctx: &DialectContext, prop: NodeId, measure: &Measure) {
    if let Some(node) = append(doc, ctx, prop, Term::Distance) {
        doc.set_attribute(
            node,
            Name::unqualified("uom"),
            designation(ctx, measure.unit, measure.prefer_pointer()),
        );
        doc.set_text(node, measure.value.to_string());
    }
}

/// Reads a `gco:Distance`.
///
/// A missing or unknown unit and a value that is not a number are errors.
pub(crate) fn read_distance(
    doc: &Document,
    ctx: &DialectContext,
    prop: NodeId,
    warnings: &mut Warnings<'_>,
) -> Result<Option<Measure>> {
    if is_nil(doc, ctx, prop) {
        return Ok(None);
    }
    let Some(node) = first_child(doc, prop) else {
        warnings.emit(MessageKey::NullValue, [doc.element(prop).name.local.as_str()]);
        return Ok(None);
    };
    if !is(doc, ctx, node, Term::Distance) {
        unexpected(doc, warnings, prop, node);
        return Ok(None);
    }

    let element = doc.element(node);
    let uom = element
        .attribute(None, "uom")
        .map(str::trim)
        .filter(|uom| !uom.is_empty())
        .ok_or_else(|| CodecError::MissingUnit(display_name(&element.name)))?;
    let (unit, pointer) = parse_unit(uom).ok_or_else(|| CodecError::UnknownUnit(uom.to_string()))?;
    let value = parse_decimal(element.text()).ok_or_else(|| CodecError::InvalidNumber {
        element: display_name(&element.name),
        value: element.text().to_string(),
    })?;

    let measure = Measure::new(value, unit);
    Ok(Some(if pointer { measure.by_reference() } else { measure }))
}

/// Document identifier of the inline definition of `unit`.
pub(crate) fn definition_id(unit: Unit) -> String {
    let symbol = unit.symbol();
    let usable = symbol.chars().next().is_some_and(char::is_alphabetic)
        && symbol.chars().all(char::is_alphanumeric);
    if usable {
        format!("unit-{}", symbol)
    } else {
        format!("unit-{}", unit.name().replace(' ', "-"))
    }
}

fn gml(local: &str) -> Name {
    Name::new(Namespace::Gml.uri(), local)
}

/// Writes a `gml:UnitDefinition` of `unit` inside `prop`.
pub(crate) fn write_definition(doc: &mut Document, prop: NodeId, unit: Unit, id: &str) {
    let definition = doc.append(prop, gml("UnitDefinition"));
    doc.set_attribute(definition, gml("id"), id);

    let identifier = doc.append(definition, gml("identifier"));
    match unit.epsg_code() {
        Some(code) => {
            doc.set_attribute(identifier, Name::unqualified("codeSpace"), "EPSG");
            doc.set_text(identifier, format!("{}{}", EPSG_URN, code));
        }
        None => {
            doc.set_attribute(identifier, Name::unqualified("codeSpace"), "local");
            doc.set_text(identifier, unit.symbol());
        }
    }
    let name = doc.append(definition, gml("name"));
    doc.set_text(name, unit.name());
    let symbol = doc.append(definition, gml("catalogSymbol"));
    doc.set_text(symbol, unit.symbol());
}

/// Returns `true` if `node` is a `gml:UnitDefinition`.
pub(crate) fn is_definition(doc: &Document, node: NodeId) -> bool {
    doc.element(node)
        .name
        .is(Some(Namespace::Gml.uri()), "UnitDefinition")
}

/// Reads the unit of a `gml:UnitDefinition`, trying its identifier, then
/// its catalog symbol, then its name.
pub(crate) fn read_definition(doc: &Document, node: NodeId) -> Result<Unit> {
    let gml_uri = Namespace::Gml.uri();
    let text_of = |local: &str| {
        doc.children(node)
            .find(|child| doc.element(*child).name.is(Some(gml_uri), local))
            .map(|child| doc.element(child).text())
            .filter(|text| !text.is_empty())
    };
    let identifier = text_of("identifier");
    let symbol = text_of("catalogSymbol");
    let name = text_of("name");

    identifier
        .and_then(parse_unit)
        .map(|(unit, _)| unit)
        .or_else(|| symbol.and_then(Unit::from_symbol))
        .or_else(|| name.and_then(Unit::from_symbol))
        .ok_or_else(|| {
            let designation = identifier.or(symbol).or(name).unwrap_or_default();
            CodecError::UnknownUnit(designation.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Dialect, Direction};
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_unit_forms() {
        assert_eq!(parse_unit("m"), Some((Unit::Metre, false)));
        assert_eq!(parse_unit("metre"), Some((Unit::Metre, false)));
        assert_eq!(parse_unit("EPSG:9001"), Some((Unit::Metre, true)));
        assert_eq!(parse_unit("urn:ogc:def:uom:EPSG::9036"), Some((Unit::Kilometre, true)));
        assert_eq!(
            parse_unit("http://www.opengis.net/def/uom/EPSG/0/9122"),
            Some((Unit::Degree, true))
        );
        assert_eq!(
            parse_unit(
                "http://schemas.opengis.net/iso/19139/20070417/resources/uom/gmxUom.xml#xpointer(//*[@gml:id='m'])"
            ),
            Some((Unit::Metre, true))
        );
        assert_eq!(parse_unit("furlong"), None);
        assert_eq!(parse_unit("EPSG:1"), None);
    }

    #[test]
    fn test_definition_ids() {
        assert_eq!(definition_id(Unit::Metre), "unit-m");
        assert_eq!(definition_id(Unit::Unity), "unit-unity");
        assert_eq!(definition_id(Unit::Percent), "unit-percent");
        assert_eq!(definition_id(Unit::PartsPerMillion), "unit-ppm");
    }

    #[test]
    fn test_designation_falls_back_to_symbol() {
        let ctx = DialectContext::new(Dialect::Current, Direction::Writing);
        assert_eq!(
            designation(&ctx, Unit::Metre, true),
            "http://www.opengis.net/def/uom/EPSG/0/9001"
        );
        assert_eq!(designation(&ctx, Unit::Metre, false), "m");
        assert_eq!(designation(&ctx, Unit::Percent, true), "%");
    }

    #[test]
    fn test_distance_keeps_designation_form() {
        for dialect in [Dialect::Legacy, Dialect::Current] {
            let ctx = DialectContext::new(dialect, Direction::Writing);
            for measure in [
                Measure::new(dec!(10), Unit::Metre),
                Measure::new(dec!(2.5), Unit::Kilometre).by_reference(),
            ] {
                let mut doc = Document::new();
                let prop = doc.create_element(Name::unqualified("distance"));
                doc.set_root(prop);
                write_distance(&mut doc, &ctx, prop, &measure);

                let mut warnings = Warnings::new(None);
                let read = read_distance(&doc, &ctx, prop, &mut warnings).unwrap();
                assert_eq!(read, Some(measure));
            }
        }
    }

    #[test]
    fn test_distance_errors() {
        let ctx = DialectContext::new(Dialect::Current, Direction::Reading);
        let gco = Namespace::Gco.uri();
        let cases = [
            (format!(r#"<d xmlns:gco="{gco}"><gco:Distance>1</gco:Distance></d>"#), "missing"),
            (
                format!(r#"<d xmlns:gco="{gco}"><gco:Distance uom="furlong">1</gco:Distance></d>"#),
                "unknown",
            ),
            (
                format!(r#"<d xmlns:gco="{gco}"><gco:Distance uom="m">far</gco:Distance></d>"#),
                "number",
            ),
        ];
        for (xml, case) in cases {
            let doc = Document::parse(&xml).unwrap();
            let mut warnings = Warnings::new(None);
            let error = read_distance(&doc, &ctx, doc.root().unwrap(), &mut warnings).unwrap_err();
            let matched = match case {
                "missing" => matches!(error, CodecError::MissingUnit(_)),
                "unknown" => matches!(error, CodecError::UnknownUnit(ref uom) if uom == "furlong"),
                _ => matches!(error, CodecError::InvalidNumber { .. }),
            };
            assert!(matched, "{}: {:?}", case, error);
        }
    }

    #[test]
    fn test_definition_round_trip() {
        for unit in [Unit::Metre, Unit::Percent, Unit::Day] {
            let mut doc = Document::new();
            let prop = doc.create_element(Name::unqualified("valueUnit"));
            doc.set_root(prop);
            write_definition(&mut doc, prop, unit, &definition_id(unit));
            let definition = first_child(&doc, prop).unwrap();
            assert!(is_definition(&doc, definition));
            assert_eq!(read_definition(&doc, definition).unwrap(), unit);
        }
    }
}
