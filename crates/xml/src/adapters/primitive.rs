//! Character strings, URLs, booleans, numbers and dates.

use super::{append, display_name, first_child, is, is_nil, unexpected};
use crate::dialect::DialectContext;
use crate::error::{CodecError, Result};
use crate::terms::Term;
use crate::warning::{MessageKey, Warnings};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use isomd_metadata::DateValue;
use isomd_xml_tree::{Document, NodeId};
use rust_decimal::Decimal;
use std::str::FromStr;

fn write_value(doc: &mut Document, ctx: &DialectContext, prop: NodeId, term: Term, text: String) {
    if let Some(node) = append(doc, ctx, prop, term) {
        doc.set_text(node, text);
    }
}

pub(crate) fn write_string(doc: &mut Document, ctx: &DialectContext, prop: NodeId, value: &str) {
    write_value(doc, ctx, prop, Term::CharacterString, value.to_string());
}

/// Writes a URL: `gmd:URL` in ISO 19139, a character string in ISO 19115-3.
pub(crate) fn write_url(doc: &mut Document, ctx: &DialectContext, prop: NodeId, value: &str) {
    let term = match ctx.element_name(Term::Url) {
        Some(_) => Term::Url,
        None => Term::CharacterString,
    };
    write_value(doc, ctx, prop, term, value.to_string());
}

pub(crate) fn write_boolean(doc: &mut Document, ctx: &DialectContext, prop: NodeId, value: bool) {
    write_value(doc, ctx, prop, Term::Boolean, value.to_string());
}

pub(crate) fn write_integer(doc: &mut Document, ctx: &DialectContext, prop: NodeId, value: i64) {
    write_value(doc, ctx, prop, Term::Integer, value.to_string());
}

/// Writes a number as a `gco:Record`, the value type of quantitative results.
pub(crate) fn write_record(doc: &mut Document, ctx: &DialectContext, prop: NodeId, value: Decimal) {
    write_value(doc, ctx, prop, Term::Record, value.to_string());
}

pub(crate) fn write_date(doc: &mut Document, ctx: &DialectContext, prop: NodeId, value: &DateValue) {
    let term = match value {
        DateValue::Date(_) => Term::Date,
        DateValue::DateTime(_) => Term::DateTime,
    };
    write_value(doc, ctx, prop, term, value.to_string());
}

/// The value element of a property, or `None` if the property is empty or
/// nil.
fn value_element(doc: &Document, ctx: &DialectContext, prop: NodeId) -> Option<NodeId> {
    if is_nil(doc, ctx, prop) {
        return None;
    }
    first_child(doc, prop)
}

/// Reads a character string, also accepting anchors and URLs.
pub(crate) fn read_string(
    doc: &Document,
    ctx: &DialectContext,
    prop: NodeId,
    warnings: &mut Warnings<'_>,
) -> Option<String> {
    let node = value_element(doc, ctx, prop)?;
    let accepted = [Term::CharacterString, Term::Anchor, Term::Url];
    if !accepted.iter().any(|term| is(doc, ctx, node, *term)) {
        unexpected(doc, warnings, prop, node);
        return None;
    }
    let text = doc.element(node).text();
    (!text.is_empty()).then(|| text.to_string())
}

/// Text of the value element if it is the element of `term`.
fn typed_text<'d>(
    doc: &'d Document,
    ctx: &DialectContext,
    prop: NodeId,
    terms: &[Term],
    warnings: &mut Warnings<'_>,
) -> Option<(NodeId, &'d str)> {
    let node = value_element(doc, ctx, prop)?;
    if !terms.iter().any(|term| is(doc, ctx, node, *term)) {
        unexpected(doc, warnings, prop, node);
        return None;
    }
    let text = doc.element(node).text();
    (!text.is_empty()).then_some((node, text))
}

fn unparsable(doc: &Document, warnings: &mut Warnings<'_>, node: NodeId, text: &str) {
    warnings.emit(
        MessageKey::UnparsableValue,
        [display_name(&doc.element(node).name), text.to_string()],
    );
}

pub(crate) fn read_boolean(
    doc: &Document,
    ctx: &DialectContext,
    prop: NodeId,
    warnings: &mut Warnings<'_>,
) -> Option<bool> {
    let (node, text) = typed_text(doc, ctx, prop, &[Term::Boolean], warnings)?;
    match text {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        other => {
            unparsable(doc, warnings, node, other);
            None
        }
    }
}

pub(crate) fn read_integer(
    doc: &Document,
    ctx: &DialectContext,
    prop: NodeId,
    warnings: &mut Warnings<'_>,
) -> Option<i64> {
    let (node, text) = typed_text(doc, ctx, prop, &[Term::Integer], warnings)?;
    match text.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            unparsable(doc, warnings, node, text);
            None
        }
    }
}

/// Reads a number from a `gco:Record`, `gco:Decimal` or `gco:Real`.
///
/// A number that does not parse is an error, not a warning, since it would
/// silently change the meaning of the measured values around it.
pub(crate) fn read_number(
    doc: &Document,
    ctx: &DialectContext,
    prop: NodeId,
    warnings: &mut Warnings<'_>,
) -> Result<Option<Decimal>> {
    let Some((node, text)) =
        typed_text(doc, ctx, prop, &[Term::Record, Term::Decimal, Term::Real], warnings)
    else {
        return Ok(None);
    };
    parse_decimal(text)
        .map(Some)
        .ok_or_else(|| CodecError::InvalidNumber {
            element: display_name(&doc.element(node).name),
            value: text.to_string(),
        })
}

/// Parses a decimal number in plain or scientific notation.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

pub(crate) fn read_date(
    doc: &Document,
    ctx: &DialectContext,
    prop: NodeId,
    warnings: &mut Warnings<'_>,
) -> Option<DateValue> {
    let (node, text) = typed_text(doc, ctx, prop, &[Term::Date, Term::DateTime], warnings)?;
    let parsed = parse_date(text);
    if parsed.is_none() {
        unparsable(doc, warnings, node, text);
    }
    parsed
}

/// Parses `2024-05-01`, `2024-05-01T10:00:00`, with optional fraction of
/// second and time zone. Zoned times keep their local wall-clock time.
pub(crate) fn parse_date(text: &str) -> Option<DateValue> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(DateValue::Date(date));
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(DateValue::DateTime(datetime));
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|datetime| DateValue::DateTime(datetime.naive_local()))
}
