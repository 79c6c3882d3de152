//! Dialects, namespaces and the per-call dialect context.
//!
//! A [`DialectContext`] answers every "how is this spelled here" question a
//! codec call has: element names, code list spellings and dictionaries,
//! unit references. It is a plain `Copy` value handed down explicitly, so
//! two calls using different dialects never influence each other.

use crate::terms::{Class, QUALITY_ELEMENTS, Term};
use isomd_metadata::{CodeList, QualityKind, Unit};
use isomd_xml_tree::Name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two XML encodings of the ISO 19115 model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// ISO 19139:2007, the encoding of ISO 19115:2003.
    Legacy,
    /// ISO 19115-3, the encoding of ISO 19115-1:2014 and ISO 19157.
    Current,
}

impl Dialect {
    /// Determines the dialect from the namespace of a document root.
    ///
    /// Returns `None` for namespaces of neither dialect.
    pub fn sniff(namespace: &str) -> Option<Dialect> {
        if namespace == Namespace::Gmd.uri() {
            return Some(Dialect::Legacy);
        }
        const CURRENT_ROOTS: [&str; 2] = [
            "http://standards.iso.org/iso/19115/-3/mdb/",
            "http://standards.iso.org/iso/19115/-3/cit/",
        ];
        CURRENT_ROOTS
            .iter()
            .any(|prefix| namespace.starts_with(prefix))
            .then_some(Dialect::Current)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Legacy => "legacy",
            Dialect::Current => "current",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" | "iso19139" | "19139" => Ok(Dialect::Legacy),
            "current" | "iso19115-3" | "19115-3" => Ok(Dialect::Current),
            other => Err(format!("unknown dialect: {}", other)),
        }
    }
}

/// Whether a context serves a write or a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Reading,
    Writing,
}

/// XML namespaces used by either dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Gmd,
    /// `gco` of ISO 19139.
    LegacyGco,
    Gmx,
    Mdb,
    Cit,
    Mri,
    Mco,
    Mdq,
    Mrl,
    Lan,
    Mcc,
    /// `gco` of ISO 19115-3.
    Gco,
    Gcx,
    Gml,
    Xlink,
    Xsi,
}

impl Namespace {
    pub const ALL: [Namespace; 16] = [
        Namespace::Gmd,
        Namespace::LegacyGco,
        Namespace::Gmx,
        Namespace::Mdb,
        Namespace::Cit,
        Namespace::Mri,
        Namespace::Mco,
        Namespace::Mdq,
        Namespace::Mrl,
        Namespace::Lan,
        Namespace::Mcc,
        Namespace::Gco,
        Namespace::Gcx,
        Namespace::Gml,
        Namespace::Xlink,
        Namespace::Xsi,
    ];

    pub fn uri(self) -> &'static str {
        match self {
            Namespace::Gmd => "http://www.isotc211.org/2005/gmd",
            Namespace::LegacyGco => "http://www.isotc211.org/2005/gco",
            Namespace::Gmx => "http://www.isotc211.org/2005/gmx",
            Namespace::Mdb => "http://standards.iso.org/iso/19115/-3/mdb/2.0",
            Namespace::Cit => "http://standards.iso.org/iso/19115/-3/cit/2.0",
            Namespace::Mri => "http://standards.iso.org/iso/19115/-3/mri/1.0",
            Namespace::Mco => "http://standards.iso.org/iso/19115/-3/mco/1.0",
            Namespace::Mdq => "http://standards.iso.org/iso/19157/-2/mdq/1.0",
            Namespace::Mrl => "http://standards.iso.org/iso/19115/-3/mrl/2.0",
            Namespace::Lan => "http://standards.iso.org/iso/19115/-3/lan/1.0",
            Namespace::Mcc => "http://standards.iso.org/iso/19115/-3/mcc/1.0",
            Namespace::Gco => "http://standards.iso.org/iso/19115/-3/gco/1.0",
            Namespace::Gcx => "http://standards.iso.org/iso/19115/-3/gcx/1.0",
            Namespace::Gml => "http://www.opengis.net/gml/3.2",
            Namespace::Xlink => "http://www.w3.org/1999/xlink",
            Namespace::Xsi => "http://www.w3.org/2001/XMLSchema-instance",
        }
    }

    /// The conventional prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Gmd => "gmd",
            Namespace::LegacyGco | Namespace::Gco => "gco",
            Namespace::Gmx => "gmx",
            Namespace::Mdb => "mdb",
            Namespace::Cit => "cit",
            Namespace::Mri => "mri",
            Namespace::Mco => "mco",
            Namespace::Mdq => "mdq",
            Namespace::Mrl => "mrl",
            Namespace::Lan => "lan",
            Namespace::Mcc => "mcc",
            Namespace::Gcx => "gcx",
            Namespace::Gml => "gml",
            Namespace::Xlink => "xlink",
            Namespace::Xsi => "xsi",
        }
    }

    pub fn from_uri(uri: &str) -> Option<Namespace> {
        Namespace::ALL.into_iter().find(|ns| ns.uri() == uri)
    }
}

/// A namespace-qualified element name known to the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: Namespace,
    pub local: &'static str,
}

impl QName {
    pub const fn new(namespace: Namespace, local: &'static str) -> Self {
        Self { namespace, local }
    }

    /// The tree name for this element.
    pub fn to_name(self) -> Name {
        Name::new(self.namespace.uri(), self.local)
    }

    /// Returns `true` if `name` designates this element.
    pub fn matches(self, name: &Name) -> bool {
        name.is(Some(self.namespace.uri()), self.local)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.prefix(), self.local)
    }
}

/// Code list dictionaries of each dialect.
const LEGACY_CODE_LISTS: &str = "http://standards.iso.org/iso/19139/resources/gmxCodelists.xml";
const CURRENT_CODE_LISTS: &str =
    "http://standards.iso.org/iso/19115/resources/Codelists/cat/codelists.xml";

/// Unit dictionaries of each dialect.
const LEGACY_UNITS: &str =
    "http://schemas.opengis.net/iso/19139/20070417/resources/uom/gmxUom.xml";
const CURRENT_UNITS: &str = "http://www.opengis.net/def/uom/EPSG/0/";

/// Naming and spelling decisions for one codec call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectContext {
    dialect: Dialect,
    direction: Direction,
}

impl DialectContext {
    pub fn new(dialect: Dialect, direction: Direction) -> Self {
        Self { dialect, direction }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_legacy(&self) -> bool {
        self.dialect == Dialect::Legacy
    }

    /// The element naming `term` in this dialect, or `None` if the dialect
    /// has no such element.
    pub fn element_name(&self, term: Term) -> Option<QName> {
        match self.dialect {
            Dialect::Legacy => term.legacy(),
            Dialect::Current => term.current(),
        }
    }

    /// The element of the objects of `class`, when the class has a single one.
    pub fn class_name(&self, class: Class) -> Option<QName> {
        class.element().and_then(|term| self.element_name(term))
    }

    /// The properties of `class` in the order this dialect declares them.
    pub fn property_order(&self, class: Class) -> &'static [Term] {
        class.property_order(self.dialect)
    }

    /// The property of `class` written as `name`, if any.
    pub fn property_of(&self, class: Class, name: &Name) -> Option<Term> {
        self.property_order(class)
            .iter()
            .copied()
            .find(|term| self.element_name(*term).is_some_and(|q| q.matches(name)))
    }

    /// The XML spelling of a code list member.
    pub fn code_spelling<C: CodeList>(&self, code: C) -> &'static str {
        match self.dialect {
            Dialect::Legacy => code.legacy_identifier().unwrap_or_else(|| code.identifier()),
            Dialect::Current => code.identifier(),
        }
    }

    /// Parses a code list spelling of either dialect.
    ///
    /// Spellings are matched exactly first. A reading context then retries
    /// ignoring case, `_` and `-`.
    pub fn parse_code<C: CodeList>(&self, spelling: &str) -> Option<C> {
        let spelling = spelling.trim();
        if let Some(code) = C::from_identifier(spelling) {
            return Some(code);
        }
        if self.direction == Direction::Writing {
            return None;
        }
        let wanted = normalize(spelling);
        C::values().iter().copied().find(|code| {
            normalize(code.identifier()) == wanted
                || code.legacy_identifier().is_some_and(|l| normalize(l) == wanted)
        })
    }

    /// The dictionary entry describing code list `C`.
    pub fn code_list_uri<C: CodeList>(&self) -> String {
        self.code_list_uri_named(C::NAME)
    }

    /// The dictionary entry of the code list called `name`, including open
    /// lists such as `LanguageCode` that have no enumeration.
    pub fn code_list_uri_named(&self, name: &str) -> String {
        let base = match self.dialect {
            Dialect::Legacy => LEGACY_CODE_LISTS,
            Dialect::Current => CURRENT_CODE_LISTS,
        };
        format!("{}#{}", base, name)
    }

    /// The element holding a value of code list `C`.
    pub fn code_element<C: CodeList>(&self) -> QName {
        let namespace = match self.dialect {
            Dialect::Legacy => Namespace::Gmd,
            Dialect::Current => match C::NAME {
                "CI_RoleCode" | "CI_DateTypeCode" | "CI_OnLineFunctionCode" => Namespace::Cit,
                "MD_RestrictionCode" | "MD_ClassificationCode" => Namespace::Mco,
                _ => Namespace::Mcc,
            },
        };
        QName::new(namespace, C::NAME)
    }

    /// The canonical reference of `unit` in this dialect, for units that
    /// have one.
    pub fn unit_reference(&self, unit: Unit) -> Option<String> {
        let code = unit.epsg_code()?;
        Some(match self.dialect {
            Dialect::Legacy => format!("{}#xpointer(//*[@gml:id='{}'])", LEGACY_UNITS, unit.symbol()),
            Dialect::Current => format!("{}{}", CURRENT_UNITS, code),
        })
    }

    /// The `gco` namespace of this dialect.
    pub fn gco(&self) -> Namespace {
        match self.dialect {
            Dialect::Legacy => Namespace::LegacyGco,
            Dialect::Current => Namespace::Gco,
        }
    }

    /// The element of a quality report of the given kind.
    pub fn quality_element(&self, kind: QualityKind) -> QName {
        let (namespace, local) = match self.dialect {
            Dialect::Legacy => (Namespace::Gmd, quality_names(kind).0),
            Dialect::Current => (Namespace::Mdq, quality_names(kind).1),
        };
        QName::new(namespace, local)
    }

    /// The quality report kind written as `name`, if any.
    pub fn quality_kind(&self, name: &Name) -> Option<QualityKind> {
        QualityKind::ALL
            .into_iter()
            .find(|kind| self.quality_element(*kind).matches(name))
    }
}

fn quality_names(kind: QualityKind) -> (&'static str, &'static str) {
    QUALITY_ELEMENTS
        .iter()
        .find(|(k, _, _)| *k == kind)
        .map(|(_, legacy, current)| (*legacy, *current))
        .unwrap_or(("DQ_Element", "DQ_Element"))
}

fn normalize(spelling: &str) -> String {
    spelling
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use isomd_metadata::{Restriction, Role};

    fn legacy() -> DialectContext {
        DialectContext::new(Dialect::Legacy, Direction::Writing)
    }

    fn current() -> DialectContext {
        DialectContext::new(Dialect::Current, Direction::Writing)
    }

    #[test]
    fn test_sniff() {
        assert_eq!(Dialect::sniff("http://www.isotc211.org/2005/gmd"), Some(Dialect::Legacy));
        assert_eq!(
            Dialect::sniff("http://standards.iso.org/iso/19115/-3/mdb/2.0"),
            Some(Dialect::Current)
        );
        assert_eq!(
            Dialect::sniff("http://standards.iso.org/iso/19115/-3/cit/1.0"),
            Some(Dialect::Current)
        );
        assert_eq!(Dialect::sniff("urn:example"), None);
    }

    #[test]
    fn test_licence_spellings() {
        for ctx in [legacy(), current()] {
            assert_eq!(ctx.parse_code::<Restriction>("license"), Some(Restriction::Licence));
            assert_eq!(ctx.parse_code::<Restriction>("licence"), Some(Restriction::Licence));
        }
        assert_eq!(legacy().code_spelling(Restriction::Licence), "license");
        assert_eq!(current().code_spelling(Restriction::Licence), "licence");
        assert_eq!(legacy().code_spelling(Restriction::Copyright), "copyright");
    }

    #[test]
    fn test_lenient_code_parsing() {
        let ctx = DialectContext::new(Dialect::Legacy, Direction::Reading);
        assert_eq!(ctx.direction(), Direction::Reading);
        assert_eq!(ctx.parse_code::<Role>("POINT_OF_CONTACT"), Some(Role::PointOfContact));
        assert_eq!(ctx.parse_code::<Restriction>("inConfidence"), Some(Restriction::InConfidence));
        assert_eq!(ctx.parse_code::<Role>("nobody"), None);
    }

    #[test]
    fn test_writing_context_matches_spellings_exactly() {
        let ctx = legacy();
        assert_eq!(ctx.parse_code::<Role>("pointOfContact"), Some(Role::PointOfContact));
        assert_eq!(ctx.parse_code::<Role>("POINT_OF_CONTACT"), None);
        assert_eq!(ctx.parse_code::<Restriction>("license"), Some(Restriction::Licence));
    }

    #[test]
    fn test_code_list_dictionaries() {
        assert_eq!(
            legacy().code_list_uri::<Role>(),
            "http://standards.iso.org/iso/19139/resources/gmxCodelists.xml#CI_RoleCode"
        );
        assert!(current().code_list_uri::<Role>().ends_with("codelists.xml#CI_RoleCode"));
        assert_eq!(current().code_element::<Restriction>().namespace, Namespace::Mco);
        assert_eq!(legacy().code_element::<Restriction>().namespace, Namespace::Gmd);
    }

    #[test]
    fn test_element_names_differ_per_dialect() {
        assert_eq!(legacy().element_name(Term::DateStamp).map(|q| q.local), Some("dateStamp"));
        assert_eq!(current().element_name(Term::DateStamp), None);
        assert_eq!(
            current().class_name(Class::Responsibility).map(|q| q.to_string()),
            Some("cit:CI_Responsibility".to_string())
        );
        assert_eq!(
            legacy().class_name(Class::Responsibility).map(|q| q.to_string()),
            Some("gmd:CI_ResponsibleParty".to_string())
        );
    }

    #[test]
    fn test_property_order_is_declared_order() {
        let legacy_order = legacy().property_order(Class::DataIdentification);
        let current_order = current().property_order(Class::DataIdentification);
        let position = |order: &[Term], term| order.iter().position(|t| *t == term);
        assert!(
            position(legacy_order, Term::ResourceConstraints)
                < position(legacy_order, Term::SpatialResolution)
        );
        assert!(
            position(current_order, Term::SpatialResolution)
                < position(current_order, Term::ResourceConstraints)
        );
    }

    #[test]
    fn test_unit_reference() {
        assert_eq!(
            current().unit_reference(Unit::Metre).as_deref(),
            Some("http://www.opengis.net/def/uom/EPSG/0/9001")
        );
        assert!(legacy().unit_reference(Unit::Metre).unwrap().contains("@gml:id='m'"));
        assert_eq!(current().unit_reference(Unit::Percent), None);
    }

    #[test]
    fn test_quality_element_names() {
        assert_eq!(
            legacy().quality_element(QualityKind::NonQuantitativeAttributeAccuracy).local,
            "DQ_NonQuantitativeAttributeAccuracy"
        );
        assert_eq!(
            current().quality_element(QualityKind::NonQuantitativeAttributeAccuracy).local,
            "DQ_NonQuantitativeAttributeCorrectness"
        );
        let name = Name::new(Namespace::Mdq.uri(), "DQ_DomainConsistency");
        assert_eq!(current().quality_kind(&name), Some(QualityKind::DomainConsistency));
        assert_eq!(legacy().quality_kind(&name), None);
    }
}
