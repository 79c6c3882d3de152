//! Test data fixtures.

use chrono::NaiveDate;
use isomd_metadata::{
    Citation, CitationDate, CitationRegistry, Constraints, Contact, DataIdentification, DataQuality,
    DateType, DateValue, Identifier, InternationalString, Lineage, Locale, Measure, Metadata, Party,
    QualityElement, QualityKind, QualityResult, Resolution, Responsibility, Restriction, Role,
    ScopeCode, Unit,
};
use isomd_xml::Namespace;
use rust_decimal_macros::dec;
use std::sync::Arc;

pub fn date(year: i32, month: u32, day: u32) -> DateValue {
    DateValue::Date(NaiveDate::from_ymd_opt(year, month, day).expect("valid date"))
}

/// "OpenSource Project" in English, Italian and French.
pub fn project_title() -> InternationalString {
    let locale = |tag: &str| Locale::parse(tag).expect("known locale");
    InternationalString::new("OpenSource Project")
        .with_translation(locale("en"), "OpenSource Project")
        .with_translation(locale("it"), "Progetto OpenSource")
        .with_translation(locale("fr"), "Projet OpenSource")
}

/// The point of contact shared by every fixture property that has one.
pub fn point_of_contact() -> Arc<Responsibility> {
    let mut agency = Party::organisation("Geo Agency");
    agency.contact_info.push(Contact {
        electronic_mail_addresses: vec!["info@geo.example".to_string()],
        ..Default::default()
    });
    Arc::new(Responsibility {
        id: Some("poc".to_string()),
        ..Responsibility::new(Role::PointOfContact, agency)
    })
}

/// A record both dialects hold without loss.
pub fn sample_metadata() -> Metadata {
    let poc = point_of_contact();

    let mut licence = Constraints::legal();
    licence.use_constraints.push(Restriction::Licence);
    licence.other_constraints.push("CC-BY 4.0".into());

    let citation = Citation {
        title: Some(project_title()),
        dates: vec![CitationDate::new(date(2024, 1, 15), DateType::Publication)],
        cited_responsible_parties: vec![Arc::clone(&poc)],
        ..Default::default()
    };

    let mut accuracy = QualityElement::new(QualityKind::AbsoluteExternalPositionalAccuracy);
    accuracy.names_of_measure.push("RMSE".into());
    accuracy.results.push(QualityResult::Quantitative {
        value_unit: Some(Unit::Metre),
        values: vec![dec!(0.5)],
    });

    Metadata {
        metadata_identifier: Some(Identifier::new("md-001")),
        language: Some("eng".to_string()),
        contacts: vec![Arc::clone(&poc)],
        date_info: vec![CitationDate::new(date(2024, 5, 1), DateType::Creation)],
        metadata_standards: CitationRegistry::global().lookup("ISO 19115-1").into_iter().collect(),
        identification_info: vec![DataIdentification {
            citation: Some(Arc::new(citation)),
            abstract_text: Some("Open data of the project.".into()),
            points_of_contact: vec![poc],
            spatial_resolutions: vec![
                Resolution::EquivalentScale(25_000),
                Resolution::Distance(Measure::new(dec!(10), Unit::Metre)),
            ],
            resource_constraints: vec![licence],
        }],
        data_quality_info: vec![DataQuality {
            scope: Some(ScopeCode::Dataset),
            reports: vec![accuracy],
        }],
        resource_lineages: vec![Lineage::with_statement("Digitised from 1:25000 maps.")],
        ..Default::default()
    }
}

/// A record with one quality report per unit, in order.
pub fn metadata_with_units(units: &[Unit]) -> Metadata {
    let reports = units
        .iter()
        .map(|unit| {
            let mut element = QualityElement::new(QualityKind::QuantitativeAttributeAccuracy);
            element.results.push(QualityResult::Quantitative {
                value_unit: Some(*unit),
                values: vec![dec!(1.5)],
            });
            element
        })
        .collect();
    Metadata {
        data_quality_info: vec![DataQuality {
            scope: Some(ScopeCode::Dataset),
            reports,
        }],
        ..Default::default()
    }
}

/// An ISO 19115-3 record with `body` as content of the root element.
pub fn current_document(body: &str) -> String {
    let namespaces = [
        Namespace::Mdb,
        Namespace::Cit,
        Namespace::Mri,
        Namespace::Mco,
        Namespace::Mdq,
        Namespace::Mcc,
        Namespace::Gco,
        Namespace::Gml,
        Namespace::Xlink,
    ];
    document("mdb", &namespaces, body)
}

/// An ISO 19139 record with `body` as content of the root element.
pub fn legacy_document(body: &str) -> String {
    let namespaces = [
        Namespace::Gmd,
        Namespace::LegacyGco,
        Namespace::Gml,
        Namespace::Xlink,
    ];
    document("gmd", &namespaces, body)
}

fn document(prefix: &str, namespaces: &[Namespace], body: &str) -> String {
    let declarations: String = namespaces
        .iter()
        .map(|ns| format!(r#" xmlns:{}="{}""#, ns.prefix(), ns.uri()))
        .collect();
    format!(
        "<{prefix}:MD_Metadata{declarations}>{body}</{prefix}:MD_Metadata>",
        prefix = prefix,
        declarations = declarations,
        body = body
    )
}
