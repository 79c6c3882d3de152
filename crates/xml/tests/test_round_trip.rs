mod common;

use common::fixtures::{project_title, sample_metadata};
use common::{DIALECTS, codec, count};
use isomd_metadata::{
    Citation, Constraints, Identifier, InternationalString, Locale, Metadata, Restriction,
};
use isomd_xml::{Dialect, Result};
use std::sync::Arc;

#[test]
fn test_sample_round_trips_in_both_dialects() -> Result<()> {
    let codec = codec();
    let metadata = sample_metadata();
    for dialect in DIALECTS {
        let written = codec.write(&metadata, dialect)?;
        assert!(written.warnings.is_empty(), "{}: {:?}", dialect, written.warnings);

        let read = codec.read::<Metadata>(&written.value)?;
        assert!(read.warnings.is_empty(), "{}: {:?}", dialect, read.warnings);
        assert_eq!(read.value, metadata, "{}", dialect);
    }
    Ok(())
}

#[test]
fn test_shared_value_keeps_identity_after_round_trip() -> Result<()> {
    let codec = codec();
    for dialect in DIALECTS {
        let written = codec.write(&sample_metadata(), dialect)?;
        assert_eq!(count(&written.value, r##"xlink:href="#poc""##), 2, "{}", dialect);

        let metadata = codec.read::<Metadata>(&written.value)?.value;
        let identification = &metadata.identification_info[0];
        let cited = &identification.citation.as_ref().unwrap().cited_responsible_parties[0];
        assert!(Arc::ptr_eq(&metadata.contacts[0], cited));
        assert!(Arc::ptr_eq(&metadata.contacts[0], &identification.points_of_contact[0]));
    }
    Ok(())
}

#[test]
fn test_licence_spelling_follows_dialect() -> Result<()> {
    let codec = codec();
    let mut constraints = Constraints::legal();
    constraints.use_constraints.push(Restriction::Licence);
    let metadata = Metadata {
        metadata_constraints: vec![constraints],
        ..Default::default()
    };

    let legacy = codec.write(&metadata, Dialect::Legacy)?.value;
    assert!(legacy.contains(r#"codeListValue="license">license<"#));
    let current = codec.write(&metadata, Dialect::Current)?.value;
    assert!(current.contains(r#"codeListValue="licence"/>"#));

    for xml in [legacy, current] {
        let read = codec.read::<Metadata>(&xml)?.value;
        assert_eq!(read.metadata_constraints[0].use_constraints, vec![Restriction::Licence]);
    }
    Ok(())
}

#[test]
fn test_free_text_shapes_read_back_equal() -> Result<()> {
    let codec = codec();
    let citation = Citation {
        title: Some(project_title()),
        ..Default::default()
    };

    let legacy = codec.write(&citation, Dialect::Legacy)?.value;
    assert_eq!(count(&legacy, "<gmd:textGroup>"), 1);
    assert_eq!(count(&legacy, "<gmd:LocalisedCharacterString"), 3);
    assert!(legacy.contains(r##"locale="#locale-ita">Progetto OpenSource<"##));

    let current = codec.write(&citation, Dialect::Current)?.value;
    assert_eq!(count(&current, "<lan:textGroup>"), 3);
    assert_eq!(count(&current, "<lan:LocalisedCharacterString"), 3);

    let from_legacy = codec.read::<Citation>(&legacy)?.value;
    let from_current = codec.read::<Citation>(&current)?.value;
    assert_eq!(from_legacy, citation);
    assert_eq!(from_current, citation);
    Ok(())
}

#[test]
fn test_empty_collections_write_no_wrappers() -> Result<()> {
    let codec = codec();
    let metadata = Metadata {
        metadata_identifier: Some(Identifier::new("only-identifier")),
        ..Default::default()
    };
    let current = codec.write(&metadata, Dialect::Current)?.value;
    for absent in ["contact", "dateInfo", "metadataStandard", "identificationInfo", "resourceLineage"] {
        assert!(!current.contains(absent), "{} in {}", absent, current);
    }

    let legacy = codec.write(&metadata, Dialect::Legacy)?.value;
    assert!(legacy.contains("<gmd:fileIdentifier><gco:CharacterString>only-identifier</gco:CharacterString></gmd:fileIdentifier>"));
    assert!(!legacy.contains("dataQualityInfo"));
    Ok(())
}

#[test]
fn test_citation_document_round_trips() -> Result<()> {
    let codec = codec();
    let poc = common::fixtures::point_of_contact();
    let citation = Citation {
        cited_responsible_parties: vec![Arc::clone(&poc), poc],
        ..Citation::titled("Shared parties")
    };
    for dialect in DIALECTS {
        let written = codec.write(&citation, dialect)?;
        assert!(written.value.contains("CI_Citation"));

        let read = codec.read::<Citation>(&written.value)?.value;
        assert_eq!(read, citation);
        let parties = &read.cited_responsible_parties;
        assert!(Arc::ptr_eq(&parties[0], &parties[1]));
    }
    Ok(())
}

#[test]
fn test_free_functions_use_defaults() -> Result<()> {
    let metadata = Metadata {
        language: Some("fra".to_string()),
        ..Default::default()
    };
    let xml = isomd_xml::to_xml_string(&metadata, Dialect::Current)?;
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains('\n'));

    let read: Metadata = isomd_xml::from_xml_str(&xml)?;
    assert_eq!(read, metadata);
    Ok(())
}

#[test]
fn test_empty_localized_strings_survive_round_trip() -> Result<()> {
    let codec = codec();
    let french = Locale::parse("fr").expect("valid locale");
    let titles = [
        InternationalString::new("Carte").with_translation(french.clone(), ""),
        InternationalString::new("").with_translation(french.clone(), "Carte"),
    ];
    for title in titles {
        let citation = Citation {
            title: Some(title),
            ..Default::default()
        };
        for dialect in DIALECTS {
            let xml = codec.write(&citation, dialect)?.value;
            let read = codec.read::<Citation>(&xml)?;
            assert!(read.warnings.is_empty(), "{}: {:?}", dialect, read.warnings);
            assert_eq!(read.value, citation, "{}", dialect);
        }
    }
    Ok(())
}
