mod common;

use common::fixtures::{current_document, legacy_document, metadata_with_units};
use common::{DIALECTS, codec, count};
use isomd_metadata::{CitationRegistry, Metadata, Resolution, Unit};
use isomd_xml::{Codec, CodecConfig, CodecError, Dialect, Namespace, Result};

#[test]
fn test_units_with_code_are_written_as_pointers() -> Result<()> {
    let metadata = metadata_with_units(&[Unit::Metre, Unit::Percent, Unit::Percent]);
    let xml = codec().write(&metadata, Dialect::Current)?.value;

    assert!(xml.contains(r#"<mdq:valueUnit xlink:href="http://www.opengis.net/def/uom/EPSG/0/9001"/>"#));
    assert_eq!(count(&xml, "<gml:UnitDefinition"), 1);
    assert!(xml.contains(r#"<gml:UnitDefinition gml:id="unit-percent">"#));
    assert!(xml.contains(r##"<mdq:valueUnit xlink:href="#unit-percent"/>"##));
    Ok(())
}

#[test]
fn test_legacy_pointer_uses_unit_dictionary() -> Result<()> {
    let document = codec()
        .write_document(&metadata_with_units(&[Unit::Metre]), Dialect::Legacy, None)?
        .value;
    let root = document.root().expect("root element");
    let hrefs: Vec<_> = document
        .descendants(root)
        .map(|node| document.element(node))
        .filter(|element| element.name.is(Some(Namespace::Gmd.uri()), "valueUnit"))
        .filter_map(|element| element.attribute(Some(Namespace::Xlink.uri()), "href"))
        .collect();
    assert_eq!(hrefs.len(), 1);
    assert!(hrefs[0].ends_with("gmxUom.xml#xpointer(//*[@gml:id='m'])"), "{}", hrefs[0]);

    let xml = codec().write(&metadata_with_units(&[Unit::Metre]), Dialect::Legacy)?.value;
    assert!(!xml.contains("UnitDefinition"));
    let read = codec().read::<Metadata>(&xml)?.value;
    assert_eq!(read, metadata_with_units(&[Unit::Metre]));
    Ok(())
}

#[test]
fn test_definitions_when_pointers_disabled() -> Result<()> {
    let codec = Codec::new(CodecConfig {
        prefer_unit_pointers: false,
        ..CodecConfig::for_testing()
    })?;
    let metadata = metadata_with_units(&[Unit::Metre, Unit::Day, Unit::Metre]);
    let xml = codec.write(&metadata, Dialect::Current)?.value;

    assert!(xml.contains(r#"<gml:UnitDefinition gml:id="unit-m">"#));
    assert!(xml.contains(r#"<gml:UnitDefinition gml:id="unit-d">"#));
    assert!(xml.contains(r#"codeSpace="EPSG">urn:ogc:def:uom:EPSG::9001<"#));
    assert_eq!(count(&xml, r##"xlink:href="#unit-m""##), 1);
    Ok(())
}

#[test]
fn test_units_read_back_in_both_forms() -> Result<()> {
    let units = [Unit::Metre, Unit::Percent, Unit::Degree, Unit::Percent, Unit::Day];
    let metadata = metadata_with_units(&units);
    for prefer_unit_pointers in [true, false] {
        let codec = Codec::new(CodecConfig {
            prefer_unit_pointers,
            ..CodecConfig::for_testing()
        })?;
        for dialect in DIALECTS {
            let xml = codec.write(&metadata, dialect)?.value;
            let read = codec.read::<Metadata>(&xml)?;
            assert!(read.warnings.is_empty(), "{}: {:?}", dialect, read.warnings);
            assert_eq!(read.value, metadata, "{} pointers={}", dialect, prefer_unit_pointers);
        }
    }
    Ok(())
}

#[test]
fn test_distance_designations() -> Result<()> {
    let xml = current_document(
        r#"<mdb:identificationInfo><mri:MD_DataIdentification>
             <mri:spatialResolution><mri:MD_Resolution>
               <mri:distance><gco:Distance uom="urn:ogc:def:uom:EPSG::9036">2.5</gco:Distance></mri:distance>
             </mri:MD_Resolution></mri:spatialResolution>
             <mri:spatialResolution><mri:MD_Resolution>
               <mri:distance><gco:Distance uom="metres">30</gco:Distance></mri:distance>
             </mri:MD_Resolution></mri:spatialResolution>
           </mri:MD_DataIdentification></mdb:identificationInfo>"#,
    );
    let metadata = codec().read::<Metadata>(&xml)?.value;
    let units: Vec<_> = metadata.identification_info[0]
        .spatial_resolutions
        .iter()
        .map(|resolution| match resolution {
            Resolution::Distance(measure) => (measure.unit, measure.prefer_pointer()),
            other => panic!("unexpected resolution {:?}", other),
        })
        .collect();
    assert_eq!(units, vec![(Unit::Kilometre, true), (Unit::Metre, false)]);
    Ok(())
}

#[test]
fn test_pointer_to_unit_without_code_reads_as_symbol() -> Result<()> {
    let xml = legacy_document(
        r#"<gmd:identificationInfo><gmd:MD_DataIdentification>
             <gmd:spatialResolution><gmd:MD_Resolution>
               <gmd:distance><gco:Distance uom="http://www.isotc211.org/2005/resources/uom/gmxUom.xml#xpointer(//*[@gml:id='%'])">12</gco:Distance></gmd:distance>
             </gmd:MD_Resolution></gmd:spatialResolution>
           </gmd:MD_DataIdentification></gmd:identificationInfo>"#,
    );
    let codec = codec();
    let metadata = codec.read::<Metadata>(&xml)?.value;
    let Resolution::Distance(measure) = &metadata.identification_info[0].spatial_resolutions[0] else {
        panic!("expected a distance");
    };
    assert_eq!((measure.unit, measure.prefer_pointer()), (Unit::Percent, false));

    for dialect in DIALECTS {
        let written = codec.write(&metadata, dialect)?.value;
        assert!(!written.contains("xpointer"), "{}", dialect);
        assert_eq!(codec.read::<Metadata>(&written)?.value, metadata, "{}", dialect);
    }
    Ok(())
}

#[test]
fn test_failures_are_accumulated() {
    let xml = current_document(
        r##"<mdb:contact xlink:href="#gone"/>
            <mdb:identificationInfo><mri:MD_DataIdentification>
              <mri:spatialResolution><mri:MD_Resolution>
                <mri:distance><gco:Distance uom="furlong">3</gco:Distance></mri:distance>
              </mri:MD_Resolution></mri:spatialResolution>
              <mri:spatialResolution><mri:MD_Resolution>
                <mri:distance><gco:Distance>7</gco:Distance></mri:distance>
              </mri:MD_Resolution></mri:spatialResolution>
            </mri:MD_DataIdentification></mdb:identificationInfo>"##,
    );
    let error = codec().read::<Metadata>(&xml).unwrap_err();
    let CodecError::Multiple(errors) = &error else {
        panic!("expected several failures, got {}", error);
    };
    assert_eq!(errors.len(), 3);
    assert!(matches!(&errors[0], CodecError::UnknownUnit(uom) if uom == "furlong"));
    assert!(matches!(&errors[1], CodecError::MissingUnit(element) if element == "gco:Distance"));
    assert!(matches!(&errors[2], CodecError::UnresolvedReference { ids } if ids == &["gone"]));
    assert!(error.to_string().starts_with("3 errors: "));
}

#[test]
fn test_registry_unit_authority() {
    let registry = CitationRegistry::global();
    let authority = registry.lookup("IOGP").expect("registered authority");
    assert_eq!(
        authority.title_text(),
        Some("International Association of Oil & Gas Producers")
    );
    let superseded = registry.lookup("OGP").expect("superseded key");
    assert!(std::sync::Arc::ptr_eq(&authority, &superseded));
}
