mod common;

use common::fixtures::{current_document, date, legacy_document};
use common::{DIALECTS, codec};
use isomd_metadata::{Citation, CitationDate, DateType, Metadata, OnlineResource, Restriction};
use isomd_xml::{Dialect, MessageKey, Result, Warning};
use std::sync::Arc;

fn empty_use_constraint(dialect: Dialect) -> String {
    match dialect {
        Dialect::Legacy => legacy_document(
            r#"<gmd:identificationInfo><gmd:MD_DataIdentification>
                 <gmd:resourceConstraints><gmd:MD_LegalConstraints>
                   <gmd:useConstraints>
                     <gmd:MD_RestrictionCode codeList="http://www.isotc211.org/2005/resources/codeList.xml#MD_RestrictionCode" codeListValue=""/>
                   </gmd:useConstraints>
                 </gmd:MD_LegalConstraints></gmd:resourceConstraints>
               </gmd:MD_DataIdentification></gmd:identificationInfo>"#,
        ),
        Dialect::Current => current_document(
            r#"<mdb:identificationInfo><mri:MD_DataIdentification>
                 <mri:resourceConstraints><mco:MD_LegalConstraints>
                   <mco:useConstraints>
                     <mco:MD_RestrictionCode codeList="https://schemas.isotc211.org/19115/resources/Codelists/cat/codelists.xml#MD_RestrictionCode" codeListValue=""/>
                   </mco:useConstraints>
                 </mco:MD_LegalConstraints></mri:resourceConstraints>
               </mri:MD_DataIdentification></mdb:identificationInfo>"#,
        ),
    }
}

#[test]
fn test_empty_code_gives_empty_collection_and_one_warning() -> Result<()> {
    for dialect in DIALECTS {
        let outcome = codec().read::<Metadata>(&empty_use_constraint(dialect))?;
        let constraints = &outcome.value.identification_info[0].resource_constraints[0];
        assert!(constraints.use_constraints.is_empty(), "{}", dialect);

        assert_eq!(outcome.warnings.len(), 1, "{}: {:?}", dialect, outcome.warnings);
        let warning = &outcome.warnings[0];
        assert_eq!(warning.key, MessageKey::NullCollectionElement);
        assert_eq!(warning.key.as_str(), "NullCollectionElement_1");
        assert_eq!(warning.params, vec!["MD_RestrictionCode"]);
    }
    Ok(())
}

#[test]
fn test_listener_receives_each_warning() -> Result<()> {
    let metadata = Metadata {
        date_info: vec![
            CitationDate::new(date(2024, 1, 2), DateType::Creation),
            CitationDate::new(date(2024, 3, 4), DateType::Revision),
        ],
        metadata_standards: vec![
            Arc::new(Citation::titled("First standard")),
            Arc::new(Citation {
                online_resources: vec![Arc::new(OnlineResource::new("https://example.org"))],
                ..Citation::titled("Second standard")
            }),
        ],
        ..Default::default()
    };

    let mut received: Vec<Warning> = Vec::new();
    let mut listener = |w: &Warning| received.push(w.clone());
    let outcome = codec().write_with(&metadata, Dialect::Legacy, &mut listener)?;

    assert_eq!(received, outcome.warnings);
    let truncated: Vec<_> = received
        .iter()
        .filter(|w| w.key == MessageKey::ValueTruncated)
        .map(|w| w.params[1].as_str())
        .collect();
    assert_eq!(truncated, vec!["dateInfo", "metadataStandard"]);
    Ok(())
}

#[test]
fn test_current_dialect_writes_without_loss() -> Result<()> {
    let metadata = Metadata {
        metadata_standards: vec![Arc::new(Citation {
            online_resources: vec![Arc::new(OnlineResource::new("https://example.org"))],
            ..Citation::titled("Standard")
        })],
        ..Default::default()
    };
    let outcome = codec().write(&metadata, Dialect::Current)?;
    assert!(outcome.warnings.is_empty());
    Ok(())
}

#[test]
fn test_unknown_code_value_is_reported() -> Result<()> {
    let xml = current_document(
        r#"<mdb:metadataConstraints><mco:MD_LegalConstraints>
             <mco:accessConstraints><mco:MD_RestrictionCode codeList="x" codeListValue="secretive"/></mco:accessConstraints>
             <mco:accessConstraints><mco:MD_RestrictionCode codeList="x" codeListValue="license"/></mco:accessConstraints>
           </mco:MD_LegalConstraints></mdb:metadataConstraints>"#,
    );
    let outcome = codec().read::<Metadata>(&xml)?;
    assert_eq!(
        outcome.value.metadata_constraints[0].access_constraints,
        vec![Restriction::Licence]
    );
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].key, MessageKey::UnknownCodeValue);
    assert_eq!(
        outcome.warnings[0].message(),
        "\"secretive\" is not a value of MD_RestrictionCode."
    );
    Ok(())
}

#[test]
fn test_unparsable_boolean_is_dropped_with_warning() -> Result<()> {
    let xml = legacy_document(
        r#"<gmd:dataQualityInfo><gmd:DQ_DataQuality>
             <gmd:report><gmd:DQ_DomainConsistency>
               <gmd:result><gmd:DQ_ConformanceResult>
                 <gmd:explanation><gco:CharacterString>Checked</gco:CharacterString></gmd:explanation>
                 <gmd:pass><gco:Boolean>maybe</gco:Boolean></gmd:pass>
               </gmd:DQ_ConformanceResult></gmd:result>
             </gmd:DQ_DomainConsistency></gmd:report>
           </gmd:DQ_DataQuality></gmd:dataQualityInfo>"#,
    );
    let outcome = codec().read::<Metadata>(&xml)?;
    let result = &outcome.value.data_quality_info[0].reports[0].results[0];
    assert!(matches!(
        result,
        isomd_metadata::QualityResult::Conformance { pass: None, explanation: Some(_), .. }
    ));
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].key, MessageKey::UnparsableValue);
    assert_eq!(outcome.warnings[0].params, vec!["gco:Boolean", "maybe"]);
    Ok(())
}
