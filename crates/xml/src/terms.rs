//! The table of logical terms and their element names in each dialect.
//!
//! A [`Term`] names one element role of the model: an object class such as
//! `CI_Citation`, a property of a class such as the citation title, or a
//! value type such as `gco:CharacterString`. Property terms are scoped to
//! the class that declares them. A `-` marks an element the dialect does
//! not have.

use crate::dialect::{Dialect, Namespace, QName};
use isomd_metadata::QualityKind;

macro_rules! terms {
    (@name -) => { None };
    (@name ($ns:ident, $local:literal)) => { Some(QName::new(Namespace::$ns, $local)) };
    (
        $( $(#[$meta:meta])* $term:ident => $legacy:tt, $current:tt; )*
    ) => {
        /// Element roles of the model, see the [module documentation](self).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Term {
            $( $(#[$meta])* $term, )*
        }

        impl Term {
            /// The element name in ISO 19139.
            pub fn legacy(self) -> Option<QName> {
                match self {
                    $( Term::$term => terms!(@name $legacy), )*
                }
            }

            /// The element name in ISO 19115-3.
            pub fn current(self) -> Option<QName> {
                match self {
                    $( Term::$term => terms!(@name $current), )*
                }
            }
        }
    };
}

terms! {
    // Object classes
    MdMetadata => (Gmd, "MD_Metadata"), (Mdb, "MD_Metadata");
    PtLocale => -, (Lan, "PT_Locale");
    MdIdentifier => (Gmd, "MD_Identifier"), (Mcc, "MD_Identifier");
    /// The identifier variant carrying a code space and version.
    RsIdentifier => (Gmd, "RS_Identifier"), -;
    CiCitation => (Gmd, "CI_Citation"), (Cit, "CI_Citation");
    CiDate => (Gmd, "CI_Date"), (Cit, "CI_Date");
    CiResponsibility => (Gmd, "CI_ResponsibleParty"), (Cit, "CI_Responsibility");
    CiIndividual => -, (Cit, "CI_Individual");
    CiOrganisation => -, (Cit, "CI_Organisation");
    CiContact => (Gmd, "CI_Contact"), (Cit, "CI_Contact");
    CiAddress => (Gmd, "CI_Address"), (Cit, "CI_Address");
    CiOnlineResource => (Gmd, "CI_OnlineResource"), (Cit, "CI_OnlineResource");
    MdDataIdentification => (Gmd, "MD_DataIdentification"), (Mri, "MD_DataIdentification");
    MdResolution => (Gmd, "MD_Resolution"), (Mri, "MD_Resolution");
    MdRepresentativeFraction => (Gmd, "MD_RepresentativeFraction"), (Mri, "MD_RepresentativeFraction");
    MdConstraints => (Gmd, "MD_Constraints"), (Mco, "MD_Constraints");
    MdLegalConstraints => (Gmd, "MD_LegalConstraints"), (Mco, "MD_LegalConstraints");
    MdSecurityConstraints => (Gmd, "MD_SecurityConstraints"), (Mco, "MD_SecurityConstraints");
    DqDataQuality => (Gmd, "DQ_DataQuality"), (Mdq, "DQ_DataQuality");
    DqScope => (Gmd, "DQ_Scope"), (Mcc, "MD_Scope");
    DqMeasureReference => -, (Mdq, "DQ_MeasureReference");
    DqConformanceResult => (Gmd, "DQ_ConformanceResult"), (Mdq, "DQ_ConformanceResult");
    DqQuantitativeResult => (Gmd, "DQ_QuantitativeResult"), (Mdq, "DQ_QuantitativeResult");
    LiLineage => (Gmd, "LI_Lineage"), (Mrl, "LI_Lineage");
    LiProcessStep => (Gmd, "LI_ProcessStep"), (Mrl, "LI_ProcessStep");
    LiSource => (Gmd, "LI_Source"), (Mrl, "LI_Source");

    // Value types
    CharacterString => (LegacyGco, "CharacterString"), (Gco, "CharacterString");
    Anchor => (Gmx, "Anchor"), (Gcx, "Anchor");
    FreeText => (Gmd, "PT_FreeText"), (Lan, "PT_FreeText");
    TextGroup => (Gmd, "textGroup"), (Lan, "textGroup");
    LocalisedCharacterString => (Gmd, "LocalisedCharacterString"), (Lan, "LocalisedCharacterString");
    Boolean => (LegacyGco, "Boolean"), (Gco, "Boolean");
    Integer => (LegacyGco, "Integer"), (Gco, "Integer");
    Decimal => (LegacyGco, "Decimal"), (Gco, "Decimal");
    Real => (LegacyGco, "Real"), (Gco, "Real");
    Record => (LegacyGco, "Record"), (Gco, "Record");
    Date => (LegacyGco, "Date"), (Gco, "Date");
    DateTime => (LegacyGco, "DateTime"), (Gco, "DateTime");
    Url => (Gmd, "URL"), -;
    Distance => (LegacyGco, "Distance"), (Gco, "Distance");
    LanguageCode => (Gmd, "LanguageCode"), (Lan, "LanguageCode");
    CharacterSetCode => (Gmd, "MD_CharacterSetCode"), (Lan, "MD_CharacterSetCode");

    // MD_Metadata
    FileIdentifier => (Gmd, "fileIdentifier"), -;
    MetadataIdentifier => -, (Mdb, "metadataIdentifier");
    Language => (Gmd, "language"), -;
    DefaultLocale => -, (Mdb, "defaultLocale");
    MetadataContact => (Gmd, "contact"), (Mdb, "contact");
    DateStamp => (Gmd, "dateStamp"), -;
    DateInfo => -, (Mdb, "dateInfo");
    MetadataStandardName => (Gmd, "metadataStandardName"), -;
    MetadataStandardVersion => (Gmd, "metadataStandardVersion"), -;
    MetadataStandard => -, (Mdb, "metadataStandard");
    IdentificationInfo => (Gmd, "identificationInfo"), (Mdb, "identificationInfo");
    DataQualityInfo => (Gmd, "dataQualityInfo"), (Mdb, "dataQualityInfo");
    ResourceLineage => -, (Mdb, "resourceLineage");
    MetadataConstraints => (Gmd, "metadataConstraints"), (Mdb, "metadataConstraints");

    // PT_Locale
    LocaleLanguage => -, (Lan, "language");
    CharacterEncoding => -, (Lan, "characterEncoding");

    // MD_Identifier
    Authority => (Gmd, "authority"), (Mcc, "authority");
    Code => (Gmd, "code"), (Mcc, "code");
    CodeSpace => (Gmd, "codeSpace"), (Mcc, "codeSpace");
    Version => (Gmd, "version"), (Mcc, "version");
    IdentifierDescription => -, (Mcc, "description");

    // CI_Citation
    Title => (Gmd, "title"), (Cit, "title");
    AlternateTitle => (Gmd, "alternateTitle"), (Cit, "alternateTitle");
    CitationDate => (Gmd, "date"), (Cit, "date");
    Edition => (Gmd, "edition"), (Cit, "edition");
    CitationIdentifier => (Gmd, "identifier"), (Cit, "identifier");
    CitedResponsibleParty => (Gmd, "citedResponsibleParty"), (Cit, "citedResponsibleParty");
    OtherCitationDetails => (Gmd, "otherCitationDetails"), (Cit, "otherCitationDetails");
    CitationOnlineResource => -, (Cit, "onlineResource");

    // CI_Date
    DateValue => (Gmd, "date"), (Cit, "date");
    DateType => (Gmd, "dateType"), (Cit, "dateType");

    // CI_ResponsibleParty, CI_Responsibility and parties
    IndividualName => (Gmd, "individualName"), -;
    OrganisationName => (Gmd, "organisationName"), -;
    PositionName => (Gmd, "positionName"), (Cit, "positionName");
    ContactInfo => (Gmd, "contactInfo"), (Cit, "contactInfo");
    Role => (Gmd, "role"), (Cit, "role");
    Party => -, (Cit, "party");
    PartyName => -, (Cit, "name");
    PartyIndividual => -, (Cit, "individual");

    // CI_Contact and CI_Address
    Address => (Gmd, "address"), (Cit, "address");
    ContactOnlineResource => (Gmd, "onlineResource"), (Cit, "onlineResource");
    ContactInstructions => (Gmd, "contactInstructions"), (Cit, "contactInstructions");
    ElectronicMailAddress => (Gmd, "electronicMailAddress"), (Cit, "electronicMailAddress");

    // CI_OnlineResource
    Linkage => (Gmd, "linkage"), (Cit, "linkage");
    Protocol => (Gmd, "protocol"), (Cit, "protocol");
    ResourceName => (Gmd, "name"), (Cit, "name");
    ResourceDescription => (Gmd, "description"), (Cit, "description");
    Function => (Gmd, "function"), (Cit, "function");

    // MD_DataIdentification and MD_Resolution
    IdentificationCitation => (Gmd, "citation"), (Mri, "citation");
    Abstract => (Gmd, "abstract"), (Mri, "abstract");
    PointOfContact => (Gmd, "pointOfContact"), (Mri, "pointOfContact");
    SpatialResolution => (Gmd, "spatialResolution"), (Mri, "spatialResolution");
    ResourceConstraints => (Gmd, "resourceConstraints"), (Mri, "resourceConstraints");
    EquivalentScale => (Gmd, "equivalentScale"), (Mri, "equivalentScale");
    ResolutionDistance => (Gmd, "distance"), (Mri, "distance");
    Denominator => (Gmd, "denominator"), (Mri, "denominator");

    // MD_Constraints and subclasses
    UseLimitation => (Gmd, "useLimitation"), (Mco, "useLimitation");
    ConstraintReference => -, (Mco, "reference");
    AccessConstraints => (Gmd, "accessConstraints"), (Mco, "accessConstraints");
    UseConstraints => (Gmd, "useConstraints"), (Mco, "useConstraints");
    OtherConstraints => (Gmd, "otherConstraints"), (Mco, "otherConstraints");
    Classification => (Gmd, "classification"), (Mco, "classification");

    // DQ_DataQuality and quality elements
    QualityScope => (Gmd, "scope"), (Mdq, "scope");
    ScopeLevel => (Gmd, "level"), (Mcc, "level");
    Report => (Gmd, "report"), (Mdq, "report");
    QualityLineage => (Gmd, "lineage"), -;
    Measure => -, (Mdq, "measure");
    NameOfMeasure => (Gmd, "nameOfMeasure"), (Mdq, "nameOfMeasure");
    MeasureIdentification => (Gmd, "measureIdentification"), (Mdq, "measureIdentification");
    MeasureDescription => (Gmd, "measureDescription"), (Mdq, "measureDescription");
    QualityResult => (Gmd, "result"), (Mdq, "result");
    Specification => (Gmd, "specification"), (Mdq, "specification");
    Explanation => (Gmd, "explanation"), (Mdq, "explanation");
    Pass => (Gmd, "pass"), (Mdq, "pass");
    ValueUnit => (Gmd, "valueUnit"), (Mdq, "valueUnit");
    ResultValue => (Gmd, "value"), (Mdq, "value");

    // LI_Lineage, LI_ProcessStep and LI_Source
    Statement => (Gmd, "statement"), (Mrl, "statement");
    ProcessStep => (Gmd, "processStep"), (Mrl, "processStep");
    Source => (Gmd, "source"), (Mrl, "source");
    StepDescription => (Gmd, "description"), (Mrl, "description");
}

impl Term {
    /// The local element name in whichever dialect has one.
    pub fn label(self) -> &'static str {
        self.current()
            .or_else(|| self.legacy())
            .map(|name| name.local)
            .unwrap_or("?")
    }
}

/// The model classes the codec knows how to write and read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Metadata,
    Locale,
    Identifier,
    Citation,
    CitationDate,
    Responsibility,
    Individual,
    Organisation,
    Contact,
    Address,
    OnlineResource,
    DataIdentification,
    Resolution,
    RepresentativeFraction,
    Constraints,
    DataQuality,
    Scope,
    QualityElement,
    MeasureReference,
    ConformanceResult,
    QuantitativeResult,
    Lineage,
    ProcessStep,
    Source,
}

impl Class {
    /// ISO name of the class.
    pub fn name(self) -> &'static str {
        match self {
            Class::Metadata => "MD_Metadata",
            Class::Locale => "PT_Locale",
            Class::Identifier => "MD_Identifier",
            Class::Citation => "CI_Citation",
            Class::CitationDate => "CI_Date",
            Class::Responsibility => "CI_Responsibility",
            Class::Individual => "CI_Individual",
            Class::Organisation => "CI_Organisation",
            Class::Contact => "CI_Contact",
            Class::Address => "CI_Address",
            Class::OnlineResource => "CI_OnlineResource",
            Class::DataIdentification => "MD_DataIdentification",
            Class::Resolution => "MD_Resolution",
            Class::RepresentativeFraction => "MD_RepresentativeFraction",
            Class::Constraints => "MD_Constraints",
            Class::DataQuality => "DQ_DataQuality",
            Class::Scope => "DQ_Scope",
            Class::QualityElement => "DQ_Element",
            Class::MeasureReference => "DQ_MeasureReference",
            Class::ConformanceResult => "DQ_ConformanceResult",
            Class::QuantitativeResult => "DQ_QuantitativeResult",
            Class::Lineage => "LI_Lineage",
            Class::ProcessStep => "LI_ProcessStep",
            Class::Source => "LI_Source",
        }
    }

    /// The element term of the class. Constraints and quality elements
    /// have one element per subclass and return `None`.
    pub fn element(self) -> Option<Term> {
        Some(match self {
            Class::Metadata => Term::MdMetadata,
            Class::Locale => Term::PtLocale,
            Class::Identifier => Term::MdIdentifier,
            Class::Citation => Term::CiCitation,
            Class::CitationDate => Term::CiDate,
            Class::Responsibility => Term::CiResponsibility,
            Class::Individual => Term::CiIndividual,
            Class::Organisation => Term::CiOrganisation,
            Class::Contact => Term::CiContact,
            Class::Address => Term::CiAddress,
            Class::OnlineResource => Term::CiOnlineResource,
            Class::DataIdentification => Term::MdDataIdentification,
            Class::Resolution => Term::MdResolution,
            Class::RepresentativeFraction => Term::MdRepresentativeFraction,
            Class::DataQuality => Term::DqDataQuality,
            Class::Scope => Term::DqScope,
            Class::MeasureReference => Term::DqMeasureReference,
            Class::ConformanceResult => Term::DqConformanceResult,
            Class::QuantitativeResult => Term::DqQuantitativeResult,
            Class::Lineage => Term::LiLineage,
            Class::ProcessStep => Term::LiProcessStep,
            Class::Source => Term::LiSource,
            Class::Constraints | Class::QualityElement => return None,
        })
    }

    /// Properties of the class in the order the dialect's schema declares
    /// them.
    pub fn property_order(self, dialect: Dialect) -> &'static [Term] {
        use Term::*;
        let legacy = dialect == Dialect::Legacy;
        match self {
            Class::Metadata if legacy => &[
                FileIdentifier,
                Language,
                MetadataContact,
                DateStamp,
                MetadataStandardName,
                MetadataStandardVersion,
                IdentificationInfo,
                DataQualityInfo,
                MetadataConstraints,
            ],
            Class::Metadata => &[
                MetadataIdentifier,
                DefaultLocale,
                MetadataContact,
                DateInfo,
                MetadataStandard,
                IdentificationInfo,
                DataQualityInfo,
                ResourceLineage,
                MetadataConstraints,
            ],
            Class::Locale if legacy => &[],
            Class::Locale => &[LocaleLanguage, CharacterEncoding],
            Class::Identifier if legacy => &[Authority, Code, CodeSpace, Version],
            Class::Identifier => &[Authority, Code, CodeSpace, Version, IdentifierDescription],
            Class::Citation if legacy => &[
                Title,
                AlternateTitle,
                CitationDate,
                Edition,
                CitationIdentifier,
                CitedResponsibleParty,
                OtherCitationDetails,
            ],
            Class::Citation => &[
                Title,
                AlternateTitle,
                CitationDate,
                Edition,
                CitationIdentifier,
                CitedResponsibleParty,
                OtherCitationDetails,
                CitationOnlineResource,
            ],
            Class::CitationDate => &[DateValue, DateType],
            Class::Responsibility if legacy => &[
                IndividualName,
                OrganisationName,
                PositionName,
                ContactInfo,
                Role,
            ],
            Class::Responsibility => &[Role, Party],
            Class::Individual | Class::Organisation if legacy => &[],
            Class::Individual => &[PartyName, ContactInfo, PositionName],
            Class::Organisation => &[PartyName, ContactInfo, PartyIndividual],
            Class::Contact => &[Address, ContactOnlineResource, ContactInstructions],
            Class::Address => &[ElectronicMailAddress],
            Class::OnlineResource => &[Linkage, Protocol, ResourceName, ResourceDescription, Function],
            Class::DataIdentification if legacy => &[
                IdentificationCitation,
                Abstract,
                PointOfContact,
                ResourceConstraints,
                SpatialResolution,
            ],
            Class::DataIdentification => &[
                IdentificationCitation,
                Abstract,
                PointOfContact,
                SpatialResolution,
                ResourceConstraints,
            ],
            Class::Resolution => &[EquivalentScale, ResolutionDistance],
            Class::RepresentativeFraction => &[Denominator],
            Class::Constraints if legacy => &[
                UseLimitation,
                AccessConstraints,
                UseConstraints,
                OtherConstraints,
                Classification,
            ],
            Class::Constraints => &[
                UseLimitation,
                ConstraintReference,
                AccessConstraints,
                UseConstraints,
                OtherConstraints,
                Classification,
            ],
            Class::DataQuality if legacy => &[QualityScope, Report, QualityLineage],
            Class::DataQuality => &[QualityScope, Report],
            Class::Scope => &[ScopeLevel],
            Class::QualityElement if legacy => &[
                NameOfMeasure,
                MeasureIdentification,
                MeasureDescription,
                QualityResult,
            ],
            Class::QualityElement => &[Measure, QualityResult],
            Class::MeasureReference if legacy => &[],
            Class::MeasureReference => &[MeasureIdentification, NameOfMeasure, MeasureDescription],
            Class::ConformanceResult => &[Specification, Explanation, Pass],
            Class::QuantitativeResult if legacy => &[ValueUnit, ResultValue],
            Class::QuantitativeResult => &[ResultValue, ValueUnit],
            Class::Lineage if legacy => &[Statement, ProcessStep, Source],
            Class::Lineage => &[Statement, Source, ProcessStep],
            Class::ProcessStep | Class::Source => &[StepDescription],
        }
    }
}

/// Element names of the quality report kinds: `(kind, ISO 19139, ISO 19115-3)`.
pub const QUALITY_ELEMENTS: [(QualityKind, &str, &str); 15] = [
    (QualityKind::CompletenessCommission, "DQ_CompletenessCommission", "DQ_CompletenessCommission"),
    (QualityKind::CompletenessOmission, "DQ_CompletenessOmission", "DQ_CompletenessOmission"),
    (QualityKind::ConceptualConsistency, "DQ_ConceptualConsistency", "DQ_ConceptualConsistency"),
    (QualityKind::DomainConsistency, "DQ_DomainConsistency", "DQ_DomainConsistency"),
    (QualityKind::FormatConsistency, "DQ_FormatConsistency", "DQ_FormatConsistency"),
    (QualityKind::TopologicalConsistency, "DQ_TopologicalConsistency", "DQ_TopologicalConsistency"),
    (
        QualityKind::AbsoluteExternalPositionalAccuracy,
        "DQ_AbsoluteExternalPositionalAccuracy",
        "DQ_AbsoluteExternalPositionalAccuracy",
    ),
    (
        QualityKind::GriddedDataPositionalAccuracy,
        "DQ_GriddedDataPositionalAccuracy",
        "DQ_GriddedDataPositionalAccuracy",
    ),
    (
        QualityKind::RelativeInternalPositionalAccuracy,
        "DQ_RelativeInternalPositionalAccuracy",
        "DQ_RelativeInternalPositionalAccuracy",
    ),
    (
        QualityKind::AccuracyOfATimeMeasurement,
        "DQ_AccuracyOfATimeMeasurement",
        "DQ_AccuracyOfATimeMeasurement",
    ),
    (QualityKind::TemporalConsistency, "DQ_TemporalConsistency", "DQ_TemporalConsistency"),
    (QualityKind::TemporalValidity, "DQ_TemporalValidity", "DQ_TemporalValidity"),
    (
        QualityKind::ThematicClassificationCorrectness,
        "DQ_ThematicClassificationCorrectness",
        "DQ_ThematicClassificationCorrectness",
    ),
    (
        QualityKind::NonQuantitativeAttributeAccuracy,
        "DQ_NonQuantitativeAttributeAccuracy",
        "DQ_NonQuantitativeAttributeCorrectness",
    ),
    (
        QualityKind::QuantitativeAttributeAccuracy,
        "DQ_QuantitativeAttributeAccuracy",
        "DQ_QuantitativeAttributeAccuracy",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSES: [Class; 24] = [
        Class::Metadata,
        Class::Locale,
        Class::Identifier,
        Class::Citation,
        Class::CitationDate,
        Class::Responsibility,
        Class::Individual,
        Class::Organisation,
        Class::Contact,
        Class::Address,
        Class::OnlineResource,
        Class::DataIdentification,
        Class::Resolution,
        Class::RepresentativeFraction,
        Class::Constraints,
        Class::DataQuality,
        Class::Scope,
        Class::QualityElement,
        Class::MeasureReference,
        Class::ConformanceResult,
        Class::QuantitativeResult,
        Class::Lineage,
        Class::ProcessStep,
        Class::Source,
    ];

    #[test]
    fn test_ordered_properties_exist_in_their_dialect() {
        for class in CLASSES {
            for term in class.property_order(Dialect::Legacy) {
                assert!(term.legacy().is_some(), "{:?}.{:?} has no legacy name", class, term);
            }
            for term in class.property_order(Dialect::Current) {
                assert!(term.current().is_some(), "{:?}.{:?} has no current name", class, term);
            }
        }
    }

    #[test]
    fn test_property_names_are_unique_within_a_class() {
        for dialect in [Dialect::Legacy, Dialect::Current] {
            for class in CLASSES {
                let names: Vec<_> = class
                    .property_order(dialect)
                    .iter()
                    .filter_map(|t| match dialect {
                        Dialect::Legacy => t.legacy(),
                        Dialect::Current => t.current(),
                    })
                    .collect();
                for (i, name) in names.iter().enumerate() {
                    assert!(!names[..i].contains(name), "{:?} repeats {}", class, name);
                }
            }
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(Term::DateStamp.label(), "dateStamp");
        assert_eq!(Term::CitationOnlineResource.label(), "onlineResource");
    }
}
