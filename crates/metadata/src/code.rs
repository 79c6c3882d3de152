//! Closed code lists.
//!
//! Each code list member has a canonical identifier (the ISO 19115-1 spelling)
//! and, for a few members, a different spelling used by the 2003 standard.
//! Both spellings designate the same member.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Common behavior of the code list enumerations.
pub trait CodeList: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// ISO class name of the code list, e.g. `MD_RestrictionCode`.
    const NAME: &'static str;

    /// All members in declaration order.
    fn values() -> &'static [Self];

    /// The canonical spelling.
    fn identifier(self) -> &'static str;

    /// The spelling used by the legacy standard, when it differs.
    fn legacy_identifier(self) -> Option<&'static str> {
        None
    }

    /// Finds the member spelled exactly `name`, in either spelling.
    fn from_identifier(name: &str) -> Option<Self> {
        Self::values()
            .iter()
            .copied()
            .find(|code| code.identifier() == name || code.legacy_identifier() == Some(name))
    }
}

macro_rules! code_list {
    (
        $(#[$meta:meta])*
        $name:ident = $iso:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $id:literal $(| $legacy:literal)? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
        }

        impl CodeList for $name {
            const NAME: &'static str = $iso;

            fn values() -> &'static [Self] {
                &[ $( $name::$variant, )* ]
            }

            fn identifier(self) -> &'static str {
                match self {
                    $( $name::$variant => $id, )*
                }
            }

            fn legacy_identifier(self) -> Option<&'static str> {
                match self {
                    $( $name::$variant => code_list!(@legacy $($legacy)?), )*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.identifier())
            }
        }
    };
    (@legacy $legacy:literal) => { Some($legacy) };
    (@legacy) => { None };
}

code_list! {
    /// Function performed by a responsible party.
    Role = "CI_RoleCode" {
        ResourceProvider => "resourceProvider",
        Custodian => "custodian",
        Owner => "owner",
        User => "user",
        Distributor => "distributor",
        Originator => "originator",
        PointOfContact => "pointOfContact",
        PrincipalInvestigator => "principalInvestigator",
        Processor => "processor",
        Publisher => "publisher",
        Author => "author",
        Sponsor => "sponsor",
        CoAuthor => "coAuthor",
        Collaborator => "collaborator",
        Editor => "editor",
        Mediator => "mediator",
        RightsHolder => "rightsHolder",
        Contributor => "contributor",
        Funder => "funder",
        Stakeholder => "stakeholder",
    }
}

code_list! {
    /// Limitation placed upon the access or use of the data.
    Restriction = "MD_RestrictionCode" {
        Copyright => "copyright",
        Patent => "patent",
        PatentPending => "patentPending",
        Trademark => "trademark",
        /// Spelled `license` by the 2003 standard.
        Licence => "licence" | "license",
        IntellectualPropertyRights => "intellectualPropertyRights",
        Restricted => "restricted",
        OtherRestrictions => "otherRestrictions",
        Unrestricted => "unrestricted",
        LicenceUnrestricted => "licenceUnrestricted",
        LicenceEndUser => "licenceEndUser",
        LicenceDistributor => "licenceDistributor",
        Private => "private",
        Statutory => "statutory",
        Confidential => "confidential",
        SensitiveButUnclassified => "sensitiveButUnclassified",
        InConfidence => "in-confidence",
    }
}

code_list! {
    /// Event a citation date refers to.
    DateType = "CI_DateTypeCode" {
        Creation => "creation",
        Publication => "publication",
        Revision => "revision",
        Expiry => "expiry",
        LastUpdate => "lastUpdate",
        LastRevision => "lastRevision",
        NextUpdate => "nextUpdate",
        Unavailable => "unavailable",
        InForce => "inForce",
        Adopted => "adopted",
        Deprecated => "deprecated",
        Superseded => "superseded",
        ValidityBegins => "validityBegins",
        ValidityExpires => "validityExpires",
        Released => "released",
        Distribution => "distribution",
    }
}

code_list! {
    /// Function performed by an online resource.
    OnLineFunction = "CI_OnLineFunctionCode" {
        Download => "download",
        Information => "information",
        OfflineAccess => "offlineAccess",
        Order => "order",
        Search => "search",
        CompleteMetadata => "completeMetadata",
        BrowseGraphic => "browseGraphic",
        Upload => "upload",
        EmailService => "emailService",
        Browsing => "browsing",
        FileAccess => "fileAccess",
    }
}

code_list! {
    /// Class of information to which the referencing entity applies.
    ScopeCode = "MD_ScopeCode" {
        Attribute => "attribute",
        AttributeType => "attributeType",
        CollectionHardware => "collectionHardware",
        CollectionSession => "collectionSession",
        Dataset => "dataset",
        Series => "series",
        NonGeographicDataset => "nonGeographicDataset",
        DimensionGroup => "dimensionGroup",
        Feature => "feature",
        FeatureType => "featureType",
        PropertyType => "propertyType",
        FieldSession => "fieldSession",
        Software => "software",
        Service => "service",
        Model => "model",
        Tile => "tile",
        Metadata => "metadata",
        Initiative => "initiative",
        Sample => "sample",
        Document => "document",
        Repository => "repository",
        Aggregate => "aggregate",
        Product => "product",
        Collection => "collection",
        Coverage => "coverage",
        Application => "application",
    }
}

code_list! {
    /// Name of the handling restrictions on the resource.
    Classification = "MD_ClassificationCode" {
        Unclassified => "unclassified",
        Restricted => "restricted",
        Confidential => "confidential",
        Secret => "secret",
        TopSecret => "topSecret",
        SensitiveButUnclassified => "sensitiveButUnclassified",
        ForOfficialUseOnly => "forOfficialUseOnly",
        Protected => "protected",
        LimitedDistribution => "limitedDistribution",
    }
}
