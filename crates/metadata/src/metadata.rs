//! The metadata record and the identification of the described resource.

use crate::citation::{Citation, CitationDate, Identifier, Responsibility};
use crate::constraints::Constraints;
use crate::measure::Measure;
use crate::quality::{DataQuality, Lineage};
use crate::text::InternationalString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Root entity of a metadata record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub metadata_identifier: Option<Identifier>,
    /// ISO 639-2 code of the metadata language.
    pub language: Option<String>,
    pub contacts: Vec<Arc<Responsibility>>,
    pub date_info: Vec<CitationDate>,
    pub metadata_standards: Vec<Arc<Citation>>,
    pub identification_info: Vec<DataIdentification>,
    pub data_quality_info: Vec<DataQuality>,
    pub resource_lineages: Vec<Lineage>,
    pub metadata_constraints: Vec<Constraints>,
}

/// Basic information about a dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataIdentification {
    pub citation: Option<Arc<Citation>>,
    pub abstract_text: Option<InternationalString>,
    pub points_of_contact: Vec<Arc<Responsibility>>,
    pub spatial_resolutions: Vec<Resolution>,
    pub resource_constraints: Vec<Constraints>,
}

/// Level of detail expressed as a ground distance or a scale denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    Distance(Measure),
    EquivalentScale(i64),
}
