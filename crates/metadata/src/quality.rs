//! Data quality reports and lineage.

use crate::citation::{Citation, Identifier};
use crate::code::ScopeCode;
use crate::measure::Unit;
use crate::text::InternationalString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Quality information for the data specified by a scope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataQuality {
    pub scope: Option<ScopeCode>,
    pub reports: Vec<QualityElement>,
}

impl DataQuality {
    pub fn is_empty(&self) -> bool {
        self.scope.is_none() && self.reports.is_empty()
    }
}

/// The data quality element classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QualityKind {
    CompletenessCommission,
    CompletenessOmission,
    ConceptualConsistency,
    #[default]
    DomainConsistency,
    FormatConsistency,
    TopologicalConsistency,
    AbsoluteExternalPositionalAccuracy,
    GriddedDataPositionalAccuracy,
    RelativeInternalPositionalAccuracy,
    AccuracyOfATimeMeasurement,
    TemporalConsistency,
    TemporalValidity,
    ThematicClassificationCorrectness,
    NonQuantitativeAttributeAccuracy,
    QuantitativeAttributeAccuracy,
}

impl QualityKind {
    pub const ALL: [QualityKind; 15] = [
        QualityKind::CompletenessCommission,
        QualityKind::CompletenessOmission,
        QualityKind::ConceptualConsistency,
        QualityKind::DomainConsistency,
        QualityKind::FormatConsistency,
        QualityKind::TopologicalConsistency,
        QualityKind::AbsoluteExternalPositionalAccuracy,
        QualityKind::GriddedDataPositionalAccuracy,
        QualityKind::RelativeInternalPositionalAccuracy,
        QualityKind::AccuracyOfATimeMeasurement,
        QualityKind::TemporalConsistency,
        QualityKind::TemporalValidity,
        QualityKind::ThematicClassificationCorrectness,
        QualityKind::NonQuantitativeAttributeAccuracy,
        QualityKind::QuantitativeAttributeAccuracy,
    ];
}

/// One measured aspect of data quality.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityElement {
    pub kind: QualityKind,
    pub names_of_measure: Vec<InternationalString>,
    pub measure_identification: Option<Identifier>,
    pub measure_description: Option<InternationalString>,
    pub results: Vec<QualityResult>,
}

impl QualityElement {
    pub fn new(kind: QualityKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }
}

/// Outcome of evaluating a quality element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QualityResult {
    /// Evaluation against a conformance specification.
    Conformance {
        specification: Option<Arc<Citation>>,
        explanation: Option<InternationalString>,
        pass: Option<bool>,
    },
    /// Measured values, all in the same unit.
    Quantitative {
        value_unit: Option<Unit>,
        values: Vec<Decimal>,
    },
}

/// Information about the events or source data used in producing a resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Lineage {
    pub statement: Option<InternationalString>,
    pub process_steps: Vec<ProcessStep>,
    pub sources: Vec<Source>,
}

impl Lineage {
    pub fn with_statement(statement: impl Into<InternationalString>) -> Self {
        Self {
            statement: Some(statement.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessStep {
    pub description: Option<InternationalString>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Source {
    pub description: Option<InternationalString>,
}
