//! Restrictions on the access and use of a resource or of its metadata.

use crate::citation::Citation;
use crate::code::{Classification, Restriction};
use crate::text::InternationalString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The constraint class being described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// `MD_Constraints`
    #[default]
    Basic,
    /// `MD_LegalConstraints`
    Legal,
    /// `MD_SecurityConstraints`
    Security,
}

/// Restrictions on the access and use of a resource.
///
/// Legal properties are only written for [`ConstraintKind::Legal`] and the
/// classification only for [`ConstraintKind::Security`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    pub kind: ConstraintKind,
    pub use_limitations: Vec<InternationalString>,
    pub access_constraints: Vec<Restriction>,
    pub use_constraints: Vec<Restriction>,
    pub other_constraints: Vec<InternationalString>,
    pub classification: Option<Classification>,
    /// Not part of the 2003 standard.
    pub references: Vec<Arc<Citation>>,
}

impl Constraints {
    pub fn legal() -> Self {
        Self {
            kind: ConstraintKind::Legal,
            ..Default::default()
        }
    }

    pub fn security(classification: Classification) -> Self {
        Self {
            kind: ConstraintKind::Security,
            classification: Some(classification),
            ..Default::default()
        }
    }
}
