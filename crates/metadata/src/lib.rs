//! # ISO 19115 metadata model
//!
//! Strongly-typed representations of the metadata objects exchanged by the
//! `isomd-xml` codec, plus the [`CitationRegistry`] of well-known citations.
//!
//! ## Sharing
//!
//! Objects that may be referenced from more than one place in a record
//! ([`Citation`], [`Responsibility`], [`OnlineResource`]) are held behind
//! [`std::sync::Arc`]. Two properties pointing at the same `Arc` designate
//! the same object, and the codec preserves that sharing across a round trip.
//!
//! ```
//! use std::sync::Arc;
//! use isomd_metadata::{Metadata, Party, Responsibility, Role};
//!
//! let contact = Arc::new(Responsibility::new(Role::PointOfContact, Party::organisation("Geo Agency")));
//! let metadata = Metadata {
//!     contacts: vec![Arc::clone(&contact)],
//!     ..Default::default()
//! };
//! assert!(Arc::ptr_eq(&metadata.contacts[0], &contact));
//! ```

pub mod citation;
pub mod code;
pub mod constraints;
pub mod measure;
pub mod metadata;
pub mod quality;
pub mod registry;
pub mod text;

pub use citation::{
    Citation, CitationDate, Contact, DateValue, Identifiable, Identifier, OnlineResource, Party,
    PartyKind, Responsibility,
};
pub use code::{Classification, CodeList, DateType, OnLineFunction, Restriction, Role, ScopeCode};
pub use constraints::{ConstraintKind, Constraints};
pub use measure::{Measure, Unit};
pub use metadata::{DataIdentification, Metadata, Resolution};
pub use quality::{DataQuality, Lineage, ProcessStep, QualityElement, QualityKind, QualityResult, Source};
pub use registry::CitationRegistry;
pub use text::{InternationalString, Locale};
