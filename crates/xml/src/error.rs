//! Error types for the metadata codec.
//!
//! Only terminal failures are errors. Recoverable anomalies (an empty code
//! value, an unknown locale, a property the dialect cannot express) are
//! reported as [`Warning`](crate::Warning)s and never abort a call.

use isomd_xml_tree::TreeError;
use thiserror::Error;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// The error type for reading and writing metadata documents.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input is not well-formed XML.
    #[error("malformed XML: {0}")]
    Malformed(#[source] TreeError),

    /// The document could not be written out.
    #[error("failed to write XML: {0}")]
    Output(#[source] TreeError),

    /// The root element is not a supported document root for the dialect.
    #[error("unsupported document root: {0}")]
    UnsupportedRoot(String),

    /// The dialect could not be determined from the root element namespace.
    #[error("cannot determine the dialect of a document in namespace {0:?}")]
    UnknownDialect(Option<String>),

    /// Objects are nested deeper than the configured limit.
    #[error("maximum nesting depth of {max} exceeded")]
    DepthExceeded { max: usize },

    /// One or more cross-references point at identifiers that no element
    /// of the document declares.
    #[error("unresolved reference(s): {}", .ids.join(", "))]
    UnresolvedReference { ids: Vec<String> },

    /// A cross-reference designates an object of another type.
    #[error("reference #{id} designates a {found}, expected a {expected}")]
    ReferenceTypeMismatch {
        id: String,
        expected: String,
        found: String,
    },

    /// A cross-reference designates an object that contains the reference.
    #[error("reference #{id} designates one of its own ancestors")]
    CyclicReference { id: String },

    /// A unit of measure designation that matches no known unit.
    #[error("unknown unit of measure: {0}")]
    UnknownUnit(String),

    /// A measure without unit of measure.
    #[error("missing unit of measure in {0}")]
    MissingUnit(String),

    /// A numeric value that could not be parsed.
    #[error("invalid number {value:?} in {element}")]
    InvalidNumber { element: String, value: String },

    /// Several terminal failures, in the order they were found.
    #[error("{} errors: {}", .0.len(), join_errors(.0))]
    Multiple(Vec<CodecError>),

    /// I/O error while writing to a caller-provided writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid codec configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CodecError {
    /// Folds accumulated failures into a single result: nothing is success,
    /// one failure is returned as is, several become [`CodecError::Multiple`].
    pub fn from_failures(mut failures: Vec<CodecError>) -> Result<()> {
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(CodecError::Multiple(failures)),
        }
    }

    /// All failures carried by this error, flattening [`CodecError::Multiple`].
    pub fn failures(&self) -> Vec<&CodecError> {
        match self {
            CodecError::Multiple(errors) => errors.iter().flat_map(CodecError::failures).collect(),
            other => vec![other],
        }
    }
}

fn join_errors(errors: &[CodecError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
