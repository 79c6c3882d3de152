//! Errors raised while parsing or writing an element tree.

use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("invalid escape sequence: {0}")]
    Escape(#[from] EscapeError),

    #[error("unknown entity reference &{0};")]
    UnknownEntity(String),

    #[error("namespace prefix `{0}` is not bound")]
    UnboundPrefix(String),

    #[error("document has no root element")]
    NoRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("unexpected text outside the root element")]
    TextOutsideRoot,

    #[error("element <{0}> is not closed")]
    Unclosed(String),

    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;
