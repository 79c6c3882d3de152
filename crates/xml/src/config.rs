//! Codec configuration.
//!
//! Configuration can be built programmatically, parsed from command line
//! style arguments with [`CodecConfig::try_parse_from`], or read from the
//! environment with [`CodecConfig::from_env`].
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ISOMD_READ_DIALECT` | (detected) | Dialect used to read documents (`legacy` or `current`) |
//! | `ISOMD_INDENT` | 2 | Indentation width of written documents, 0 for compact output |
//! | `ISOMD_XML_DECLARATION` | true | Start written documents with an XML declaration |
//! | `ISOMD_PREFER_UNIT_POINTERS` | true | Designate quantitative result units by their canonical reference |
//! | `ISOMD_MAX_DEPTH` | 64 | Maximum object nesting accepted on read and produced on write |
//!
//! # Example
//!
//! ```rust
//! use isomd_xml::{CodecConfig, Dialect};
//!
//! let config = CodecConfig {
//!     read_dialect: Some(Dialect::Legacy),
//!     indent: 0,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::dialect::Dialect;
use clap::Parser;

/// Largest accepted indentation width.
const MAX_INDENT: usize = 16;

/// Configuration shared by every call made through one [`Codec`](crate::Codec).
#[derive(Debug, Clone, Parser)]
#[command(name = "isomd")]
#[command(about = "ISO 19115 metadata XML codec")]
pub struct CodecConfig {
    /// Dialect used to read documents. Detected from the root element
    /// namespace when not set.
    #[arg(long, env = "ISOMD_READ_DIALECT", value_enum)]
    pub read_dialect: Option<Dialect>,

    /// Indentation width of written documents; 0 writes a single line.
    #[arg(long, env = "ISOMD_INDENT", default_value = "2")]
    pub indent: usize,

    /// Start written documents with `<?xml version="1.0" encoding="UTF-8"?>`.
    #[arg(long, env = "ISOMD_XML_DECLARATION", default_value = "true")]
    pub xml_declaration: bool,

    /// Write quantitative result units as a pointer to their canonical
    /// reference when they have one, instead of an inline unit definition.
    #[arg(long, env = "ISOMD_PREFER_UNIT_POINTERS", default_value = "true")]
    pub prefer_unit_pointers: bool,

    /// Maximum object nesting accepted on read and produced on write.
    #[arg(long, env = "ISOMD_MAX_DEPTH", default_value = "64")]
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            read_dialect: None,
            indent: 2,
            xml_declaration: true,
            prefer_unit_pointers: true,
            max_depth: 64,
        }
    }
}

impl CodecConfig {
    /// Creates a configuration from environment variables.
    ///
    /// Command line arguments of the host process are ignored; variables
    /// that fail to parse leave the whole configuration at its defaults.
    pub fn from_env() -> Self {
        Self::try_parse_from([env!("CARGO_PKG_NAME")]).unwrap_or_default()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.max_depth == 0 {
            errors.push("Max depth cannot be 0".to_string());
        }

        if self.indent > MAX_INDENT {
            errors.push(format!("Indent cannot exceed {}", MAX_INDENT));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Output is compact and has no XML declaration, so written documents
    /// can be compared as plain strings.
    pub fn for_testing() -> Self {
        Self {
            read_dialect: None,
            indent: 0,
            xml_declaration: false,
            prefer_unit_pointers: true,
            max_depth: 32,
        }
    }
}
