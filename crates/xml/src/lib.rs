//! # isomd-xml
//!
//! Reads and writes ISO 19115 metadata records in their two XML encodings:
//!
//! - **Legacy**: ISO 19139:2007 (`gmd`, `gco`, `gmx` namespaces)
//! - **Current**: ISO 19115-3 (`mdb`, `cit`, `mri`, `mco`, `mdq`, ... namespaces)
//!
//! ## Features
//!
//! - **One model, two dialects**: the same [`isomd_metadata::Metadata`] graph
//!   is written in either dialect. Element names, code list spellings
//!   (`license` versus `licence`) and unit references come from a
//!   [`DialectContext`] passed down each call, never from global state.
//! - **Shared objects**: a citation or responsibility referenced from two
//!   places is written once and referenced by `xlink:href="#id"` after that.
//!   Reading restores the sharing, including forward references.
//! - **Warnings, not failures**: anomalies such as an empty code value or an
//!   unknown locale are reported as [`Warning`]s, to a [`WarningListener`] if
//!   one is given, and the call carries on.
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use isomd_metadata::{Citation, Metadata, Party, Responsibility, Role};
//! use isomd_xml::{Codec, CodecConfig, Dialect};
//!
//! let contact = Arc::new(Responsibility::new(Role::PointOfContact, Party::organisation("Geo Agency")));
//! let metadata = Metadata {
//!     contacts: vec![Arc::clone(&contact), contact],
//!     metadata_standards: vec![Arc::new(Citation::titled("ISO 19115-1"))],
//!     ..Default::default()
//! };
//!
//! let codec = Codec::new(CodecConfig::for_testing())?;
//! let written = codec.write(&metadata, Dialect::Current)?;
//! assert!(written.value.contains(r##"xlink:href="#responsibility-1""##));
//!
//! let read = codec.read::<Metadata>(&written.value)?;
//! assert!(Arc::ptr_eq(&read.value.contacts[0], &read.value.contacts[1]));
//! # Ok::<(), isomd_xml::CodecError>(())
//! ```
//!
//! ## Logging
//!
//! The codec logs through [`tracing`]. Warnings are logged at `debug` level
//! when no listener is registered; nothing installs a subscriber.

mod adapters;
mod de;
mod identity;
mod phase;
mod ser;

pub mod config;
pub mod dialect;
pub mod error;
pub mod terms;
pub mod warning;

pub use config::CodecConfig;
pub use dialect::{Dialect, DialectContext, Direction, Namespace, QName};
pub use error::{CodecError, Result};
pub use terms::{Class, Term};
pub use warning::{MessageKey, Warning, WarningListener};

use de::Decoder;
use isomd_metadata::{Citation, Metadata};
use isomd_xml_tree::{Document, NodeId, TreeError, WriteOptions};
use ser::Encoder;
use std::io::Write;
use std::sync::Arc;

mod sealed {
    use super::*;

    pub trait Sealed: Sized {
        /// Value built by the decoder before the call ends.
        type Decoded;
        const ROOT: Class;

        fn encode(&self, encoder: &mut Encoder<'_>) -> Result<NodeId>;
        fn decode(decoder: &mut Decoder<'_, '_>, root: NodeId) -> Result<Self::Decoded>;
        fn complete(decoded: Self::Decoded) -> Self;
    }
}

/// Model types that can be the root element of a document: [`Metadata`]
/// and [`Citation`].
pub trait XmlRoot: sealed::Sealed {}

impl sealed::Sealed for Metadata {
    type Decoded = Metadata;
    const ROOT: Class = Class::Metadata;

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<NodeId> {
        encoder.encode_metadata(self)
    }

    fn decode(decoder: &mut Decoder<'_, '_>, root: NodeId) -> Result<Metadata> {
        decoder.decode_metadata(root)
    }

    fn complete(decoded: Metadata) -> Self {
        decoded
    }
}

impl XmlRoot for Metadata {}

impl sealed::Sealed for Citation {
    type Decoded = Arc<Citation>;
    const ROOT: Class = Class::Citation;

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<NodeId> {
        encoder.encode_citation(self)
    }

    fn decode(decoder: &mut Decoder<'_, '_>, root: NodeId) -> Result<Arc<Citation>> {
        decoder.decode_citation(root)
    }

    fn complete(decoded: Arc<Citation>) -> Self {
        Arc::unwrap_or_clone(decoded)
    }
}

impl XmlRoot for Citation {}

/// The value produced by a codec call and the warnings found on the way.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    /// Converts the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Reads and writes metadata documents with one configuration.
///
/// A codec holds no per-call state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Creates a codec, rejecting an invalid configuration.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|errors| CodecError::Config(errors.join("; ")))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Writes `root` as an XML document in `dialect`.
    pub fn write<T: XmlRoot>(&self, root: &T, dialect: Dialect) -> Result<Outcome<String>> {
        self.write_string(root, dialect, None)
    }

    /// Like [`write`](Self::write), sending each warning to `listener` as
    /// it is found.
    pub fn write_with<T: XmlRoot>(
        &self,
        root: &T,
        dialect: Dialect,
        listener: &mut dyn WarningListener,
    ) -> Result<Outcome<String>> {
        self.write_string(root, dialect, Some(listener))
    }

    /// Writes `root` as an element tree.
    #[tracing::instrument(skip_all, fields(dialect = %dialect, root = T::ROOT.name()))]
    pub fn write_document<T: XmlRoot>(
        &self,
        root: &T,
        dialect: Dialect,
        listener: Option<&mut dyn WarningListener>,
    ) -> Result<Outcome<Document>> {
        let mut encoder = Encoder::new(dialect, &self.config, listener);
        let node = root.encode(&mut encoder);
        let (document, warnings) = encoder.finish(node)?;
        tracing::debug!(warnings = warnings.len(), "document written");
        Ok(Outcome {
            value: document,
            warnings,
        })
    }

    /// Writes `root` to `writer`, returning the warnings.
    pub fn write_to<T: XmlRoot, W: Write>(
        &self,
        root: &T,
        dialect: Dialect,
        writer: W,
    ) -> Result<Vec<Warning>> {
        let outcome = self.write_document(root, dialect, None)?;
        outcome
            .value
            .write_to(writer, &self.write_options())
            .map_err(|error| match error {
                TreeError::Io(error) => CodecError::Io(error),
                other => CodecError::Output(other),
            })?;
        Ok(outcome.warnings)
    }

    fn write_string<T: XmlRoot>(
        &self,
        root: &T,
        dialect: Dialect,
        listener: Option<&mut dyn WarningListener>,
    ) -> Result<Outcome<String>> {
        let outcome = self.write_document(root, dialect, listener)?;
        let xml = outcome
            .value
            .to_xml_string(&self.write_options())
            .map_err(CodecError::Output)?;
        Ok(Outcome {
            value: xml,
            warnings: outcome.warnings,
        })
    }

    /// Options of the text written by this codec, with the conventional
    /// prefix of every known namespace.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            indent: self.config.indent,
            declaration: self.config.xml_declaration,
            prefixes: Namespace::ALL
                .iter()
                .map(|ns| (ns.uri().to_string(), ns.prefix().to_string()))
                .collect(),
        }
    }

    /// Reads a document whose root element is a `T`.
    pub fn read<T: XmlRoot>(&self, xml: &str) -> Result<Outcome<T>> {
        self.read_string(xml, None)
    }

    /// Like [`read`](Self::read), sending each warning to `listener` as it
    /// is found.
    pub fn read_with<T: XmlRoot>(
        &self,
        xml: &str,
        listener: &mut dyn WarningListener,
    ) -> Result<Outcome<T>> {
        self.read_string(xml, Some(listener))
    }

    fn read_string<T: XmlRoot>(
        &self,
        xml: &str,
        listener: Option<&mut dyn WarningListener>,
    ) -> Result<Outcome<T>> {
        let document = Document::parse(xml).map_err(CodecError::Malformed)?;
        self.read_document(&document, listener)
    }

    /// Reads an element tree whose root element is a `T`.
    ///
    /// The dialect is the configured read dialect, or the one the root
    /// element namespace designates.
    #[tracing::instrument(skip_all, fields(root = T::ROOT.name()))]
    pub fn read_document<T: XmlRoot>(
        &self,
        document: &Document,
        listener: Option<&mut dyn WarningListener>,
    ) -> Result<Outcome<T>> {
        let root = document.root().ok_or(CodecError::Malformed(TreeError::NoRoot))?;
        let name = &document.element(root).name;
        let dialect = match self.config.read_dialect {
            Some(dialect) => dialect,
            None => name
                .namespace
                .as_deref()
                .and_then(Dialect::sniff)
                .ok_or_else(|| CodecError::UnknownDialect(name.namespace.clone()))?,
        };
        tracing::debug!(dialect = %dialect, "reading document");

        let ctx = DialectContext::new(dialect, Direction::Reading);
        let expected = ctx.class_name(T::ROOT);
        if !expected.is_some_and(|expected| expected.matches(name)) {
            return Err(CodecError::UnsupportedRoot(adapters::display_name(name)));
        }

        let mut decoder = Decoder::new(dialect, document, &self.config, listener);
        let decoded = T::decode(&mut decoder, root);
        let (decoded, warnings) = decoder.finish(decoded)?;
        Ok(Outcome {
            value: T::complete(decoded),
            warnings,
        })
    }
}

/// Writes `root` in `dialect` with the default configuration.
pub fn to_xml_string<T: XmlRoot>(root: &T, dialect: Dialect) -> Result<String> {
    Codec::default().write(root, dialect).map(|outcome| outcome.value)
}

/// Reads a document with the default configuration, detecting its dialect.
pub fn from_xml_str<T: XmlRoot>(xml: &str) -> Result<T> {
    Codec::default().read(xml).map(|outcome| outcome.value)
}
