//! Common test utilities for codec integration tests.
//!
//! - [`fixtures`] - Metadata records and XML documents

#![allow(dead_code)]

pub mod fixtures;

use isomd_xml::{Codec, CodecConfig, Dialect};

pub const DIALECTS: [Dialect; 2] = [Dialect::Legacy, Dialect::Current];

/// A codec writing compact output without declaration.
pub fn codec() -> Codec {
    Codec::new(CodecConfig::for_testing()).expect("test configuration is valid")
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
