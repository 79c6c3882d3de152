//! Registry of well-known citations.
//!
//! The registry builds each citation on first lookup and caches it. Returned
//! citations are shared behind [`Arc`] and never handed out mutably, so a
//! citation obtained from the registry is frozen for the life of the process.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::citation::{Citation, Identifier};
use crate::text::InternationalString;

static GLOBAL: Lazy<CitationRegistry> = Lazy::new(CitationRegistry::new);

/// One identifier attached to a built-in citation.
struct IdentifierEntry {
    code: &'static str,
    code_space: &'static str,
    description: Option<&'static str>,
}

/// Static description of a built-in citation.
struct Entry {
    key: &'static str,
    title: &'static str,
    edition: Option<&'static str>,
    /// When empty, the key is stored as an alternate title instead.
    identifiers: &'static [IdentifierEntry],
    /// Superseded keys that still resolve to this entry.
    legacy_keys: &'static [&'static str],
}

const ENTRIES: &[Entry] = &[
    Entry {
        key: "ISO 19115-1",
        title: "Geographic Information — Metadata Part 1: Fundamentals",
        edition: Some("ISO 19115-1:2014"),
        identifiers: &[],
        legacy_keys: &[],
    },
    Entry {
        key: "ISO 19115-2",
        title: "Geographic Information — Metadata Part 2: Extensions for imagery and gridded data",
        edition: Some("ISO 19115-2:2009"),
        identifiers: &[],
        legacy_keys: &[],
    },
    Entry {
        key: "ISO 19115-3",
        title: "Geographic Information — Metadata Part 3: XML schema implementation for fundamental concepts",
        edition: Some("ISO/TS 19115-3:2016"),
        identifiers: &[],
        legacy_keys: &[],
    },
    Entry {
        key: "ISO 19139",
        title: "Geographic Information — Metadata — XML schema implementation",
        edition: Some("ISO/TS 19139:2007"),
        identifiers: &[],
        legacy_keys: &[],
    },
    Entry {
        key: "ISO 19157",
        title: "Geographic Information — Data quality",
        edition: Some("ISO 19157:2013"),
        identifiers: &[],
        legacy_keys: &[],
    },
    Entry {
        key: "EPSG",
        title: "EPSG Geodetic Parameter Dataset",
        edition: None,
        identifiers: &[IdentifierEntry {
            code: "EPSG",
            code_space: "IOGP",
            description: None,
        }],
        legacy_keys: &[],
    },
    // Downstream consumers key off either spelling, so both identifiers are kept.
    Entry {
        key: "IOGP",
        title: "International Association of Oil & Gas Producers",
        edition: None,
        identifiers: &[
            IdentifierEntry {
                code: "IOGP",
                code_space: "IOGP",
                description: Some("Current identifier"),
            },
            IdentifierEntry {
                code: "OGP",
                code_space: "IOGP",
                description: Some("Superseded identifier"),
            },
        ],
        legacy_keys: &["OGP"],
    },
    Entry {
        key: "OGC",
        title: "Open Geospatial Consortium",
        edition: None,
        identifiers: &[IdentifierEntry {
            code: "OGC",
            code_space: "OGC",
            description: None,
        }],
        legacy_keys: &[],
    },
    Entry {
        key: "ESRI",
        title: "Esri",
        edition: None,
        identifiers: &[],
        legacy_keys: &[],
    },
    Entry {
        key: "GeoTIFF",
        title: "GeoTIFF Format Specification",
        edition: Some("1.1"),
        identifiers: &[],
        legacy_keys: &[],
    },
    Entry {
        key: "NetCDF",
        title: "NetCDF Classic and 64-bit Offset Format",
        edition: None,
        identifiers: &[],
        legacy_keys: &[],
    },
    Entry {
        key: "WMO",
        title: "World Meteorological Organization",
        edition: None,
        identifiers: &[IdentifierEntry {
            code: "WMO",
            code_space: "WMO",
            description: None,
        }],
        legacy_keys: &[],
    },
    Entry {
        key: "ISBN",
        title: "International Standard Book Number",
        edition: None,
        identifiers: &[IdentifierEntry {
            code: "ISBN",
            code_space: "ISO",
            description: None,
        }],
        legacy_keys: &[],
    },
    Entry {
        key: "ISSN",
        title: "International Standard Serial Number",
        edition: None,
        identifiers: &[IdentifierEntry {
            code: "ISSN",
            code_space: "ISO",
            description: None,
        }],
        legacy_keys: &[],
    },
    Entry {
        key: "PROJ",
        title: "PROJ coordinate transformation software",
        edition: None,
        identifiers: &[],
        legacy_keys: &["Proj4"],
    },
];

/// Cache of well-known citations, keyed by their registry key.
pub struct CitationRegistry {
    cache: RwLock<HashMap<&'static str, Arc<Citation>>>,
}

impl Default for CitationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CitationRegistry {
    /// Creates an empty registry. Citations are built on first lookup.
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static CitationRegistry {
        &GLOBAL
    }

    /// All registry keys, in registration order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        ENTRIES.iter().map(|entry| entry.key)
    }

    /// Returns the citation registered under `name`.
    ///
    /// The lookup is exact first, then ignores case and also accepts
    /// superseded keys (`OGP` gives the `IOGP` citation).
    pub fn lookup(&self, name: &str) -> Option<Arc<Citation>> {
        let entry = find_entry(name)?;
        if let Some(citation) = self.cache.read().get(entry.key) {
            return Some(Arc::clone(citation));
        }
        let mut cache = self.cache.write();
        let citation = cache
            .entry(entry.key)
            .or_insert_with(|| Arc::new(build(entry)));
        Some(Arc::clone(citation))
    }

    /// Returns the built-in citation whose title, key or edition equals
    /// `title`, ignoring case.
    pub fn find_by_title(&self, title: &str) -> Option<Arc<Citation>> {
        let title = title.trim();
        ENTRIES
            .iter()
            .find(|entry| {
                entry.title.eq_ignore_ascii_case(title)
                    || entry.key.eq_ignore_ascii_case(title)
                    || entry
                        .edition
                        .is_some_and(|edition| edition.eq_ignore_ascii_case(title))
            })
            .and_then(|entry| self.lookup(entry.key))
    }
}

fn find_entry(name: &str) -> Option<&'static Entry> {
    let name = name.trim();
    ENTRIES
        .iter()
        .find(|entry| entry.key == name)
        .or_else(|| {
            ENTRIES.iter().find(|entry| {
                entry.key.eq_ignore_ascii_case(name)
                    || entry
                        .legacy_keys
                        .iter()
                        .any(|legacy| legacy.eq_ignore_ascii_case(name))
            })
        })
}

fn build(entry: &Entry) -> Citation {
    let mut citation = Citation::titled(entry.title);
    citation.edition = entry.edition.map(InternationalString::new);
    if entry.identifiers.is_empty() {
        citation.alternate_titles.push(InternationalString::new(entry.key));
    } else {
        citation.identifiers = entry
            .identifiers
            .iter()
            .map(|id| Identifier {
                description: id.description.map(InternationalString::new),
                ..Identifier::with_code_space(id.code_space, id.code)
            })
            .collect();
    }
    citation
}
