//! Citations, identifiers, responsible parties and online resources.

use crate::code::{DateType, OnLineFunction, Role};
use crate::text::InternationalString;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Objects carrying an optional document-local identifier.
///
/// The identifier is only meaningful inside one XML document; it is what
/// cross-references point to.
pub trait Identifiable {
    fn id(&self) -> Option<&str>;
}

/// Standardized resource reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Citation {
    pub id: Option<String>,
    pub title: Option<InternationalString>,
    pub alternate_titles: Vec<InternationalString>,
    pub dates: Vec<CitationDate>,
    pub edition: Option<InternationalString>,
    pub identifiers: Vec<Identifier>,
    pub cited_responsible_parties: Vec<Arc<Responsibility>>,
    pub other_citation_details: Option<InternationalString>,
    /// Not part of the 2003 standard.
    pub online_resources: Vec<Arc<OnlineResource>>,
}

impl Citation {
    /// A citation with only a title.
    pub fn titled(title: impl Into<InternationalString>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().map(InternationalString::text)
    }
}

impl Identifiable for Citation {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// A date, with or without a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DateValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateValue::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// Reference date and the event used to describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationDate {
    pub date: DateValue,
    pub date_type: Option<DateType>,
}

impl CitationDate {
    pub fn new(date: DateValue, date_type: DateType) -> Self {
        Self {
            date,
            date_type: Some(date_type),
        }
    }
}

/// Value uniquely identifying an object within a namespace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Identifier {
    pub authority: Option<Arc<Citation>>,
    pub code: String,
    pub code_space: Option<String>,
    pub version: Option<String>,
    /// Not part of the 2003 standard.
    pub description: Option<InternationalString>,
}

impl Identifier {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn with_code_space(code_space: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            code_space: Some(code_space.into()),
            ..Default::default()
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code_space {
            Some(space) => write!(f, "{}:{}", space, self.code),
            None => f.write_str(&self.code),
        }
    }
}

/// Whether a party is a person or an organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PartyKind {
    #[default]
    Individual,
    Organisation,
}

/// A person or organisation slot in a responsibility.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Party {
    pub kind: PartyKind,
    pub name: Option<InternationalString>,
    /// Only meaningful for individuals.
    pub position_name: Option<InternationalString>,
    pub contact_info: Vec<Contact>,
}

impl Party {
    pub fn individual(name: impl Into<InternationalString>) -> Self {
        Self {
            kind: PartyKind::Individual,
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn organisation(name: impl Into<InternationalString>) -> Self {
        Self {
            kind: PartyKind::Organisation,
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Information about the party and their role.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Responsibility {
    pub id: Option<String>,
    pub role: Option<Role>,
    pub parties: Vec<Party>,
}

impl Responsibility {
    pub fn new(role: Role, party: Party) -> Self {
        Self {
            id: None,
            role: Some(role),
            parties: vec![party],
        }
    }
}

impl Identifiable for Responsibility {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Information required to contact a party.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub electronic_mail_addresses: Vec<String>,
    pub online_resources: Vec<Arc<OnlineResource>>,
    pub contact_instructions: Option<InternationalString>,
}

/// Information about on-line sources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnlineResource {
    pub id: Option<String>,
    pub linkage: Option<String>,
    pub protocol: Option<String>,
    pub name: Option<InternationalString>,
    pub description: Option<InternationalString>,
    pub function: Option<OnLineFunction>,
}

impl OnlineResource {
    pub fn new(linkage: impl Into<String>) -> Self {
        Self {
            linkage: Some(linkage.into()),
            ..Default::default()
        }
    }
}

impl Identifiable for OnlineResource {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
