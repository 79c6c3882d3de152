//! Non-fatal anomalies found while reading or writing.
//!
//! A [`Warning`] carries a stable [`MessageKey`] and its parameters, so
//! callers can match on the kind of anomaly without parsing messages.

use std::fmt;

/// Kinds of recoverable anomalies.
///
/// The string form of each key ends with the number of parameters the
/// message takes, e.g. `UnknownCodeValue_2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// An empty value inside a collection was dropped. Parameter: code list
    /// or property name.
    NullCollectionElement,
    /// An empty value of a singular property was dropped. Parameter:
    /// property name.
    NullValue,
    /// A code list spelling that matches no member. Parameters: code list,
    /// spelling.
    UnknownCodeValue,
    /// A free text locale that could not be parsed. Parameter: locale.
    UnrecognizedLocale,
    /// A second translation for the same locale. Parameter: locale.
    DuplicatedLocale,
    /// A primitive value that could not be parsed. Parameters: element,
    /// value.
    UnparsableValue,
    /// Values beyond what the dialect can hold were dropped. Parameters:
    /// class, property.
    ValueTruncated,
    /// A property the dialect cannot express was dropped. Parameters:
    /// class, property.
    PropertyNotRepresentable,
    /// An element the codec does not know was skipped. Parameters: parent,
    /// element.
    UnexpectedElement,
    /// An identifier declared by more than one element. Parameter:
    /// identifier.
    DuplicateIdentifier,
}

impl MessageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::NullCollectionElement => "NullCollectionElement_1",
            MessageKey::NullValue => "NullValue_1",
            MessageKey::UnknownCodeValue => "UnknownCodeValue_2",
            MessageKey::UnrecognizedLocale => "UnrecognizedLocale_1",
            MessageKey::DuplicatedLocale => "DuplicatedLocale_1",
            MessageKey::UnparsableValue => "UnparsableValue_2",
            MessageKey::ValueTruncated => "ValueTruncated_2",
            MessageKey::PropertyNotRepresentable => "PropertyNotRepresentable_2",
            MessageKey::UnexpectedElement => "UnexpectedElement_2",
            MessageKey::DuplicateIdentifier => "DuplicateIdentifier_1",
        }
    }

    /// Message template; `{0}`, `{1}` are replaced by the parameters.
    fn template(self) -> &'static str {
        match self {
            MessageKey::NullCollectionElement => "Ignored an empty element in a collection of {0}.",
            MessageKey::NullValue => "Ignored the empty value of {0}.",
            MessageKey::UnknownCodeValue => "\"{1}\" is not a value of {0}.",
            MessageKey::UnrecognizedLocale => "Ignored a text in unrecognized locale \"{0}\".",
            MessageKey::DuplicatedLocale => "Ignored a second text for locale \"{0}\".",
            MessageKey::UnparsableValue => "Cannot parse \"{1}\" as the value of {0}.",
            MessageKey::ValueTruncated => "Only the first value of {0}.{1} has been kept.",
            MessageKey::PropertyNotRepresentable => {
                "Property {0}.{1} cannot be represented in this dialect."
            }
            MessageKey::UnexpectedElement => "Ignored unexpected element {1} in {0}.",
            MessageKey::DuplicateIdentifier => "Identifier \"{0}\" is declared more than once.",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recoverable anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub key: MessageKey,
    pub params: Vec<String>,
}

impl Warning {
    pub fn new<I, S>(key: MessageKey, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key,
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> String {
        let mut message = self.key.template().to_string();
        for (i, param) in self.params.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), param);
        }
        message
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message())
    }
}

/// Receives warnings as they are found.
///
/// Closures taking a `&Warning` are listeners:
///
/// ```
/// use isomd_xml::{Warning, WarningListener};
///
/// let mut seen = Vec::new();
/// let mut listener = |w: &Warning| seen.push(w.key);
/// let listener: &mut dyn WarningListener = &mut listener;
/// # let _ = listener;
/// ```
pub trait WarningListener {
    fn warning(&mut self, warning: &Warning);
}

impl<F> WarningListener for F
where
    F: FnMut(&Warning),
{
    fn warning(&mut self, warning: &Warning) {
        self(warning)
    }
}

/// Collects the warnings of one call and forwards them to the listener.
pub(crate) struct Warnings<'l> {
    collected: Vec<Warning>,
    listener: Option<&'l mut dyn WarningListener>,
}

impl<'l> Warnings<'l> {
    pub(crate) fn new(listener: Option<&'l mut dyn WarningListener>) -> Self {
        Self {
            collected: Vec::new(),
            listener,
        }
    }

    pub(crate) fn emit<I, S>(&mut self, key: MessageKey, params: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let warning = Warning::new(key, params);
        match self.listener.as_mut() {
            Some(listener) => listener.warning(&warning),
            None => tracing::debug!(key = %warning.key, "{}", warning.message()),
        }
        self.collected.push(warning);
    }

    pub(crate) fn into_vec(self) -> Vec<Warning> {
        self.collected
    }
}
