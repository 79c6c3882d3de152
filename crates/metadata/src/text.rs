//! Free text with locale-tagged translations.
//!
//! ISO 19115 character strings may be accompanied by any number of localized
//! renderings. [`InternationalString`] keeps the default text together with
//! a map of translations keyed by [`Locale`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// ISO 639-1 / ISO 639-2/T pairs for the languages we know how to convert.
///
/// ISO 639-2/B synonyms (`fre`, `ger`, ...) are listed after the
/// terminological code so that both resolve to the same language.
const LANGUAGES: &[(&str, &str)] = &[
    ("ar", "ara"),
    ("cs", "ces"),
    ("cs", "cze"),
    ("da", "dan"),
    ("de", "deu"),
    ("de", "ger"),
    ("el", "ell"),
    ("el", "gre"),
    ("en", "eng"),
    ("es", "spa"),
    ("fi", "fin"),
    ("fr", "fra"),
    ("fr", "fre"),
    ("it", "ita"),
    ("ja", "jpn"),
    ("ko", "kor"),
    ("nl", "nld"),
    ("nl", "dut"),
    ("no", "nor"),
    ("pl", "pol"),
    ("pt", "por"),
    ("ru", "rus"),
    ("sv", "swe"),
    ("tr", "tur"),
    ("zh", "zho"),
    ("zh", "chi"),
];

/// A language tag with an optional region, e.g. `en` or `fr-CA`.
///
/// The language is stored as ISO 639-1 when a two-letter code exists for it,
/// so `eng` and `en` designate the same locale.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Locale(String);

impl Locale {
    /// Parses a language tag such as `en`, `eng`, `fr_CA` or `pt-BR`.
    ///
    /// Returns `None` if the tag is not made of a 2 or 3 letter language
    /// code optionally followed by a 2 letter or 3 digit region.
    pub fn parse(tag: &str) -> Option<Locale> {
        let mut parts = tag.trim().split(['-', '_']);
        let language = parts.next()?;
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }
        let mut language = language.to_ascii_lowercase();
        if language.len() == 3 {
            if let Some((two, _)) = LANGUAGES.iter().find(|(_, three)| *three == language) {
                language = (*two).to_string();
            }
        }
        match (parts.next(), parts.next()) {
            (None, _) => Some(Locale(language)),
            (Some(region), None) => {
                let valid = (region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()))
                    || (region.len() == 3 && region.chars().all(|c| c.is_ascii_digit()));
                valid.then(|| Locale(format!("{}-{}", language, region.to_ascii_uppercase())))
            }
            _ => None,
        }
    }

    /// The language part of this locale.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// The region part of this locale, if any.
    pub fn region(&self) -> Option<&str> {
        self.0.split_once('-').map(|(_, region)| region)
    }

    /// The ISO 639-2/T code of the language, or the stored code when no
    /// three-letter equivalent is known.
    pub fn iso3_language(&self) -> &str {
        let language = self.language();
        LANGUAGES
            .iter()
            .find(|(two, _)| *two == language)
            .map(|(_, three)| *three)
            .unwrap_or(language)
    }

    /// The tag in `language[-REGION]` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s).ok_or_else(|| format!("invalid locale: {}", s))
    }
}

/// A character string with optional localized renderings.
///
/// The default text is always present; translations are unique per locale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InternationalString {
    text: String,
    translations: BTreeMap<Locale, String>,
}

impl InternationalString {
    /// Creates a string without translations.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            translations: BTreeMap::new(),
        }
    }

    /// Builds a string from translations only. The first translation becomes
    /// the default text. Returns `None` if `translations` is empty.
    pub fn from_translations<I, S>(translations: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Locale, S)>,
        S: Into<String>,
    {
        let mut result: Option<InternationalString> = None;
        for (locale, text) in translations {
            let text = text.into();
            match result.as_mut() {
                Some(string) => {
                    string.add_translation(locale, text);
                }
                None => {
                    let mut string = InternationalString::new(text.clone());
                    string.add_translation(locale, text);
                    result = Some(string);
                }
            }
        }
        result
    }

    /// Adds a translation, builder style. An existing translation for the
    /// same locale is kept.
    pub fn with_translation(mut self, locale: Locale, text: impl Into<String>) -> Self {
        self.add_translation(locale, text);
        self
    }

    /// Adds a translation unless one already exists for `locale`.
    ///
    /// Returns `false` if the locale was already present.
    pub fn add_translation(&mut self, locale: Locale, text: impl Into<String>) -> bool {
        if self.translations.contains_key(&locale) {
            return false;
        }
        self.translations.insert(locale, text.into());
        true
    }

    /// The default text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The translation for `locale`, if any.
    pub fn translation(&self, locale: &Locale) -> Option<&str> {
        self.translations.get(locale).map(String::as_str)
    }

    /// All translations, ordered by locale.
    pub fn translations(&self) -> impl Iterator<Item = (&Locale, &str)> {
        self.translations.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn has_translations(&self) -> bool {
        !self.translations.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.translations.is_empty()
    }
}

impl fmt::Display for InternationalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for InternationalString {
    fn from(text: &str) -> Self {
        InternationalString::new(text)
    }
}

impl From<String> for InternationalString {
    fn from(text: String) -> Self {
        InternationalString::new(text)
    }
}
