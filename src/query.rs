//! Query URLs for slovnik.seznam.cz. Fetching the page is left to the caller.

use crate::error::{Result, ScanError};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Source language of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Cz,
    Ru,
}

impl Language {
    pub fn base_url(self) -> &'static str {
        match self {
            Language::Cz => "https://slovnik.seznam.cz/cz-ru/",
            Language::Ru => "https://slovnik.seznam.cz/ru/",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Language::Cz => write!(f, "cz"),
            Language::Ru => write!(f, "ru"),
        }
    }
}

impl FromStr for Language {
    type Err = ScanError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "cz" | "cs" => Ok(Language::Cz),
            "ru" => Ok(Language::Ru),
            other => Err(ScanError::UnknownLanguage(other.to_string())),
        }
    }
}

/// Full result-page URL for `word`, always requesting the long view.
pub fn query_url(word: &str, language: Language) -> Result<Url> {
    let mut url = Url::parse(language.base_url())?;
    url.query_pairs_mut()
        .append_pair("q", word)
        .append_pair("shortView", "0");
    Ok(url)
}
