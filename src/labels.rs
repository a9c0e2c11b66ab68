//! Header labels that name the "other meaning" blocks of an entry.
//!
//! The result page announces every synonym, antonym and derived-word list with a
//! localized header paragraph. The table below maps that header text to the list
//! the following block feeds. The built-in table carries the Czech labels used by
//! slovnik.seznam.cz; a different table can be loaded from YAML:
//!
//! ```yaml
//! synonyms: [Synonyma]
//! antonyms: [Antonyma]
//! derived_words: [Odvozená slova]
//! ```

use crate::error::Result;
use crate::word::BlockKind;
use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

pub const SYNONYMS_HEADER: &str = "Synonyma";
pub const ANTONYMS_HEADER: &str = "Antonyma";
pub const DERIVED_WORDS_HEADER: &str = "Odvozená slova";

#[derive(Debug, Deserialize)]
struct LabelsSchema {
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
    #[serde(default)]
    derived_words: Vec<String>,
}

/// Read-only mapping from header text to block kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: HashMap<String, BlockKind>,
}

lazy_static! {
    pub static ref DEFAULT_LABELS: LabelTable = LabelTable::from_schema(LabelsSchema {
        synonyms: vec![SYNONYMS_HEADER.to_string()],
        antonyms: vec![ANTONYMS_HEADER.to_string()],
        derived_words: vec![DERIVED_WORDS_HEADER.to_string()],
    });
}

/// Header text is compared trimmed, NFC-composed and lowercased, so a label
/// written with combining accents still matches.
fn normalize_label(label: &str) -> String {
    label.trim().nfc().collect::<String>().to_lowercase()
}

impl LabelTable {
    fn from_schema(schema: LabelsSchema) -> Self {
        let mut labels = HashMap::new();
        let groups = [
            (schema.synonyms, BlockKind::Synonyms),
            (schema.antonyms, BlockKind::Antonyms),
            (schema.derived_words, BlockKind::DerivedWords),
        ];
        for (variants, kind) in groups {
            for variant in variants {
                labels.insert(normalize_label(&variant), kind);
            }
        }
        LabelTable { labels }
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let schema: LabelsSchema = serde_yaml::from_str(contents)?;
        Ok(Self::from_schema(schema))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn resolve(&self, label: &str) -> Option<BlockKind> {
        self.labels.get(&normalize_label(label)).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        DEFAULT_LABELS.clone()
    }
}
