use serde::{Deserialize, Serialize};

/// One dictionary entry as it appears on a result page.
/// Serialized with camelCase keys (`wordType`, `derivedWords`).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
    #[serde(default)]
    pub translations: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub derived_words: Vec<String>,
    #[serde(default)]
    pub samples: Vec<SampleUse>,
}

/// Example usage of a word: the highlighted keyword, the whole phrase
/// and its translation. Fields the page did not provide stay empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleUse {
    pub keyword: String,
    pub phrase: String,
    pub translation: String,
}

/// Which list of a word a labeled "other meaning" block feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Synonyms,
    Antonyms,
    DerivedWords,
}

impl Word {
    pub fn new(word: &str) -> Self {
        Word {
            word: word.trim().to_string(),
            ..Default::default()
        }
    }

    /// Word type is taken from the first label only.
    pub fn set_word_type(&mut self, word_type: &str) {
        if self.word_type.is_none() {
            self.word_type = Some(word_type.trim().to_string());
        }
    }

    pub fn add_translation(&mut self, translation: &str) {
        self.translations.push(translation.to_string());
    }

    /// Glue a fragment onto the last translation with a single space.
    /// Starts a new translation when there is nothing to extend.
    pub fn extend_last_translation(&mut self, fragment: &str) {
        match self.translations.last_mut() {
            Some(last) => {
                last.push(' ');
                last.push_str(fragment);
            }
            None => self.add_translation(fragment),
        }
    }

    pub fn add_related(&mut self, kind: BlockKind, text: &str) {
        let list = match kind {
            BlockKind::Synonyms => &mut self.synonyms,
            BlockKind::Antonyms => &mut self.antonyms,
            BlockKind::DerivedWords => &mut self.derived_words,
        };
        list.push(text.to_string());
    }

    pub fn add_sample(&mut self, sample: SampleUse) {
        self.samples.push(sample);
    }
}
