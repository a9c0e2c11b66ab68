//! Page-level entry points: locate the results container, decide which page
//! shape was returned and run the matching walker.

use crate::error::Result;
use crate::labels::{LabelTable, DEFAULT_LABELS};
use crate::markup::locate_container;
use crate::walker::{walk_entries, walk_suggestions};
use crate::word::Word;
use serde::Serialize;
use std::io::Read;

/// Class of the results container on a full entry page.
pub const TRANSLATION_CLASS: &str = "transl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Full dictionary entry for a correctly spelled query.
    Entry,
    /// "Did you mean" list for a misspelled query.
    Suggestions,
    /// No results container at all.
    Missing,
}

impl PageKind {
    pub fn classify(container_class: &str) -> Self {
        if container_class == TRANSLATION_CLASS {
            PageKind::Entry
        } else {
            PageKind::Suggestions
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub kind: PageKind,
    pub words: Vec<Word>,
}

/// Parse a page and report its shape along with the extracted words.
pub fn parse_document<R: Read>(reader: R, labels: &LabelTable) -> Result<ParsedPage> {
    let container = match locate_container(reader)? {
        Some(container) => container,
        None => {
            return Ok(ParsedPage {
                kind: PageKind::Missing,
                words: vec![],
            })
        }
    };

    let kind = PageKind::classify(container.attrs.class());
    log::debug!("results container class {:?} -> {:?}", container.attrs.class(), kind);

    let words = match kind {
        PageKind::Entry => walk_entries(&container.events, labels),
        _ => walk_suggestions(&container.events),
    };
    log::debug!("{:?} page produced {} words", kind, words.len());

    Ok(ParsedPage { kind, words })
}

/// Parse a page with the built-in Czech block labels.
pub fn parse_page<R: Read>(reader: R) -> Result<Vec<Word>> {
    parse_page_with(reader, &DEFAULT_LABELS)
}

pub fn parse_page_with<R: Read>(reader: R, labels: &LabelTable) -> Result<Vec<Word>> {
    Ok(parse_document(reader, labels)?.words)
}
