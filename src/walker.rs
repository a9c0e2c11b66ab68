//! Event-stream walkers that turn a flattened results container into words.
//!
//! Two top-level walkers exist, one per page shape. The entry walker hands
//! bounded regions (quick translations, usage samples, labeled word lists)
//! to sub-walks that share its `Cursor`: a sub-walk consumes events up to and
//! including the closing tag of its region, and the outer scan resumes from
//! wherever the cursor was left.

use crate::labels::LabelTable;
use crate::markup::Event;
use crate::word::{BlockKind, SampleUse, Word};

pub const MORF_CLASS: &str = "morf";
pub const COMMA_CLASS: &str = "comma";
pub const OTHER_MEANING_CLASS: &str = "other-meaning";
pub const FULLTEXT_CLASS: &str = "fulltext";
pub const FAST_MEANINGS_ID: &str = "fastMeanings";

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Read position in a shared event slice.
pub struct Cursor<'a> {
    events: &'a [Event],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(events: &'a [Event]) -> Self {
        Cursor { events, pos: 0 }
    }

    pub fn next(&mut self) -> Option<&'a Event> {
        let event = self.events.get(self.pos)?;
        self.pos += 1;
        Some(event)
    }

    /// The most recently consumed event.
    pub fn last(&self) -> Option<&'a Event> {
        self.pos.checked_sub(1).and_then(|i| self.events.get(i))
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.events.len()
    }
}

/// Tracks nesting of the element a sub-walk was started on, so a nested
/// element with the same tag does not end the region early.
struct Region<'t> {
    tag: &'t str,
    depth: usize,
}

impl<'t> Region<'t> {
    fn new(tag: &'t str) -> Self {
        Region { tag, depth: 1 }
    }

    /// True once `event` is the end tag matching the region's opening tag.
    fn closes(&mut self, event: &Event) -> bool {
        match event {
            Event::Start { tag, .. } if tag == self.tag => {
                self.depth += 1;
                false
            }
            Event::End { tag } if tag == self.tag => {
                self.depth -= 1;
                self.depth == 0
            }
            _ => false,
        }
    }
}

fn after_start(prev: Option<&Event>, name: &str) -> bool {
    prev.map_or(false, |e| e.is_start(name))
}

// ─────────────────────────────────────────────────────────────────────────────
// Suggestion pages
// ─────────────────────────────────────────────────────────────────────────────

/// Pair every candidate link with the translation span that follows it.
pub fn walk_suggestions(events: &[Event]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut prev: Option<&Event> = None;

    for event in events {
        if let Event::Text(text) = event {
            let text = text.trim();
            if !text.is_empty() {
                if after_start(prev, "a") {
                    words.push(Word::new(text));
                } else if after_start(prev, "span") {
                    match words.last_mut() {
                        Some(word) => word.add_translation(text),
                        None => log::trace!("translation {:?} before any candidate", text),
                    }
                }
            }
        }
        prev = Some(event);
    }

    words
}

// ─────────────────────────────────────────────────────────────────────────────
// Full entry pages
// ─────────────────────────────────────────────────────────────────────────────

/// Walk a full entry page. New words start at language-tagged headings;
/// everything else is attached to the most recent word.
pub fn walk_entries(events: &[Event], labels: &LabelTable) -> Vec<Word> {
    let mut cursor = Cursor::new(events);
    let mut words: Vec<Word> = Vec::new();
    let mut pending_block = String::new();
    // Receives regions that show up before the first heading.
    let mut orphan = Word::default();

    loop {
        // After a sub-walk this is the closing tag of its region.
        let prev = cursor.last();
        let Some(event) = cursor.next() else {
            break;
        };

        match event {
            Event::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    // whitespace between tags
                } else if let Some(Event::Start { tag, attrs }) = prev {
                    if HEADINGS.contains(&tag.as_str()) && !attrs.lang().is_empty() {
                        words.push(Word::new(text));
                    } else if tag == "span" && attrs.has_class(MORF_CLASS) {
                        if let Some(word) = words.last_mut() {
                            word.set_word_type(text);
                        }
                    } else if tag == "p" && attrs.has_class(MORF_CLASS) {
                        pending_block = text.to_string();
                    }
                }
            }

            Event::Start { tag, attrs } => {
                let current = match words.last_mut() {
                    Some(word) => word,
                    None => &mut orphan,
                };

                if tag == "div" && attrs.id() == FAST_MEANINGS_ID {
                    extract_translations(&mut cursor, tag, current);
                } else if attrs.has_class(FULLTEXT_CLASS) {
                    let sample = extract_sample(&mut cursor, tag);
                    current.add_sample(sample);
                } else if attrs.has_class(OTHER_MEANING_CLASS) {
                    match labels.resolve(&pending_block) {
                        Some(kind) => {
                            extract_block(&mut cursor, tag, current, kind);
                            pending_block.clear();
                        }
                        None => log::trace!(
                            "skipping {} block with unknown label {:?}",
                            OTHER_MEANING_CLASS,
                            pending_block
                        ),
                    }
                }
            }

            _ => {}
        }
    }

    if orphan != Word::default() {
        log::debug!("discarded content found before the first entry heading");
    }

    words
}

/// Quick translations: span texts are whole translations, consecutive link
/// texts are fragments of one translation.
pub fn extract_translations(cursor: &mut Cursor<'_>, container: &str, word: &mut Word) {
    log::trace!("translation group at event {}", cursor.position());
    let mut region = Region::new(container);
    let mut prev: Option<&Event> = None;
    let mut prev_closing: Option<&Event> = None;

    while let Some(event) = cursor.next() {
        if region.closes(event) {
            return;
        }

        match event {
            Event::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    // whitespace between tags
                } else if let Some(Event::Start { tag, attrs }) = prev {
                    if tag == "span" && !attrs.has_class(COMMA_CLASS) {
                        word.add_translation(text);
                    } else if tag == "a" {
                        if prev_closing.map_or(false, |e| e.is_end("a")) {
                            word.extend_last_translation(text);
                        } else {
                            word.add_translation(text);
                        }
                    }
                }
            }
            Event::End { .. } | Event::SelfClosing { .. } => prev_closing = Some(event),
            Event::Start { .. } => {}
        }

        prev = Some(event);
    }
}

/// One usage sample: link text is the keyword, the first span the phrase and
/// the text after the second closed span the translation.
pub fn extract_sample(cursor: &mut Cursor<'_>, container: &str) -> SampleUse {
    log::trace!("sample list at event {}", cursor.position());
    let mut region = Region::new(container);
    let mut prev: Option<&Event> = None;
    let mut spans_closed = 0usize;
    let mut sample = SampleUse::default();

    while let Some(event) = cursor.next() {
        if region.closes(event) {
            break;
        }

        match event {
            Event::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    if after_start(prev, "a") {
                        sample.keyword = text.to_string();
                    }
                    if after_start(prev, "span") && spans_closed == 0 {
                        sample.phrase = text.to_string();
                    }
                    if spans_closed == 2 && sample.translation.is_empty() {
                        sample.translation = text.to_string();
                    }
                }
            }
            Event::End { tag } if tag == "span" => spans_closed += 1,
            _ => {}
        }

        prev = Some(event);
    }

    sample
}

/// Labeled word list: every link text goes to the list chosen by `kind`.
pub fn extract_block(cursor: &mut Cursor<'_>, container: &str, word: &mut Word, kind: BlockKind) {
    log::trace!("{:?} block at event {}", kind, cursor.position());
    let mut region = Region::new(container);
    let mut prev: Option<&Event> = None;

    while let Some(event) = cursor.next() {
        if region.closes(event) {
            return;
        }

        if let Event::Text(text) = event {
            let text = text.trim();
            if !text.is_empty() && after_start(prev, "a") {
                word.add_related(kind, text);
            }
        }

        prev = Some(event);
    }
}
