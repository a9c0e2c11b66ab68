//! # slovnik-scanner
//!
//! Extracts dictionary entries from slovnik.seznam.cz result pages.
//!
//! A page is either a full entry (`class="transl"` on the results container)
//! or a "did you mean" list of candidate words. Both shapes are turned into
//! an ordered list of [`Word`] records:
//!
//! ```no_run
//! let html = std::fs::File::open("hlavni.html")?;
//! for word in slovnik_scanner::parse_page(html)? {
//!     println!("{} -> {:?}", word.word, word.translations);
//! }
//! # Ok::<(), slovnik_scanner::ScanError>(())
//! ```

pub mod error;
pub mod labels;
pub mod markup;
pub mod page;
pub mod parallel;
pub mod query;
pub mod walker;
pub mod word;

pub use error::{Result, ScanError};
pub use labels::{LabelTable, DEFAULT_LABELS};
pub use page::{parse_document, parse_page, parse_page_with, PageKind, ParsedPage};
pub use query::{query_url, Language};
pub use word::{BlockKind, SampleUse, Word};
