//! Markup plumbing: builds the document tree with html5ever, locates the
//! results container and flattens its subtree into a flat event stream.
//!
//! The walkers never look at the tree. They only see `Event`s in document
//! order, the same shape a streaming tokenizer would produce.

use crate::error::Result;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, Attribute};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::io::Read;

pub const RESULTS_ID: &str = "results";

/// Elements serialized without an end tag. They surface as `SelfClosing`.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Attribute list of an element with name lookup.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Attributes(pairs)
    }

    fn from_html(attrs: &[Attribute]) -> Self {
        Attributes(
            attrs
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect(),
        )
    }

    /// Value of the named attribute, or "" when absent.
    pub fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn id(&self) -> &str {
        self.get("id")
    }

    pub fn class(&self) -> &str {
        self.get("class")
    }

    pub fn lang(&self) -> &str {
        self.get("lang")
    }

    /// True if `name` is one of the whitespace-separated class tokens.
    pub fn has_class(&self, name: &str) -> bool {
        self.class().split_whitespace().any(|c| c == name)
    }
}

/// One token of the flattened markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start { tag: String, attrs: Attributes },
    End { tag: String },
    SelfClosing { tag: String, attrs: Attributes },
    Text(String),
}

impl Event {
    pub fn is_start(&self, name: &str) -> bool {
        matches!(self, Event::Start { tag, .. } if tag == name)
    }

    pub fn is_end(&self, name: &str) -> bool {
        matches!(self, Event::End { tag } if tag == name)
    }
}

/// The results container found in a page.
#[derive(Debug)]
pub struct Container {
    pub attrs: Attributes,
    pub events: Vec<Event>,
}

/// Parse a whole page into a tree. Invalid UTF-8 is replaced, so only read
/// failures surface as errors.
pub fn parse_tree<R: Read>(mut reader: R) -> Result<RcDom> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut reader)?;
    Ok(dom)
}

fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn element_attrs(node: &Handle) -> Attributes {
    match &node.data {
        NodeData::Element { attrs, .. } => Attributes::from_html(&attrs.borrow()),
        _ => Attributes::default(),
    }
}

/// Pre-order search for the first `div` whose id is `results`.
pub fn find_results(node: &Handle) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if element_name(child).as_deref() == Some("div") && element_attrs(child).id() == RESULTS_ID {
            return Some(child.clone());
        }
        if let Some(found) = find_results(child) {
            return Some(found);
        }
    }
    None
}

/// Emit the events of `node` and everything below it, in document order.
pub fn flatten(node: &Handle, events: &mut Vec<Event>) {
    match &node.data {
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string();
            let attrs = Attributes::from_html(&attrs.borrow());
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                events.push(Event::SelfClosing { tag, attrs });
                return;
            }
            events.push(Event::Start { tag: tag.clone(), attrs });
            for child in node.children.borrow().iter() {
                flatten(child, events);
            }
            events.push(Event::End { tag });
        }
        NodeData::Text { contents } => {
            events.push(Event::Text(contents.borrow().to_string()));
        }
        NodeData::Document => {
            for child in node.children.borrow().iter() {
                flatten(child, events);
            }
        }
        _ => {}
    }
}

/// Read a page and return its results container as an event stream.
/// `None` means the page parsed but has no results area.
pub fn locate_container<R: Read>(reader: R) -> Result<Option<Container>> {
    let dom = parse_tree(reader)?;
    let results = match find_results(&dom.document) {
        Some(node) => node,
        None => {
            log::debug!("no #{} container in page", RESULTS_ID);
            return Ok(None);
        }
    };

    let mut events = Vec::new();
    flatten(&results, &mut events);
    log::debug!("results container flattened into {} events", events.len());

    Ok(Some(Container {
        attrs: element_attrs(&results),
        events,
    }))
}

#[cfg(test)]
mod markup_tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        Attributes::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn attribute_lookup() {
        let a = attrs(&[("id", "results"), ("class", "transl"), ("lang", "cs")]);
        assert_eq!(a.id(), "results");
        assert_eq!(a.class(), "transl");
        assert_eq!(a.lang(), "cs");
        assert_eq!(a.get("href"), "");
    }

    #[test]
    fn class_tokens() {
        let a = attrs(&[("class", "other-meaning  wide")]);
        assert!(a.has_class("other-meaning"));
        assert!(a.has_class("wide"));
        assert!(!a.has_class("other"));
        assert!(!Attributes::default().has_class("morf"));
    }

    #[test]
    fn finds_first_results_div() {
        let html = r#"<html><body>
            <span id="results">not a div</span>
            <div id="wrap"><div id="results" class="transl"><h3>first</h3></div></div>
            <div id="results" class="second"></div>
        </body></html>"#;
        let container = locate_container(html.as_bytes()).unwrap().unwrap();
        assert_eq!(container.attrs.class(), "transl");
        assert!(container.events[0].is_start("div"));
        assert!(container.events.last().unwrap().is_end("div"));
    }

    #[test]
    fn missing_container() {
        let html = "<html><body><div id=\"content\">nothing</div></body></html>";
        assert!(locate_container(html.as_bytes()).unwrap().is_none());
    }

    #[test]
    fn flatten_emits_document_order() {
        let html = r#"<div id="results"><p class="x">a<br>b</p><a href="/">c</a></div>"#;
        let container = locate_container(html.as_bytes()).unwrap().unwrap();
        let expected = vec![
            Event::Start { tag: "div".into(), attrs: attrs(&[("id", "results")]) },
            Event::Start { tag: "p".into(), attrs: attrs(&[("class", "x")]) },
            Event::Text("a".into()),
            Event::SelfClosing { tag: "br".into(), attrs: Attributes::default() },
            Event::Text("b".into()),
            Event::End { tag: "p".into() },
            Event::Start { tag: "a".into(), attrs: attrs(&[("href", "/")]) },
            Event::Text("c".into()),
            Event::End { tag: "a".into() },
            Event::End { tag: "div".into() },
        ];
        assert_eq!(container.events, expected);
    }

    #[test]
    fn entities_are_decoded() {
        let html = r#"<div id="results"><span>a &amp; b</span></div>"#;
        let container = locate_container(html.as_bytes()).unwrap().unwrap();
        assert_eq!(container.events[2], Event::Text("a & b".into()));
    }

    #[test]
    fn comments_are_dropped() {
        let html = r#"<div id="results"><!-- ad --><a>x</a></div>"#;
        let container = locate_container(html.as_bytes()).unwrap().unwrap();
        assert_eq!(container.events.len(), 5);
    }

    #[test]
    fn read_failure_is_an_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "connection reset"))
            }
        }
        assert!(matches!(
            locate_container(Broken),
            Err(crate::error::ScanError::Io(_))
        ));
    }
}
