//! Document and window access behind traits.
//!
//! Every controller is written against [`Dom`] and [`Window`], never against
//! `web_sys` directly. The browser implementation lives in `web::dom`
//! (wasm only); [`memory`] provides an in-memory
//! document that records every mutation, used by the test suite and by
//! anything that wants to drive the page logic headless.
//!
//! | Concern | Trait method |
//! |---|---|
//! | Element lookup | [`Dom::element_by_id`], [`Dom::query_all`], [`Dom::query_within`] |
//! | Text & attributes | [`Dom::text_content`], [`Dom::set_text_content`], [`Dom::attribute`], [`Dom::set_attribute`] |
//! | Classes | [`Dom::has_class`], [`Dom::add_class`], [`Dom::remove_class`] |
//! | Inline styles | [`Dom::style`], [`Dom::set_style`] |
//! | Layout | [`Dom::offset_top`], [`Dom::offset_height`] |
//! | Viewport | [`Window::scroll_y`], [`Window::scroll_to`] |
//! | Navigation | [`Window::open`], [`Window::navigate`] |

pub mod memory;

use crate::language::Language;
use std::fmt;
use thiserror::Error;

pub use memory::{Element, MemoryDom, MemoryWindow, NodeId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpenError {
    #[error("window.open failed: {0}")]
    Script(String),
}

/// Element selector, kept structured so the in-memory document can match it
/// without a CSS engine. [`Query::to_selector`] renders the CSS equivalent
/// for the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `.class`
    Class(String),
    /// `tag`
    Tag(String),
    /// `tag[id]`
    TagWithId(String),
    /// Elements carrying every per-language text attribute.
    Translatable,
    /// `ancestor descendant`
    Descendant(Box<Query>, Box<Query>),
}

impl Query {
    pub fn class(name: &str) -> Self {
        Query::Class(name.to_string())
    }

    pub fn tag(name: &str) -> Self {
        Query::Tag(name.to_string())
    }

    pub fn descendant(ancestor: Query, descendant: Query) -> Self {
        Query::Descendant(Box::new(ancestor), Box::new(descendant))
    }

    /// CSS selector text for `querySelectorAll`.
    pub fn to_selector(&self) -> String {
        match self {
            Query::Class(name) => format!(".{name}"),
            Query::Tag(name) => name.clone(),
            Query::TagWithId(name) => format!("{name}[id]"),
            Query::Translatable => Language::ALL
                .iter()
                .map(|lang| format!("[{}]", lang.attribute()))
                .collect(),
            Query::Descendant(ancestor, descendant) => {
                format!("{} {}", ancestor.to_selector(), descendant.to_selector())
            }
        }
    }
}

/// How [`Window::scroll_to`] moves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Read/write access to the page's element tree.
///
/// Setters take `&mut self` even though the browser implementation could make
/// do with `&self`; it keeps the in-memory document free of interior
/// mutability and makes mutation points visible at call sites.
pub trait Dom {
    type Node: Clone + PartialEq + fmt::Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// `<html>`.
    fn document_element(&self) -> Option<Self::Node>;

    fn body(&self) -> Option<Self::Node>;

    /// All matches in document order.
    fn query_all(&self, query: &Query) -> Vec<Self::Node>;

    fn query_first(&self, query: &Query) -> Option<Self::Node> {
        self.query_all(query).into_iter().next()
    }

    /// Matches among the strict descendants of `scope`, in document order.
    fn query_within(&self, scope: &Self::Node, query: &Query) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Concatenated text of the node and its descendants.
    fn text_content(&self, node: &Self::Node) -> String;

    /// Replace the node's children with a single text node.
    fn set_text_content(&mut self, node: &Self::Node, text: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Flip `class` and return whether it is now present.
    fn toggle_class(&mut self, node: &Self::Node, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Inline style value (CSS property name), empty when unset.
    fn style(&self, node: &Self::Node, property: &str) -> String;

    /// Set an inline style. An empty value removes the property.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    fn offset_top(&self, node: &Self::Node) -> f64;

    fn offset_height(&self, node: &Self::Node) -> f64;

    fn focus(&mut self, node: &Self::Node);

    /// Append a `<style>` element with `css` to the document head.
    fn append_style_sheet(&mut self, css: &str);
}

/// Window-level state and effects.
pub trait Window {
    /// Vertical scroll offset in CSS pixels.
    fn scroll_y(&self) -> f64;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Open `url` in a new browsing context. `Ok(false)` means the popup was
    /// blocked.
    fn open(&mut self, url: &str) -> Result<bool, OpenError>;

    /// Navigate the current browsing context to `url`.
    fn navigate(&mut self, url: &str);

    /// Monotonic-enough clock in milliseconds.
    fn now_ms(&self) -> f64;

    fn current_year(&self) -> i32;
}
