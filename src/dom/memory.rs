//! In-memory document and window.
//!
//! A small arena-backed element tree that implements [`Dom`], plus a
//! [`MemoryWindow`] that records scrolls, opened URLs and navigations instead
//! of performing them. Layout is not computed: tests place sections with
//! [`Element::layout`] and the controllers read those offsets back.
//!
//! ```rust
//! use portfolio_behavior::dom::{Dom, Element, MemoryDom};
//!
//! let mut dom = MemoryDom::new();
//! let body = dom.body_id();
//! let title = dom.append(body, Element::new("h1").translated("مرحبا", "Hello"));
//! assert_eq!(dom.attribute(&title, "data-en").as_deref(), Some("Hello"));
//! ```

use super::{Dom, OpenError, Query, ScrollBehavior, Window};
use crate::language::Language;
use std::collections::BTreeMap;

/// Handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Builder describing an element to append.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    offset_top: f64,
    offset_height: f64,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Own text, rendered before any children.
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Both per-language attributes, with the Arabic text as initial content.
    pub fn translated(self, ar: &str, en: &str) -> Self {
        self.attr(Language::Ar.attribute(), ar)
            .attr(Language::En.attribute(), en)
            .text(ar)
    }

    /// `offsetTop` / `offsetHeight` reported for this element.
    pub fn layout(mut self, top: f64, height: f64) -> Self {
        self.offset_top = top;
        self.offset_height = height;
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    offset_top: f64,
    offset_height: f64,
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self {
            tag: el.tag,
            classes: el.classes,
            attributes: el.attributes,
            styles: BTreeMap::new(),
            text: el.text,
            children: Vec::new(),
            parent: None,
            offset_top: el.offset_top,
            offset_height: el.offset_height,
        }
    }
}

/// Arena-backed document: `<html>` with `<head>` and `<body>` children.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    focused: Option<NodeId>,
    style_sheets: Vec<String>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: vec![Node::from(Element::new("html"))],
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            focused: None,
            style_sheets: Vec::new(),
        };
        dom.head = dom.append(dom.root, Element::new("head"));
        dom.body = dom.append(dom.root, Element::new("body"));
        dom
    }

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::from(element);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn head_id(&self) -> NodeId {
        self.head
    }

    pub fn body_id(&self) -> NodeId {
        self.body
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn style_sheets(&self) -> &[String] {
        &self.style_sheets
    }

    pub fn set_layout(&mut self, node: NodeId, top: f64, height: f64) {
        let n = &mut self.nodes[node.0];
        n.offset_top = top;
        n.offset_height = height;
    }

    /// Pre-order walk from `from`, `from` included.
    fn walk(&self, from: NodeId, out: &mut Vec<NodeId>) {
        out.push(from);
        for &child in &self.nodes[from.0].children {
            self.walk(child, out);
        }
    }

    fn matches(&self, id: NodeId, query: &Query) -> bool {
        let node = &self.nodes[id.0];
        match query {
            Query::Class(name) => node.classes.iter().any(|c| c == name),
            Query::Tag(tag) => node.tag == *tag,
            Query::TagWithId(tag) => node.tag == *tag && node.attributes.contains_key("id"),
            Query::Translatable => Language::ALL
                .iter()
                .all(|lang| node.attributes.contains_key(lang.attribute())),
            Query::Descendant(ancestor, descendant) => {
                self.matches(id, descendant) && self.has_ancestor_matching(id, ancestor)
            }
        }
    }

    fn has_ancestor_matching(&self, id: NodeId, query: &Query) -> bool {
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            if self.matches(parent, query) {
                return true;
            }
            current = self.nodes[parent.0].parent;
        }
        false
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut all = Vec::new();
        self.walk(self.root, &mut all);
        all.into_iter()
            .find(|n| self.nodes[n.0].attributes.get("id").map(String::as_str) == Some(id))
    }

    fn document_element(&self) -> Option<NodeId> {
        Some(self.root)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn query_all(&self, query: &Query) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.walk(self.root, &mut all);
        all.into_iter().filter(|&n| self.matches(n, query)).collect()
    }

    fn query_within(&self, scope: &NodeId, query: &Query) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.walk(*scope, &mut all);
        all.into_iter()
            .skip(1)
            .filter(|&n| self.matches(n, query))
            .collect()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let n = &self.nodes[node.0];
        if name == "class" {
            return (!n.classes.is_empty()).then(|| n.classes.join(" "));
        }
        n.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn text_content(&self, node: &NodeId) -> String {
        let n = &self.nodes[node.0];
        let mut text = n.text.clone();
        for child in &n.children {
            text.push_str(&self.text_content(child));
        }
        text
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.nodes[node.0].text = text.to_string();
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.0].classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    fn style(&self, node: &NodeId, property: &str) -> String {
        self.nodes[node.0]
            .styles
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        let styles = &mut self.nodes[node.0].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.nodes[node.0].offset_top
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.nodes[node.0].offset_height
    }

    fn focus(&mut self, node: &NodeId) {
        self.focused = Some(*node);
    }

    fn append_style_sheet(&mut self, css: &str) {
        self.append(self.head, Element::new("style").text(css));
        self.style_sheets.push(css.to_string());
    }
}

/// What [`MemoryWindow::open`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupPolicy {
    #[default]
    Allow,
    Block,
    Fail,
}

/// Window double that records effects instead of performing them.
#[derive(Debug, Clone)]
pub struct MemoryWindow {
    scroll_y: f64,
    scrolls: Vec<(f64, ScrollBehavior)>,
    opened: Vec<String>,
    navigations: Vec<String>,
    popups: PopupPolicy,
    now_ms: f64,
    year: i32,
}

impl MemoryWindow {
    pub fn new(year: i32) -> Self {
        Self {
            scroll_y: 0.0,
            scrolls: Vec::new(),
            opened: Vec::new(),
            navigations: Vec::new(),
            popups: PopupPolicy::Allow,
            now_ms: 0.0,
            year,
        }
    }

    /// Move the viewport without recording a `scroll_to` call, as the user
    /// scrolling would.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    pub fn set_popups(&mut self, policy: PopupPolicy) {
        self.popups = policy;
    }

    pub fn scrolls(&self) -> &[(f64, ScrollBehavior)] {
        &self.scrolls
    }

    pub fn opened(&self) -> &[String] {
        &self.opened
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

impl Window for MemoryWindow {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scrolls.push((top, behavior));
        self.scroll_y = top.max(0.0);
    }

    fn open(&mut self, url: &str) -> Result<bool, OpenError> {
        match self.popups {
            PopupPolicy::Allow => {
                self.opened.push(url.to_string());
                Ok(true)
            }
            PopupPolicy::Block => Ok(false),
            PopupPolicy::Fail => Err(OpenError::Script("SecurityError".to_string())),
        }
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn current_year(&self) -> i32 {
        self.year
    }
}
