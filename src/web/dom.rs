//! `web-sys` backed document and window.
//!
//! Element handles are plain `web_sys::Element`s. Style and focus need an
//! `HtmlElement`; on anything else (SVG, MathML) those calls do nothing.
//! DOM exceptions from setters are logged at `warn` and otherwise ignored.

use crate::dom::{Dom, OpenError, Query, ScrollBehavior, Window};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList, ScrollToOptions};

fn warn_on_err(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("{what} failed: {e:?}");
    }
}

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn document_element(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn query_all(&self, query: &Query) -> Vec<Element> {
        elements(self.document.query_selector_all(&query.to_selector()))
    }

    fn query_within(&self, scope: &Element, query: &Query) -> Vec<Element> {
        elements(scope.query_selector_all(&query.to_selector()))
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        warn_on_err("setAttribute", node.set_attribute(name, value));
    }

    fn has_attribute(&self, node: &Element, name: &str) -> bool {
        node.has_attribute(name)
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text_content(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        warn_on_err("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        warn_on_err("classList.remove", node.class_list().remove_1(class));
    }

    fn style(&self, node: &Element, property: &str) -> String {
        node.dyn_ref::<HtmlElement>()
            .and_then(|el| el.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            warn_on_err("style.setProperty", el.style().set_property(property, value));
        }
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_top()))
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn focus(&mut self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            warn_on_err("focus", el.focus());
        }
    }

    fn append_style_sheet(&mut self, css: &str) {
        let Some(head) = self.document.head() else {
            return;
        };
        match self.document.create_element("style") {
            Ok(style) => {
                style.set_text_content(Some(css));
                if let Err(e) = head.append_child(&style) {
                    log::warn!("appending style sheet failed: {e:?}");
                }
            }
            Err(e) => log::warn!("createElement(style) failed: {e:?}"),
        }
    }
}

pub struct WebWindow {
    window: web_sys::Window,
}

impl WebWindow {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Window for WebWindow {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn open(&mut self, url: &str) -> Result<bool, OpenError> {
        self.window
            .open_with_url_and_target(url, "_blank")
            .map(|opened| opened.is_some())
            .map_err(|e| OpenError::Script(format!("{e:?}")))
    }

    fn navigate(&mut self, url: &str) {
        warn_on_err("location.href", self.window.location().set_href(url));
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn current_year(&self) -> i32 {
        i32::try_from(js_sys::Date::new_0().get_full_year()).unwrap_or(i32::MAX)
    }
}
