//! Mobile menu and active-section highlighting.
//!
//! The menu is a single boolean held in the document itself: the configured
//! active class on the menu element. The toggle's first three `<span>` bars
//! morph into an X while it is open.
//!
//! Active-link highlighting walks `section[id]` elements on (debounced)
//! scroll. A section matches when the scroll position, pushed down by the
//! configured offset, falls inside it; the nav link whose `href` is
//! `#<section id>` becomes the only active link. When no section matches, the
//! previous highlight stays.

use crate::config::{ElementsConfig, ScrollConfig};
use crate::dom::{Dom, Query};

const BARS_OPEN: [(&str, &str); 3] = [
    ("transform", "rotate(45deg) translate(5px, 5px)"),
    ("opacity", "0"),
    ("transform", "rotate(-45deg) translate(7px, -6px)"),
];

const BARS_CLOSED: [(&str, &str); 3] = [("transform", "none"), ("opacity", "1"), ("transform", "none")];

pub struct NavController<N> {
    toggle: Option<N>,
    menu: Option<N>,
    links: Vec<N>,
    bars: Vec<N>,
    active_class: String,
    section_offset: f64,
}

impl<N: Clone + PartialEq> NavController<N> {
    pub fn resolve<D: Dom<Node = N>>(
        dom: &D,
        elements: &ElementsConfig,
        scroll: &ScrollConfig,
    ) -> Self {
        let toggle = dom.element_by_id(&elements.nav_toggle);
        let bars = toggle
            .as_ref()
            .map(|t| {
                dom.query_within(t, &Query::tag("span"))
                    .into_iter()
                    .take(BARS_OPEN.len())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            toggle,
            menu: dom.element_by_id(&elements.nav_menu),
            links: dom.query_all(&Query::class(&elements.nav_link_class)),
            bars,
            active_class: elements.active_class.clone(),
            section_offset: f64::from(scroll.active_link_offset),
        }
    }

    pub fn toggle_node(&self) -> Option<&N> {
        self.toggle.as_ref()
    }

    pub fn links(&self) -> &[N] {
        &self.links
    }

    pub fn is_toggle(&self, node: &N) -> bool {
        self.toggle.as_ref() == Some(node)
    }

    pub fn is_link(&self, node: &N) -> bool {
        self.links.contains(node)
    }

    pub fn is_open<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        self.menu
            .as_ref()
            .is_some_and(|menu| dom.has_class(menu, &self.active_class))
    }

    /// Flip the menu. Opening moves focus to the first nav link.
    pub fn toggle_menu<D: Dom<Node = N>>(&self, dom: &mut D) -> bool {
        let Some(menu) = &self.menu else {
            return false;
        };
        let open = dom.toggle_class(menu, &self.active_class);
        self.paint_bars(dom, open);
        if open {
            if let Some(first) = self.links.first() {
                dom.focus(first);
            }
        }
        open
    }

    pub fn close_menu<D: Dom<Node = N>>(&self, dom: &mut D) {
        if let Some(menu) = &self.menu {
            dom.remove_class(menu, &self.active_class);
        }
        self.paint_bars(dom, false);
    }

    /// Escape closes an open menu. Returns whether it did.
    pub fn on_escape<D: Dom<Node = N>>(&self, dom: &mut D) -> bool {
        if !self.is_open(dom) {
            return false;
        }
        self.close_menu(dom);
        true
    }

    fn paint_bars<D: Dom<Node = N>>(&self, dom: &mut D, open: bool) {
        let styles = if open { BARS_OPEN } else { BARS_CLOSED };
        for (bar, (property, value)) in self.bars.iter().zip(styles) {
            dom.set_style(bar, property, value);
        }
    }

    /// Give each link an `aria-label` from `template`, `{label}` replaced by
    /// the link's trimmed text.
    pub fn label_links<D: Dom<Node = N>>(&self, dom: &mut D, template: &str) {
        if template.is_empty() {
            return;
        }
        for link in &self.links {
            let text = dom.text_content(link);
            let label = template.replace("{label}", text.trim());
            dom.set_attribute(link, "aria-label", &label);
        }
    }

    /// Highlight the link of the section under `scroll_y`. Returns the
    /// highlighted link, or `None` when no section matched and nothing
    /// changed.
    pub fn update_active_link<D: Dom<Node = N>>(&self, dom: &mut D, scroll_y: f64) -> Option<N> {
        let mut active = None;
        for section in dom.query_all(&Query::TagWithId("section".to_string())) {
            let top = dom.offset_top(&section) - self.section_offset;
            let height = dom.offset_height(&section);
            if !(scroll_y > top && scroll_y <= top + height) {
                continue;
            }
            let Some(id) = dom.attribute(&section, "id") else {
                continue;
            };
            let href = format!("#{id}");
            active = None;
            for link in &self.links {
                dom.remove_class(link, &self.active_class);
                if dom.attribute(link, "href").as_deref() == Some(href.as_str()) {
                    dom.add_class(link, &self.active_class);
                    active = Some(link.clone());
                }
            }
        }
        active
    }
}
