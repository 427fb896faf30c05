//! Scroll-driven cosmetics and in-page scrolling.
//!
//! Three thresholds are checked on every scroll event: navbar shadow depth,
//! the navbar shrink class and the scroll-to-top button's visibility. All
//! comparisons are strict (`scroll_y > threshold`), so the top of the page
//! always shows the resting state.

use crate::config::{ElementsConfig, ScrollConfig};
use crate::dom::{Dom, ScrollBehavior, Window};

pub struct ScrollEffects<N> {
    navbar: Option<N>,
    scroll_top: Option<N>,
    config: ScrollConfig,
    shrink_class: String,
    visible_class: String,
}

impl<N: Clone + PartialEq> ScrollEffects<N> {
    pub fn resolve<D: Dom<Node = N>>(
        dom: &D,
        elements: &ElementsConfig,
        config: &ScrollConfig,
    ) -> Self {
        Self {
            navbar: dom.element_by_id(&elements.navbar),
            scroll_top: dom.element_by_id(&elements.scroll_top),
            config: config.clone(),
            shrink_class: elements.shrink_class.clone(),
            visible_class: elements.visible_class.clone(),
        }
    }

    pub fn scroll_top_node(&self) -> Option<&N> {
        self.scroll_top.as_ref()
    }

    pub fn is_scroll_top(&self, node: &N) -> bool {
        self.scroll_top.as_ref() == Some(node)
    }

    pub fn on_scroll<D: Dom<Node = N>>(&self, dom: &mut D, scroll_y: f64) {
        if let Some(navbar) = &self.navbar {
            let shadow = if scroll_y > f64::from(self.config.shadow_threshold) {
                &self.config.shadow_raised
            } else {
                &self.config.shadow_base
            };
            dom.set_style(navbar, "box-shadow", shadow);

            if scroll_y > f64::from(self.config.shrink_threshold) {
                dom.add_class(navbar, &self.shrink_class);
            } else {
                dom.remove_class(navbar, &self.shrink_class);
            }
        }

        if let Some(button) = &self.scroll_top {
            if scroll_y > f64::from(self.config.scroll_top_threshold) {
                dom.add_class(button, &self.visible_class);
            } else {
                dom.remove_class(button, &self.visible_class);
            }
        }
    }

    /// Smoothly scroll so the target of `href` (`#id`) sits below the fixed
    /// header. Returns the scroll position, or `None` if there is no target.
    pub fn scroll_to_anchor<D, W>(&self, dom: &D, window: &mut W, href: &str) -> Option<f64>
    where
        D: Dom<Node = N>,
        W: Window,
    {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        let target = dom.element_by_id(id)?;
        let top = dom.offset_top(&target) - f64::from(self.config.header_offset);
        window.scroll_to(top, ScrollBehavior::Smooth);
        Some(top)
    }

    pub fn scroll_to_top<W: Window>(&self, window: &mut W) {
        window.scroll_to(0.0, ScrollBehavior::Smooth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryDom, MemoryWindow, NodeId};

    fn fixture() -> (MemoryDom, ScrollEffects<NodeId>, NodeId, NodeId) {
        let mut dom = MemoryDom::new();
        let body = dom.body_id();
        let navbar = dom.append(body, Element::new("nav").id("navbar"));
        let button = dom.append(body, Element::new("button").id("scrollTop"));
        dom.append(body, Element::new("section").id("skills").layout(1200.0, 400.0));
        let effects =
            ScrollEffects::resolve(&dom, &ElementsConfig::default(), &ScrollConfig::default());
        (dom, effects, navbar, button)
    }

    #[test]
    fn resting_state_at_top() {
        let (mut dom, effects, navbar, button) = fixture();
        effects.on_scroll(&mut dom, 0.0);
        assert_eq!(
            dom.style(&navbar, "box-shadow"),
            "0 4px 6px -1px rgba(0, 0, 0, 0.1)"
        );
        assert!(!dom.has_class(&navbar, "nav-shrink"));
        assert!(!dom.has_class(&button, "visible"));
    }

    #[test]
    fn thresholds_are_independent() {
        let (mut dom, effects, navbar, button) = fixture();
        effects.on_scroll(&mut dom, 30.0);
        assert!(dom.has_class(&navbar, "nav-shrink"));
        assert_eq!(
            dom.style(&navbar, "box-shadow"),
            "0 4px 6px -1px rgba(0, 0, 0, 0.1)"
        );
        effects.on_scroll(&mut dom, 51.0);
        assert_eq!(dom.style(&navbar, "box-shadow"), "0 4px 12px rgba(0, 0, 0, 0.1)");
        assert!(!dom.has_class(&button, "visible"));
    }

    #[test]
    fn scrolled_state_and_back() {
        let (mut dom, effects, navbar, button) = fixture();
        effects.on_scroll(&mut dom, 400.0);
        assert!(dom.has_class(&navbar, "nav-shrink"));
        assert!(dom.has_class(&button, "visible"));
        effects.on_scroll(&mut dom, 300.0);
        assert!(!dom.has_class(&button, "visible"));
        effects.on_scroll(&mut dom, 10.0);
        assert!(!dom.has_class(&navbar, "nav-shrink"));
    }

    #[test]
    fn anchor_scroll_leaves_room_for_header() {
        let (dom, effects, _, _) = fixture();
        let mut window = MemoryWindow::new(2025);
        assert_eq!(effects.scroll_to_anchor(&dom, &mut window, "#skills"), Some(1130.0));
        assert_eq!(window.scrolls(), [(1130.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn anchor_scroll_ignores_unknown_targets() {
        let (dom, effects, _, _) = fixture();
        let mut window = MemoryWindow::new(2025);
        assert_eq!(effects.scroll_to_anchor(&dom, &mut window, "#nowhere"), None);
        assert_eq!(effects.scroll_to_anchor(&dom, &mut window, "#"), None);
        assert_eq!(effects.scroll_to_anchor(&dom, &mut window, "cv.pdf"), None);
        assert!(window.scrolls().is_empty());
    }

    #[test]
    fn scroll_to_top_is_smooth() {
        let (_, effects, _, _) = fixture();
        let mut window = MemoryWindow::new(2025);
        window.set_scroll_y(900.0);
        effects.scroll_to_top(&mut window);
        assert_eq!(window.scroll_y(), 0.0);
        assert_eq!(window.scrolls(), [(0.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn missing_elements_do_not_panic() {
        let mut dom = MemoryDom::new();
        let effects: ScrollEffects<NodeId> =
            ScrollEffects::resolve(&dom, &ElementsConfig::default(), &ScrollConfig::default());
        effects.on_scroll(&mut dom, 500.0);
    }
}
