//! Reveal-on-scroll.
//!
//! Members of each configured group start hidden (transparent and offset by
//! the group's transform) with a transition delayed by their position in the
//! group, so a row of cards cascades in. The first time the visibility
//! watcher reports an element, it moves to its final state. Revealing is
//! one-shot: elements never hide again.

use crate::config::RevealGroup;
use crate::dom::{Dom, Query};

/// Render milliseconds as a CSS time without float noise: `600` → `0.6s`.
pub fn css_seconds(ms: u32) -> String {
    let (whole, frac) = (ms / 1000, ms % 1000);
    if frac == 0 {
        return format!("{whole}s");
    }
    let digits = format!("{frac:03}");
    format!("{whole}.{}s", digits.trim_end_matches('0'))
}

pub struct RevealController<N> {
    pending: Vec<N>,
    revealed: Vec<N>,
}

impl<N: Clone + PartialEq> RevealController<N> {
    /// Put every group member in its hidden starting state.
    pub fn setup<D: Dom<Node = N>>(dom: &mut D, groups: &[RevealGroup]) -> Self {
        let mut pending = Vec::new();
        for group in groups {
            let members = dom.query_all(&Query::class(&group.class));
            log::debug!("reveal group {:?}: {} members", group.class, members.len());
            for (index, node) in members.into_iter().enumerate() {
                let position = u32::try_from(index).unwrap_or(u32::MAX);
                let delay = position.saturating_mul(group.stagger_ms);
                let transition = format!(
                    "all {} ease {}",
                    css_seconds(group.duration_ms),
                    css_seconds(delay)
                );
                dom.set_style(&node, "opacity", "0");
                dom.set_style(&node, "transform", &group.transform);
                dom.set_style(&node, "transition", &transition);
                if !pending.contains(&node) {
                    pending.push(node);
                }
            }
        }
        Self {
            pending,
            revealed: Vec::new(),
        }
    }

    /// Elements still waiting to be revealed, for the visibility watcher.
    pub fn targets(&self) -> &[N] {
        &self.pending
    }

    pub fn is_revealed(&self, node: &N) -> bool {
        self.revealed.contains(node)
    }

    /// Show `node` if it is a pending member. Returns whether anything changed.
    pub fn reveal<D: Dom<Node = N>>(&mut self, dom: &mut D, node: &N) -> bool {
        let Some(pos) = self.pending.iter().position(|n| n == node) else {
            return false;
        };
        let node = self.pending.remove(pos);
        dom.set_style(&node, "opacity", "1");
        dom.set_style(&node, "transform", "translateY(0)");
        self.revealed.push(node);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::dom::{Element, MemoryDom};

    #[test]
    fn css_seconds_formatting() {
        assert_eq!(css_seconds(0), "0s");
        assert_eq!(css_seconds(50), "0.05s");
        assert_eq!(css_seconds(300), "0.3s");
        assert_eq!(css_seconds(600), "0.6s");
        assert_eq!(css_seconds(1000), "1s");
        assert_eq!(css_seconds(1250), "1.25s");
    }

    #[test]
    fn setup_hides_with_staggered_delay() {
        let mut dom = MemoryDom::new();
        let body = dom.body_id();
        let items: Vec<_> = (0..4)
            .map(|_| dom.append(body, Element::new("div").class("timeline-item")))
            .collect();
        let reveal = RevealController::setup(&mut dom, &RevealConfig::default().groups);
        assert_eq!(reveal.targets(), items.as_slice());
        assert_eq!(dom.style(&items[0], "opacity"), "0");
        assert_eq!(dom.style(&items[0], "transform"), "translateY(30px)");
        assert_eq!(dom.style(&items[0], "transition"), "all 0.6s ease 0s");
        assert_eq!(dom.style(&items[3], "transition"), "all 0.6s ease 0.3s");
    }

    #[test]
    fn groups_stagger_independently() {
        let mut dom = MemoryDom::new();
        let body = dom.body_id();
        dom.append(body, Element::new("span").class("skill-tag"));
        let second_tag = dom.append(body, Element::new("span").class("skill-tag"));
        let card = dom.append(body, Element::new("div").class("achievement-card"));
        RevealController::setup(&mut dom, &RevealConfig::default().groups);
        assert_eq!(dom.style(&second_tag, "transform"), "translateX(30px)");
        assert_eq!(dom.style(&second_tag, "transition"), "all 0.5s ease 0.05s");
        assert_eq!(dom.style(&card, "transform"), "scale(0.9)");
        assert_eq!(dom.style(&card, "transition"), "all 0.6s ease 0s");
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut dom = MemoryDom::new();
        let body = dom.body_id();
        let card = dom.append(body, Element::new("div").class("info-card"));
        let mut reveal = RevealController::setup(&mut dom, &RevealConfig::default().groups);
        assert!(reveal.reveal(&mut dom, &card));
        assert_eq!(dom.style(&card, "opacity"), "1");
        assert_eq!(dom.style(&card, "transform"), "translateY(0)");
        assert!(reveal.is_revealed(&card));
        assert!(reveal.targets().is_empty());

        dom.set_style(&card, "opacity", "0.5");
        assert!(!reveal.reveal(&mut dom, &card));
        assert_eq!(dom.style(&card, "opacity"), "0.5");
    }

    #[test]
    fn unrelated_elements_are_ignored() {
        let mut dom = MemoryDom::new();
        let body = dom.body_id();
        let other = dom.append(body, Element::new("div").class("hero"));
        let mut reveal = RevealController::setup(&mut dom, &RevealConfig::default().groups);
        assert!(!reveal.reveal(&mut dom, &other));
        assert_eq!(dom.style(&other, "opacity"), "");
    }
}
