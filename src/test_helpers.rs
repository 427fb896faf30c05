//! Shared fixtures for the unit tests.
//!
//! [`portfolio`] builds a small page shaped like the real markup: navbar with
//! a hamburger toggle and two links, two sections with layout boxes, the
//! language toggle, the image modal and a footer. Element ids and classes
//! match the stock `ElementsConfig`, so `Page::mount` with default config
//! finds everything.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fx = portfolio();
//! let toggle = fx.lang_toggle;
//! let mut page = mount_arabic(fx.dom);
//! page.handle(click(toggle));
//! ```

use crate::config::BehaviorConfig;
use crate::dom::{Element, MemoryDom, MemoryWindow, NodeId};
use crate::language::{Language, MemoryStore};
use crate::page::{Page, PageEvent};

pub type TestPage = Page<MemoryDom, MemoryWindow, MemoryStore>;

/// The default easter-egg key sequence.
pub const KONAMI: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

pub struct Portfolio {
    pub dom: MemoryDom,
    pub lang_toggle: NodeId,
    pub nav_toggle: NodeId,
    pub nav_menu: NodeId,
    pub home_link: NodeId,
    pub about_link: NodeId,
    pub modal: NodeId,
    pub modal_image: NodeId,
    pub footer_text: NodeId,
}

pub fn portfolio() -> Portfolio {
    let mut dom = MemoryDom::new();
    let body = dom.body_id();

    let navbar = dom.append(body, Element::new("nav").id("navbar"));
    let lang_toggle = dom.append(navbar, Element::new("button").id("langToggle"));
    let nav_toggle = dom.append(navbar, Element::new("div").id("navToggle"));
    for _ in 0..3 {
        dom.append(nav_toggle, Element::new("span"));
    }
    let nav_menu = dom.append(navbar, Element::new("ul").id("navMenu"));
    let home_link = dom.append(
        nav_menu,
        Element::new("a")
            .class("nav-link")
            .attr("href", "#home")
            .translated("الرئيسية", "Home"),
    );
    let about_link = dom.append(
        nav_menu,
        Element::new("a")
            .class("nav-link")
            .attr("href", "#about")
            .translated("نبذة", "About"),
    );

    dom.append(body, Element::new("section").id("home").layout(0.0, 600.0));
    dom.append(body, Element::new("section").id("about").layout(600.0, 800.0));

    let modal = dom.append(body, Element::new("div").id("imageModal"));
    let modal_image = dom.append(modal, Element::new("img").id("modalImage"));
    dom.append(modal, Element::new("p").id("modalCaption"));

    let footer = dom.append(body, Element::new("div").class("footer-bottom"));
    let footer_text = dom.append(footer, Element::new("p").text("© 2020"));

    Portfolio {
        dom,
        lang_toggle,
        nav_toggle,
        nav_menu,
        home_link,
        about_link,
        modal,
        modal_image,
        footer_text,
    }
}

/// Mount with stock config and a window pinned to 2026.
pub fn mount(dom: MemoryDom, store: MemoryStore) -> TestPage {
    Page::mount(dom, MemoryWindow::new(2026), store, BehaviorConfig::default())
}

pub fn mount_arabic(dom: MemoryDom) -> TestPage {
    mount(dom, MemoryStore::new(Language::Ar))
}

/// A click landing directly on `node`.
pub fn click(node: NodeId) -> PageEvent<NodeId> {
    PageEvent::Click {
        current: node,
        target: node,
    }
}
