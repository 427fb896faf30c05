//! # Portfolio Behavior
//!
//! The client-side behavior layer of a bilingual (Arabic/English) static
//! portfolio page, compiled to WebAssembly. It toggles the page language,
//! highlights navigation, runs scroll cosmetics, serves the CV links, shows an
//! image lightbox and reveals sections as they scroll into view.
//!
//! # Architecture: Controllers Behind a Document Seam
//!
//! ```text
//! browser events ──▶ web::bootstrap ──▶ Page::handle ──▶ controllers ──▶ dyn Dom / Window
//!                          ▲                  │
//!                          └── Scheduled ◀────┘   (timers run by the host)
//! ```
//!
//! Each controller is built once with the element handles it needs and acts
//! through the [`dom::Dom`] and [`dom::Window`] traits. In the browser those
//! are backed by `web-sys`; in tests by [`dom::MemoryDom`] and
//! [`dom::MemoryWindow`], which record every mutation. Controllers never
//! talk to each other; the document is their only shared state.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`language`] | `Language` codes, keyed attribute lookup, `LanguageStore` persistence |
//! | [`render`] | Applies a language to the document (leaf-only text replacement) |
//! | [`nav`] | Mobile menu state and active-section highlighting |
//! | [`scroll`] | Navbar shadow/shrink, scroll-to-top button, anchor scrolling |
//! | [`modal`] | Image lightbox |
//! | [`reveal`] | One-shot staggered reveal-on-scroll |
//! | [`extras`] | CV links, footer year, print layout, greeting, Konami code |
//! | [`debounce`] | Leading-edge debounce for scroll handlers |
//! | [`page`] | Assembles controllers and routes `PageEvent`s |
//! | [`dom`] | `Dom`/`Window` traits and the in-memory implementation |
//! | [`config`] | `behavior.toml` / embedded JSON loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Leave Text Alone When a Translation Is Missing
//!
//! An element whose attribute for the active language is absent keeps its
//! current text instead of showing an empty or placeholder string.
//!
//! ## Invalid Stored Languages Fall Back
//!
//! `localStorage` is shared with whatever else ran on the origin. Values that
//! are not a supported code resolve to the configured default language.
//!
//! ## Timers Are Returned, Not Started
//!
//! `Page::handle` never starts timers itself. Deferred work comes back as
//! [`page::Scheduled`] entries so the browser host can use real timeouts and
//! tests can fire them by hand.

pub mod config;
pub mod debounce;
pub mod dom;
pub mod extras;
pub mod language;
pub mod modal;
pub mod nav;
pub mod output;
pub mod page;
pub mod render;
pub mod reveal;
pub mod scroll;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::BehaviorConfig;
pub use language::{Language, LanguageStore, MemoryStore};
pub use page::{Page, PageEvent, Response, Scheduled, Timer};
