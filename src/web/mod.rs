//! Browser bindings (wasm32 only).
//!
//! - [`dom`]: [`WebDom`] / [`WebWindow`], the `web-sys` implementations of
//!   the [`Dom`](crate::dom::Dom) and [`Window`](crate::dom::Window) traits.
//! - [`storage`]: [`LocalStorageStore`], `localStorage`-backed language store.
//! - [`bootstrap`]: the `#[wasm_bindgen(start)]` entry point that mounts the
//!   page and wires browser events to [`Page::handle`](crate::page::Page::handle),
//!   plus the functions exported to inline page scripts.

pub mod bootstrap;
pub mod dom;
pub mod storage;

pub use dom::{WebDom, WebWindow};
pub use storage::LocalStorageStore;
