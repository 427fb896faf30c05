//! WebAssembly entry point.
//!
//! Mounts the [`Page`] over the live document and forwards browser events to
//! it. The page sits in an `Rc<RefCell<..>>` shared by every listener; each
//! listener borrows it for one `handle` call. Scheduled timers come back
//! through [`dispatch`] as `gloo` timeouts.
//!
//! The module script usually finishes loading after `window.onload` has
//! already fired, so the load step runs immediately when the document is
//! complete.

use crate::config::{self, BehaviorConfig};
use crate::language::Language;
use crate::page::{Page, PageEvent, Timer};
use crate::web::{LocalStorageStore, WebDom, WebWindow};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent,
};

/// Id of the `<script type="application/json">` holding the config.
const CONFIG_ELEMENT_ID: &str = "behavior-config";

type SharedPage = Rc<RefCell<Page<WebDom, WebWindow, LocalStorageStore>>>;

thread_local! {
    static PAGE: RefCell<Option<SharedPage>> = const { RefCell::new(None) };
}

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("creating IntersectionObserver failed: {0}")]
    Observer(String),
}

impl From<BootstrapError> for JsValue {
    fn from(e: BootstrapError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }
    mount().map_err(JsValue::from)
}

fn mount() -> Result<(), BootstrapError> {
    let window = web_sys::window().ok_or(BootstrapError::NoWindow)?;
    let document = window.document().ok_or(BootstrapError::NoDocument)?;
    let config = embedded_config(&document);

    let storage = window.local_storage().ok().flatten();
    let store = LocalStorageStore::new(storage, &config.language.storage_key, config.language.default);
    let page = Page::mount(
        WebDom::new(document.clone()),
        WebWindow::new(window.clone()),
        store,
        config,
    );
    let page: SharedPage = Rc::new(RefCell::new(page));

    listen_clicks(&page);
    listen_document(&page, &document);
    listen_window(&page, &window);
    observe_reveals(&page)?;

    if document.ready_state() == "complete" {
        dispatch(&page, PageEvent::Load, None);
    } else {
        let page = page.clone();
        EventListener::once(&window, "load", move |_| dispatch(&page, PageEvent::Load, None))
            .forget();
    }

    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

/// Config from the page's JSON block; defaults when absent or invalid.
fn embedded_config(document: &Document) -> BehaviorConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return BehaviorConfig::default();
    };
    config::from_json(&text).unwrap_or_else(|e| {
        log::error!("ignoring embedded config: {e}");
        BehaviorConfig::default()
    })
}

/// Run one event through the page and act on the response.
fn dispatch(page: &SharedPage, event: PageEvent<Element>, dom_event: Option<&Event>) {
    let response = match page.try_borrow_mut() {
        Ok(mut page) => page.handle(event),
        Err(_) => {
            log::warn!("dropping re-entrant event {event:?}");
            return;
        }
    };
    if response.prevent_default {
        if let Some(e) = dom_event {
            e.prevent_default();
        }
    }
    for scheduled in response.scheduled {
        schedule(page, scheduled.delay_ms, scheduled.timer);
    }
}

fn schedule(page: &SharedPage, delay_ms: u32, timer: Timer) {
    let page = page.clone();
    Timeout::new(delay_ms, move || dispatch(&page, PageEvent::Timer(timer), None)).forget();
}

fn listen_clicks(page: &SharedPage) {
    let targets = page.borrow().click_targets();
    for node in targets {
        let page = page.clone();
        let current = node.clone();
        EventListener::new_with_options(
            &node,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let target = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .unwrap_or_else(|| current.clone());
                let click = PageEvent::Click {
                    current: current.clone(),
                    target,
                };
                dispatch(&page, click, Some(event));
            },
        )
        .forget();
    }
}

fn listen_document(page: &SharedPage, document: &Document) {
    let page = page.clone();
    EventListener::new_with_options(
        document,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            dispatch(&page, PageEvent::KeyDown(key), Some(event));
        },
    )
    .forget();
}

fn listen_window(page: &SharedPage, window: &web_sys::Window) {
    let scroll_page = page.clone();
    EventListener::new(window, "scroll", move |_| {
        dispatch(&scroll_page, PageEvent::Scroll, None)
    })
    .forget();

    let print_page = page.clone();
    EventListener::new(window, "beforeprint", move |_| {
        dispatch(&print_page, PageEvent::BeforePrint, None)
    })
    .forget();
}

fn observe_reveals(page: &SharedPage) -> Result<(), BootstrapError> {
    let (targets, threshold, root_margin) = {
        let page = page.borrow();
        let reveal = &page.config().reveal;
        (page.reveal_targets(), reveal.threshold, reveal.root_margin.clone())
    };
    if targets.is_empty() {
        return Ok(());
    }

    let shared = page.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                dispatch(&shared, PageEvent::BecameVisible(target), None);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    options.set_root_margin(&root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|e| BootstrapError::Observer(format!("{e:?}")))?;
    for target in &targets {
        observer.observe(target);
    }
    callback.forget();
    Ok(())
}

fn with_page(f: impl FnOnce(&SharedPage)) {
    PAGE.with(|slot| match slot.borrow().as_ref() {
        Some(page) => f(page),
        None => log::warn!("page not mounted yet"),
    });
}

/// `openImageModal(src, alt)` for inline `onclick` handlers in the markup.
#[wasm_bindgen(js_name = openImageModal)]
pub fn open_image_modal(src: &str, alt: Option<String>) {
    with_page(|page| {
        if let Ok(mut page) = page.try_borrow_mut() {
            page.open_image_modal(src, alt.as_deref());
        }
    });
}

#[wasm_bindgen(js_name = closeImageModal)]
pub fn close_image_modal() {
    with_page(|page| {
        if let Ok(mut page) = page.try_borrow_mut() {
            page.close_image_modal();
        }
    });
}

/// `setLanguage("en")`. Unknown codes are ignored.
#[wasm_bindgen(js_name = setLanguage)]
pub fn set_language(code: &str) {
    let Ok(lang) = code.parse::<Language>() else {
        log::warn!("setLanguage: unsupported code {code:?}");
        return;
    };
    with_page(|page| {
        if let Ok(mut page) = page.try_borrow_mut() {
            page.apply_language(lang);
        }
    });
}
