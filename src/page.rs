//! The assembled page: every controller plus the event router.
//!
//! [`Page::mount`] resolves each controller's elements once and runs the
//! synchronous startup work (hidden reveal states, footer year, ARIA labels,
//! easter-egg keyframes, console greeting). After that the host feeds
//! [`PageEvent`]s into [`Page::handle`] and acts on the returned
//! [`Response`]: cancel the browser default, and run any [`Scheduled`] timer
//! by feeding [`PageEvent::Timer`] back after the delay.
//!
//! Hosts: the wasm bootstrap (`web::bootstrap`) in the browser, the test
//! suite everywhere else.

use crate::config::BehaviorConfig;
use crate::debounce::Debounce;
use crate::dom::{Dom, Window};
use crate::extras::{self, KonamiDetector, PdfLinks};
use crate::language::{Language, LanguageStore};
use crate::modal::ModalController;
use crate::nav::NavController;
use crate::render::{LocalizedRenderer, RenderTargets};
use crate::reveal::{RevealController, css_seconds};
use crate::scroll::ScrollEffects;

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<N> {
    /// `window` `load`.
    Load,
    Scroll,
    /// `current` is the element the listener sits on, `target` the element
    /// actually clicked (a descendant, or `current` itself).
    Click { current: N, target: N },
    /// `KeyboardEvent.key`.
    KeyDown(String),
    BeforePrint,
    /// The visibility watcher saw the element for the first time.
    BecameVisible(N),
    Timer(Timer),
}

/// Deferred work the host runs later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    FadeIn,
    EndEasterEgg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub delay_ms: u32,
    pub timer: Timer,
}

/// What the host must do after an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub prevent_default: bool,
    pub scheduled: Vec<Scheduled>,
}

impl Response {
    fn schedule(&mut self, delay_ms: u32, timer: Timer) {
        self.scheduled.push(Scheduled { delay_ms, timer });
    }
}

pub struct Page<D: Dom, W, S> {
    dom: D,
    window: W,
    config: BehaviorConfig,
    renderer: LocalizedRenderer<D::Node, S>,
    nav: NavController<D::Node>,
    scroll: ScrollEffects<D::Node>,
    modal: ModalController<D::Node>,
    reveal: RevealController<D::Node>,
    pdf: PdfLinks<D::Node>,
    konami: KonamiDetector,
    active_link: Debounce,
}

impl<D: Dom, W: Window, S: LanguageStore> Page<D, W, S> {
    /// Resolve controllers and run startup work.
    pub fn mount(mut dom: D, window: W, store: S, config: BehaviorConfig) -> Self {
        let elements = &config.elements;
        let targets = RenderTargets::resolve(&dom, &elements.root, &elements.language_toggle);
        let renderer = LocalizedRenderer::new(store, config.language.labels.clone(), targets);
        let nav = NavController::resolve(&dom, elements, &config.scroll);
        let scroll = ScrollEffects::resolve(&dom, elements, &config.scroll);
        let modal = ModalController::resolve(&dom, elements);
        let pdf = PdfLinks::resolve(&dom, elements, &config.pdf);
        let reveal = RevealController::setup(&mut dom, &config.reveal.groups);

        extras::stamp_footer_year(
            &mut dom,
            &elements.footer_class,
            &config.footer.template,
            window.current_year(),
        );
        nav.label_links(&mut dom, &config.accessibility.nav_label_template);
        if !config.easter_egg.keyframes.is_empty() {
            dom.append_style_sheet(&config.easter_egg.keyframes);
        }
        extras::log_greeting(&config.greeting);

        let konami = KonamiDetector::new(config.easter_egg.sequence.clone());
        let active_link = Debounce::new(config.scroll.debounce_ms);
        Self {
            dom,
            window,
            config,
            renderer,
            nav,
            scroll,
            modal,
            reveal,
            pdf,
            konami,
            active_link,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.renderer.store()
    }

    pub fn language(&self) -> Language {
        self.renderer.session().language
    }

    /// Elements that need a click listener.
    pub fn click_targets(&self) -> Vec<D::Node> {
        let mut nodes: Vec<D::Node> = Vec::new();
        nodes.extend(self.renderer.toggle_node().cloned());
        nodes.extend(self.nav.toggle_node().cloned());
        nodes.extend(self.nav.links().iter().cloned());
        nodes.extend(self.scroll.scroll_top_node().cloned());
        nodes.extend(self.modal.modal_node().cloned());
        nodes.extend(self.pdf.nodes().cloned());
        nodes
    }

    /// Elements the visibility watcher should observe.
    pub fn reveal_targets(&self) -> Vec<D::Node> {
        self.reveal.targets().to_vec()
    }

    pub fn apply_language(&mut self, lang: Language) {
        self.renderer.apply_language(&mut self.dom, lang);
    }

    pub fn open_image_modal(&mut self, src: &str, caption: Option<&str>) -> bool {
        self.modal.open(&mut self.dom, src, caption)
    }

    pub fn close_image_modal(&mut self) {
        self.modal.close(&mut self.dom);
    }

    pub fn handle(&mut self, event: PageEvent<D::Node>) -> Response {
        match event {
            PageEvent::Load => self.on_load(),
            PageEvent::Scroll => {
                self.on_scroll();
                Response::default()
            }
            PageEvent::Click { current, target } => self.on_click(&current, &target),
            PageEvent::KeyDown(key) => self.on_key(&key),
            PageEvent::BeforePrint => {
                extras::keep_together_for_print(
                    &mut self.dom,
                    &self.config.elements.print_keep_together_class,
                );
                Response::default()
            }
            PageEvent::BecameVisible(node) => {
                self.reveal.reveal(&mut self.dom, &node);
                Response::default()
            }
            PageEvent::Timer(timer) => {
                self.on_timer(timer);
                Response::default()
            }
        }
    }

    /// Hide the body, render the stored language, fade in after a delay.
    fn on_load(&mut self) -> Response {
        if let Some(body) = self.dom.body() {
            self.dom.set_style(&body, "opacity", "0");
        }
        let lang = self.renderer.init(&mut self.dom);
        log::info!("page ready in {lang}");
        let mut response = Response::default();
        response.schedule(self.config.fade_in.delay_ms, Timer::FadeIn);
        response
    }

    fn on_scroll(&mut self) {
        let y = self.window.scroll_y();
        self.scroll.on_scroll(&mut self.dom, y);
        if self.active_link.should_fire(self.window.now_ms()) {
            self.nav.update_active_link(&mut self.dom, y);
        }
    }

    fn on_click(&mut self, current: &D::Node, target: &D::Node) -> Response {
        let mut response = Response::default();

        if self.renderer.is_toggle(current) {
            self.renderer.toggle(&mut self.dom);
        }
        if self.nav.is_toggle(current) {
            self.nav.toggle_menu(&mut self.dom);
        }
        if self.nav.is_link(current) {
            response.prevent_default = true;
            self.nav.close_menu(&mut self.dom);
            if let Some(href) = self.dom.attribute(current, "href") {
                self.scroll
                    .scroll_to_anchor(&self.dom, &mut self.window, &href);
            }
        }
        if self.scroll.is_scroll_top(current) {
            self.scroll.scroll_to_top(&mut self.window);
        }
        self.modal.on_click(&mut self.dom, current, target);
        if self.pdf.is_view(current) && self.pdf.view(&self.dom, &mut self.window).is_some() {
            response.prevent_default = true;
        }
        if self.pdf.is_download(current) {
            self.pdf.prepare_download(&mut self.dom);
        }

        response
    }

    fn on_key(&mut self, key: &str) -> Response {
        let mut response = Response::default();

        if key == "Escape" {
            self.modal.on_escape(&mut self.dom);
            self.nav.on_escape(&mut self.dom);
        }
        if key == "Home" {
            response.prevent_default = true;
            self.scroll.scroll_to_top(&mut self.window);
        }
        if self.konami.push(key) {
            log::info!("easter egg unlocked");
            if let Some(body) = self.dom.body() {
                self.dom
                    .set_style(&body, "animation", &self.config.easter_egg.animation);
            }
            response.schedule(self.config.easter_egg.duration_ms, Timer::EndEasterEgg);
        }

        response
    }

    fn on_timer(&mut self, timer: Timer) {
        let Some(body) = self.dom.body() else {
            return;
        };
        match timer {
            Timer::FadeIn => {
                let transition =
                    format!("opacity {} ease", css_seconds(self.config.fade_in.duration_ms));
                self.dom.set_style(&body, "transition", &transition);
                self.dom.set_style(&body, "opacity", "1");
            }
            Timer::EndEasterEgg => self.dom.set_style(&body, "animation", "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryDom, ScrollBehavior};
    use crate::language::MemoryStore;
    use crate::test_helpers::*;

    #[test]
    fn load_hides_body_and_schedules_fade_in() {
        let mut page = mount_arabic(MemoryDom::new());
        let response = page.handle(PageEvent::Load);
        let body = page.dom().body_id();
        assert_eq!(page.dom().style(&body, "opacity"), "0");
        assert_eq!(
            response.scheduled,
            vec![Scheduled {
                delay_ms: 100,
                timer: Timer::FadeIn
            }]
        );

        page.handle(PageEvent::Timer(Timer::FadeIn));
        assert_eq!(page.dom().style(&body, "opacity"), "1");
        assert_eq!(page.dom().style(&body, "transition"), "opacity 0.5s ease");
    }

    #[test]
    fn load_renders_stored_language() {
        let fx = portfolio();
        let mut page = mount(fx.dom, MemoryStore::new(Language::En));
        page.handle(PageEvent::Load);
        let root = page.dom().root_id();
        assert_eq!(page.dom().attribute(&root, "lang").as_deref(), Some("en"));
        assert_eq!(page.dom().text_content(&fx.about_link), "About");
    }

    #[test]
    fn mount_stamps_footer_and_labels_links() {
        let fx = portfolio();
        let page = mount_arabic(fx.dom);
        assert_eq!(
            page.dom().text_content(&fx.footer_text),
            "© 2026. جميع الحقوق محفوظة."
        );
        assert_eq!(
            page.dom().attribute(&fx.about_link, "aria-label").as_deref(),
            Some("انتقل إلى قسم نبذة")
        );
    }

    #[test]
    fn mount_injects_keyframes_once() {
        let page = mount_arabic(MemoryDom::new());
        assert_eq!(page.dom().style_sheets().len(), 1);
        assert!(page.dom().style_sheets()[0].contains("@keyframes rainbow"));
    }

    #[test]
    fn language_toggle_click_switches_language() {
        let fx = portfolio();
        let mut page = mount_arabic(fx.dom);
        page.handle(PageEvent::Load);
        assert_eq!(page.language(), Language::Ar);
        let response = page.handle(click(fx.lang_toggle));
        assert!(!response.prevent_default);
        assert_eq!(page.language(), Language::En);
        assert_eq!(page.store().raw(), Some("en"));
    }

    #[test]
    fn click_targets_cover_interactive_elements() {
        let fx = portfolio();
        let page = mount_arabic(fx.dom);
        assert_eq!(
            page.click_targets(),
            vec![
                fx.lang_toggle,
                fx.nav_toggle,
                fx.home_link,
                fx.about_link,
                fx.modal
            ]
        );
    }

    #[test]
    fn nav_link_click_closes_menu_and_scrolls_below_header() {
        let fx = portfolio();
        let mut page = mount_arabic(fx.dom);
        page.handle(click(fx.nav_toggle));
        assert!(page.dom().has_class(&fx.nav_menu, "active"));

        let response = page.handle(click(fx.about_link));
        assert!(response.prevent_default);
        assert!(!page.dom().has_class(&fx.nav_menu, "active"));
        assert_eq!(
            page.window().scrolls().last(),
            Some(&(530.0, ScrollBehavior::Smooth))
        );
    }

    #[test]
    fn escape_closes_modal_and_menu() {
        let fx = portfolio();
        let mut page = mount_arabic(fx.dom);
        assert!(page.open_image_modal("img/cert.png", Some("Certificate")));
        page.handle(click(fx.nav_toggle));

        page.handle(PageEvent::KeyDown("Escape".into()));
        assert_eq!(page.dom().style(&fx.modal, "display"), "none");
        assert!(!page.dom().has_class(&fx.nav_menu, "active"));
    }

    #[test]
    fn click_on_modal_image_keeps_modal_open() {
        let fx = portfolio();
        let mut page = mount_arabic(fx.dom);
        page.open_image_modal("img/cert.png", None);
        page.handle(PageEvent::Click {
            current: fx.modal,
            target: fx.modal_image,
        });
        assert_eq!(page.dom().style(&fx.modal, "display"), "flex");
        page.handle(click(fx.modal));
        assert_eq!(page.dom().style(&fx.modal, "display"), "none");
    }

    #[test]
    fn home_key_scrolls_to_top_and_cancels_default() {
        let mut page = mount_arabic(MemoryDom::new());
        page.window_mut().set_scroll_y(800.0);
        let response = page.handle(PageEvent::KeyDown("Home".into()));
        assert!(response.prevent_default);
        assert_eq!(page.window().scroll_y(), 0.0);
    }

    #[test]
    fn other_keys_do_not_cancel_default() {
        let mut page = mount_arabic(MemoryDom::new());
        let response = page.handle(PageEvent::KeyDown("End".into()));
        assert_eq!(response, Response::default());
    }

    #[test]
    fn easter_egg_animation_ends_on_timer() {
        let mut page = mount_arabic(MemoryDom::new());
        let mut last = Response::default();
        for key in KONAMI {
            last = page.handle(PageEvent::KeyDown(key.into()));
        }
        let body = page.dom().body_id();
        assert_eq!(
            page.dom().style(&body, "animation"),
            "rainbow 2s linear infinite"
        );
        assert_eq!(
            last.scheduled,
            vec![Scheduled {
                delay_ms: 5000,
                timer: Timer::EndEasterEgg
            }]
        );
        page.handle(PageEvent::Timer(Timer::EndEasterEgg));
        assert_eq!(page.dom().style(&body, "animation"), "none");
    }

    #[test]
    fn scroll_highlight_is_debounced() {
        let fx = portfolio();
        let mut page = mount_arabic(fx.dom);

        page.window_mut().set_scroll_y(50.0);
        page.handle(PageEvent::Scroll);
        assert!(page.dom().has_class(&fx.home_link, "active"));

        // 4ms later: inside the window, highlight unchanged
        page.window_mut().advance(4.0);
        page.window_mut().set_scroll_y(700.0);
        page.handle(PageEvent::Scroll);
        assert!(page.dom().has_class(&fx.home_link, "active"));

        page.window_mut().advance(20.0);
        page.handle(PageEvent::Scroll);
        assert!(page.dom().has_class(&fx.about_link, "active"));
        assert!(!page.dom().has_class(&fx.home_link, "active"));
    }

    #[test]
    fn became_visible_reveals_element() {
        let mut dom = MemoryDom::new();
        let body = dom.body_id();
        let card = dom.append(body, Element::new("div").class("contact-card"));
        let mut page = mount_arabic(dom);
        assert_eq!(page.reveal_targets(), vec![card]);
        page.handle(PageEvent::BecameVisible(card));
        assert_eq!(page.dom().style(&card, "opacity"), "1");
        assert!(page.reveal_targets().is_empty());
    }

    #[test]
    fn before_print_marks_timeline_content() {
        let mut dom = MemoryDom::new();
        let body = dom.body_id();
        let block = dom.append(body, Element::new("div").class("timeline-content"));
        let mut page = mount_arabic(dom);
        page.handle(PageEvent::BeforePrint);
        assert_eq!(page.dom().style(&block, "page-break-inside"), "avoid");
    }

    #[test]
    fn empty_page_survives_every_event() {
        let mut page = mount_arabic(MemoryDom::new());
        let body = page.dom().body_id();
        for event in [
            PageEvent::Load,
            PageEvent::Scroll,
            click(body),
            PageEvent::KeyDown("Escape".into()),
            PageEvent::BeforePrint,
            PageEvent::BecameVisible(body),
            PageEvent::Timer(Timer::FadeIn),
            PageEvent::Timer(Timer::EndEasterEgg),
        ] {
            page.handle(event);
        }
        assert!(!page.open_image_modal("a.png", None));
    }
}
