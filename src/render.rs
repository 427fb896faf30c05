//! Localized rendering: applying a language to the whole document.
//!
//! [`LocalizedRenderer::apply_language`] is the single entry point for every
//! language change (startup, toggle clicks, the exported `setLanguage`). It
//! runs synchronously and is idempotent: applying the same language twice
//! leaves the document exactly as applying it once, and alternating calls
//! always reflect only the most recent one.
//!
//! ## Leaf-only text replacement
//!
//! A translatable element's text is overwritten only when it has no
//! translatable descendant. Containers such as
//! `<p data-ar=".." data-en="..">text <a data-ar=".." data-en="..">link</a></p>`
//! keep their structure and delegate translation to their children. The
//! containment check is re-run per element on every call, because replacing a
//! leaf's text never changes which elements are leaves, but nothing here
//! assumes a flat page.
//!
//! ## Missing pieces
//!
//! No toggle, no language root, no `<title>`: the corresponding step is
//! skipped. A translatable element whose attribute for the requested language
//! is missing keeps its current text.

use crate::config::LanguageLabels;
use crate::dom::{Dom, Query};
use crate::language::{Language, LanguageStore};

/// Session state: the language currently applied to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub language: Language,
}

/// Elements the renderer writes to besides translatable nodes.
#[derive(Debug, Clone)]
pub struct RenderTargets<N> {
    /// Receives `lang` and `dir`.
    pub root: Option<N>,
    pub toggle: Option<N>,
    pub title: Option<N>,
}

impl<N> RenderTargets<N> {
    /// Resolve from the document: `root_id` falling back to `<html>`, the
    /// toggle by id, and the first `<title>`.
    pub fn resolve<D: Dom<Node = N>>(dom: &D, root_id: &str, toggle_id: &str) -> Self {
        Self {
            root: dom
                .element_by_id(root_id)
                .or_else(|| dom.document_element()),
            toggle: dom.element_by_id(toggle_id),
            title: dom.query_first(&Query::tag("title")),
        }
    }
}

pub struct LocalizedRenderer<N, S> {
    store: S,
    session: Session,
    labels: LanguageLabels,
    targets: RenderTargets<N>,
}

impl<N: Clone + PartialEq, S: LanguageStore> LocalizedRenderer<N, S> {
    pub fn new(store: S, labels: LanguageLabels, targets: RenderTargets<N>) -> Self {
        let session = Session {
            language: store.get(),
        };
        Self {
            store,
            session,
            labels,
            targets,
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_toggle(&self, node: &N) -> bool {
        self.targets.toggle.as_ref() == Some(node)
    }

    /// Toggle control, for event wiring.
    pub fn toggle_node(&self) -> Option<&N> {
        self.targets.toggle.as_ref()
    }

    /// Re-read the persisted language and apply it.
    pub fn init<D: Dom<Node = N>>(&mut self, dom: &mut D) -> Language {
        let lang = self.store.get();
        self.apply_language(dom, lang);
        lang
    }

    /// Switch to the other language.
    pub fn toggle<D: Dom<Node = N>>(&mut self, dom: &mut D) -> Language {
        let next = self.session.language.other();
        self.apply_language(dom, next);
        next
    }

    pub fn apply_language<D: Dom<Node = N>>(&mut self, dom: &mut D, lang: Language) {
        log::debug!("applying language {lang}");
        self.session.language = lang;
        self.store.set(lang);

        if let Some(root) = &self.targets.root {
            dom.set_attribute(root, "lang", lang.code());
            dom.set_attribute(root, "dir", lang.dir());
        }

        if let Some(toggle) = &self.targets.toggle {
            dom.set_text_content(toggle, self.labels.get(lang.other()));
        }

        if let Some(title) = &self.targets.title {
            if let Some(text) = dom.attribute(title, lang.attribute()) {
                dom.set_text_content(title, &text);
            }
        }

        render_translatable(dom, lang);
    }
}

/// Overwrite the text of every leaf translatable element with its `lang`
/// attribute. Returns how many elements were written.
pub fn render_translatable<D: Dom>(dom: &mut D, lang: Language) -> usize {
    let mut written = 0;
    for node in dom.query_all(&Query::Translatable) {
        if !dom.query_within(&node, &Query::Translatable).is_empty() {
            continue;
        }
        if let Some(text) = dom.attribute(&node, lang.attribute()) {
            dom.set_text_content(&node, &text);
            written += 1;
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryDom, NodeId};
    use crate::language::MemoryStore;

    struct Fixture {
        dom: MemoryDom,
        renderer: LocalizedRenderer<NodeId, MemoryStore>,
        toggle: NodeId,
        heading: NodeId,
        container: NodeId,
        link: NodeId,
    }

    fn fixture(store: MemoryStore) -> Fixture {
        let mut dom = MemoryDom::new();
        let head = dom.head_id();
        dom.append(
            head,
            Element::new("title")
                .attr("data-ar", "مصطفى | السيرة")
                .attr("data-en", "Mostafa | CV")
                .text("مصطفى | السيرة"),
        );
        let body = dom.body_id();
        let toggle = dom.append(body, Element::new("button").id("langToggle").text("EN"));
        let heading = dom.append(body, Element::new("h1").translated("نبذة", "About"));
        let container = dom.append(body, Element::new("p").translated("", ""));
        let link = dom.append(container, Element::new("a").translated("تواصل", "Contact"));
        let targets = RenderTargets::resolve(&dom, "html", "langToggle");
        let renderer = LocalizedRenderer::new(store, LanguageLabels::default(), targets);
        Fixture {
            dom,
            renderer,
            toggle,
            heading,
            container,
            link,
        }
    }

    fn snapshot(f: &Fixture) -> Vec<(String, Option<String>, Option<String>)> {
        let mut nodes = f.dom.query_all(&Query::Translatable);
        nodes.push(f.toggle);
        nodes.push(f.dom.root_id());
        nodes
            .iter()
            .map(|n| {
                (
                    f.dom.text_content(n),
                    f.dom.attribute(n, "lang"),
                    f.dom.attribute(n, "dir"),
                )
            })
            .collect()
    }

    #[test]
    fn english_sets_ltr_and_toggle_label() {
        let mut f = fixture(MemoryStore::new(Language::Ar));
        f.renderer.apply_language(&mut f.dom, Language::En);
        let root = f.dom.root_id();
        assert_eq!(f.dom.attribute(&root, "lang").as_deref(), Some("en"));
        assert_eq!(f.dom.attribute(&root, "dir").as_deref(), Some("ltr"));
        assert_eq!(f.dom.text_content(&f.toggle), "العربية");
        assert_eq!(f.dom.text_content(&f.heading), "About");
    }

    #[test]
    fn arabic_sets_rtl_and_toggle_label() {
        let mut f = fixture(MemoryStore::new(Language::Ar));
        f.renderer.apply_language(&mut f.dom, Language::Ar);
        let root = f.dom.root_id();
        assert_eq!(f.dom.attribute(&root, "dir").as_deref(), Some("rtl"));
        assert_eq!(f.dom.text_content(&f.toggle), "EN");
    }

    #[test]
    fn title_follows_language() {
        let mut f = fixture(MemoryStore::new(Language::Ar));
        f.renderer.apply_language(&mut f.dom, Language::En);
        let title = f.dom.query_first(&Query::tag("title")).unwrap();
        assert_eq!(f.dom.text_content(&title), "Mostafa | CV");
    }

    #[test]
    fn container_is_not_overwritten() {
        let mut f = fixture(MemoryStore::new(Language::Ar));
        f.renderer.apply_language(&mut f.dom, Language::En);
        assert_eq!(f.dom.children(f.container), [f.link]);
        assert_eq!(f.dom.text_content(&f.link), "Contact");
        assert_eq!(f.dom.text_content(&f.container), "Contact");
    }

    #[test]
    fn apply_is_idempotent() {
        let mut f = fixture(MemoryStore::new(Language::Ar));
        f.renderer.apply_language(&mut f.dom, Language::En);
        let once = snapshot(&f);
        f.renderer.apply_language(&mut f.dom, Language::En);
        assert_eq!(snapshot(&f), once);
    }

    #[test]
    fn last_write_wins() {
        let mut f = fixture(MemoryStore::new(Language::Ar));
        f.renderer.apply_language(&mut f.dom, Language::En);
        f.renderer.apply_language(&mut f.dom, Language::Ar);
        f.renderer.apply_language(&mut f.dom, Language::En);
        assert_eq!(f.dom.text_content(&f.heading), "About");
        assert_eq!(f.renderer.session().language, Language::En);
        assert_eq!(f.renderer.store().raw(), Some("en"));
    }

    #[test]
    fn apply_persists_every_change() {
        let mut f = fixture(MemoryStore::new(Language::Ar));
        f.renderer.apply_language(&mut f.dom, Language::En);
        f.renderer.toggle(&mut f.dom);
        assert_eq!(f.renderer.store().writes(), 2);
        assert_eq!(f.renderer.store().raw(), Some("ar"));
    }

    #[test]
    fn init_reads_store() {
        let mut f = fixture(MemoryStore::with_raw("en", Language::Ar));
        assert_eq!(f.renderer.init(&mut f.dom), Language::En);
        assert_eq!(f.dom.text_content(&f.heading), "About");
    }

    #[test]
    fn init_with_invalid_stored_value_uses_default() {
        let mut f = fixture(MemoryStore::with_raw("de", Language::Ar));
        assert_eq!(f.renderer.init(&mut f.dom), Language::Ar);
        let root = f.dom.root_id();
        assert_eq!(f.dom.attribute(&root, "dir").as_deref(), Some("rtl"));
    }

    #[test]
    fn toggle_round_trip_restores_direction() {
        let mut f = fixture(MemoryStore::new(Language::Ar));
        f.renderer.apply_language(&mut f.dom, Language::Ar);
        let root = f.dom.root_id();
        let before = (f.dom.attribute(&root, "lang"), f.dom.attribute(&root, "dir"));
        f.renderer.toggle(&mut f.dom);
        f.renderer.toggle(&mut f.dom);
        let after = (f.dom.attribute(&root, "lang"), f.dom.attribute(&root, "dir"));
        assert_eq!(before, after);
    }

    #[test]
    fn missing_optional_elements_are_skipped() {
        let mut dom = MemoryDom::new();
        let body = dom.body_id();
        let only = dom.append(body, Element::new("span").translated("نعم", "Yes"));
        let targets = RenderTargets::resolve(&dom, "missing-root", "missing-toggle");
        let mut renderer =
            LocalizedRenderer::new(MemoryStore::default(), LanguageLabels::default(), targets);
        renderer.apply_language(&mut dom, Language::En);
        assert_eq!(dom.text_content(&only), "Yes");
        // root falls back to <html>
        let root = dom.root_id();
        assert_eq!(dom.attribute(&root, "lang").as_deref(), Some("en"));
    }

    #[test]
    fn title_without_language_attribute_is_left_alone() {
        let mut dom = MemoryDom::new();
        let head = dom.head_id();
        let title = dom.append(head, Element::new("title").text("Portfolio"));
        let targets = RenderTargets::resolve(&dom, "html", "langToggle");
        let mut renderer =
            LocalizedRenderer::new(MemoryStore::default(), LanguageLabels::default(), targets);
        renderer.apply_language(&mut dom, Language::En);
        assert_eq!(dom.text_content(&title), "Portfolio");
    }

    #[test]
    fn render_counts_only_leaves() {
        let mut f = fixture(MemoryStore::new(Language::Ar));
        // title, heading and link are leaves; the container is not
        assert_eq!(render_translatable(&mut f.dom, Language::En), 3);
    }
}
