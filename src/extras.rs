//! Small page utilities: CV links, footer year, print layout, the console
//! greeting and the Konami-code easter egg.

use crate::config::{ElementsConfig, PdfConfig};
use crate::dom::{Dom, Query, Window};
use std::collections::VecDeque;

/// How a CV view request was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfOpen {
    NewContext,
    /// Popup blocked or failed; navigated in place instead.
    SameWindow,
}

pub struct PdfLinks<N> {
    view: Option<N>,
    download: Option<N>,
    download_name: String,
}

impl<N: Clone + PartialEq> PdfLinks<N> {
    pub fn resolve<D: Dom<Node = N>>(dom: &D, elements: &ElementsConfig, pdf: &PdfConfig) -> Self {
        Self {
            view: dom.element_by_id(&elements.view_pdf),
            download: dom.element_by_id(&elements.download_pdf),
            download_name: pdf.download_name.clone(),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.view.iter().chain(self.download.iter())
    }

    pub fn is_view(&self, node: &N) -> bool {
        self.view.as_ref() == Some(node)
    }

    pub fn is_download(&self, node: &N) -> bool {
        self.download.as_ref() == Some(node)
    }

    /// Open the view link's target in a new context, falling back to the
    /// current one. `None` when the link or its `href` is missing.
    pub fn view<D, W>(&self, dom: &D, window: &mut W) -> Option<PdfOpen>
    where
        D: Dom<Node = N>,
        W: Window,
    {
        let href = dom.attribute(self.view.as_ref()?, "href")?;
        log::info!("opening PDF: {href}");
        match window.open(&href) {
            Ok(true) => Some(PdfOpen::NewContext),
            Ok(false) => {
                log::warn!("popup blocked, opening {href} in place");
                window.navigate(&href);
                Some(PdfOpen::SameWindow)
            }
            Err(e) => {
                log::error!("error opening PDF: {e}");
                window.navigate(&href);
                Some(PdfOpen::SameWindow)
            }
        }
    }

    /// Make sure the download link carries a `download` attribute.
    pub fn prepare_download<D: Dom<Node = N>>(&self, dom: &mut D) {
        let Some(link) = &self.download else {
            return;
        };
        if !dom.has_attribute(link, "download") {
            dom.set_attribute(link, "download", &self.download_name);
        }
        log::info!("downloading PDF");
    }
}

/// Write the copyright line into `.<footer_class> p`. Returns whether a
/// footer paragraph was found.
pub fn stamp_footer_year<D: Dom>(dom: &mut D, footer_class: &str, template: &str, year: i32) -> bool {
    if template.is_empty() {
        return false;
    }
    let query = Query::descendant(Query::class(footer_class), Query::tag("p"));
    let Some(paragraph) = dom.query_first(&query) else {
        return false;
    };
    dom.set_text_content(&paragraph, &template.replace("{year}", &year.to_string()));
    true
}

/// Keep each `.<class>` block on one printed page.
pub fn keep_together_for_print<D: Dom>(dom: &mut D, class: &str) -> usize {
    let blocks = dom.query_all(&Query::class(class));
    for block in &blocks {
        dom.set_style(block, "page-break-inside", "avoid");
    }
    blocks.len()
}

pub fn log_greeting(lines: &[String]) {
    for line in lines {
        log::info!("{line}");
    }
}

/// Watches the last `pattern.len()` key presses for the pattern.
#[derive(Debug, Clone)]
pub struct KonamiDetector {
    pattern: Vec<String>,
    recent: VecDeque<String>,
}

impl KonamiDetector {
    pub fn new(pattern: Vec<String>) -> Self {
        let recent = VecDeque::with_capacity(pattern.len());
        Self { pattern, recent }
    }

    /// Record `key`; true when the latest presses spell the pattern.
    pub fn push(&mut self, key: &str) -> bool {
        if self.pattern.is_empty() {
            return false;
        }
        if self.recent.len() == self.pattern.len() {
            self.recent.pop_front();
        }
        self.recent.push_back(key.to_string());
        self.recent.iter().eq(self.pattern.iter())
    }
}
