//! Image lightbox for certificate thumbnails.
//!
//! Open state is the modal's inline `display: flex`; page scrolling is
//! suspended through `overflow: hidden` on `<body>` while it is shown.

use crate::config::ElementsConfig;
use crate::dom::Dom;

const SHOWN: &str = "flex";

pub struct ModalController<N> {
    modal: Option<N>,
    image: Option<N>,
    caption: Option<N>,
    body: Option<N>,
}

impl<N: Clone + PartialEq> ModalController<N> {
    pub fn resolve<D: Dom<Node = N>>(dom: &D, elements: &ElementsConfig) -> Self {
        Self {
            modal: dom.element_by_id(&elements.modal),
            image: dom.element_by_id(&elements.modal_image),
            caption: dom.element_by_id(&elements.modal_caption),
            body: dom.body(),
        }
    }

    pub fn modal_node(&self) -> Option<&N> {
        self.modal.as_ref()
    }

    pub fn is_open<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        self.modal
            .as_ref()
            .is_some_and(|m| dom.style(m, "display") == SHOWN)
    }

    /// Show `src` with `caption`. Needs both the modal and its image.
    pub fn open<D: Dom<Node = N>>(&self, dom: &mut D, src: &str, caption: Option<&str>) -> bool {
        let (Some(modal), Some(image)) = (&self.modal, &self.image) else {
            return false;
        };
        dom.set_style(modal, "display", SHOWN);
        dom.set_attribute(image, "src", src);
        if let Some(caption_node) = &self.caption {
            dom.set_text_content(caption_node, caption.unwrap_or_default());
        }
        if let Some(body) = &self.body {
            dom.set_style(body, "overflow", "hidden");
        }
        true
    }

    pub fn close<D: Dom<Node = N>>(&self, dom: &mut D) {
        let Some(modal) = &self.modal else {
            return;
        };
        dom.set_style(modal, "display", "none");
        if let Some(body) = &self.body {
            dom.set_style(body, "overflow", "");
        }
    }

    /// Close when the click landed on the backdrop itself, not on the image
    /// or caption inside it.
    pub fn on_click<D: Dom<Node = N>>(&self, dom: &mut D, current: &N, target: &N) -> bool {
        let on_backdrop = self.modal.as_ref() == Some(current) && current == target;
        if on_backdrop {
            self.close(dom);
        }
        on_backdrop
    }

    /// Escape closes the modal when it is shown.
    pub fn on_escape<D: Dom<Node = N>>(&self, dom: &mut D) -> bool {
        if !self.is_open(dom) {
            return false;
        }
        self.close(dom);
        true
    }
}
