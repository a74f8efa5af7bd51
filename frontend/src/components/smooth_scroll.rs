use log::debug;

use crate::dom::{Document, DomEvent, Element, EventKind};

/// Scrolls `href`'s target into view. Returns false when nothing matches.
pub fn scroll_to_target<D: Document>(document: &D, href: &str) -> bool {
    match document.query(href) {
        Some(target) => {
            target.scroll_into_view_smooth();
            true
        }
        None => false,
    }
}

/// Replaces the jump of in-page anchors with an animated scroll.
pub struct SmoothScroll {
    anchors: usize,
}

impl SmoothScroll {
    pub fn mount<D: Document>(document: &D, selector: &str) -> Self {
        let anchors = document.query_all(selector);
        for anchor in &anchors {
            let document = document.clone();
            let link = anchor.clone();
            anchor.listen(
                EventKind::Click,
                Box::new(move |event: &DomEvent| {
                    event.prevent_default();
                    let href = link.attribute("href").unwrap_or_default();
                    if !scroll_to_target(&document, &href) {
                        debug!("Anchor {:?} has no target", href);
                    }
                }),
            );
        }
        Self { anchors: anchors.len() }
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors
    }
}
