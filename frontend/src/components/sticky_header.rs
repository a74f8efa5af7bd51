use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::config::HeaderConfig;
use crate::dom::{Document, Element, EventKind};

struct HeaderState<E> {
    header: E,
    shadow_after: f64,
    shadow: String,
    last_offset: Cell<f64>,
}

impl<E: Element> HeaderState<E> {
    fn on_scroll(&self, offset: f64) {
        if offset > self.shadow_after {
            self.header.set_style("box-shadow", &self.shadow);
        } else {
            self.header.set_style("box-shadow", "none");
        }
        self.last_offset.set(offset);
    }
}

/// Drops a shadow under the page header once the window is scrolled.
pub struct StickyHeader<E> {
    state: Option<Rc<HeaderState<E>>>,
}

impl<E: Element> StickyHeader<E> {
    pub fn mount<D>(document: &D, config: &HeaderConfig) -> Self
    where
        D: Document<Element = E>,
    {
        let Some(header) = document.query(&config.selector) else {
            debug!("No {} on the page, header shadow disabled", config.selector);
            return Self { state: None };
        };

        let state = Rc::new(HeaderState {
            header,
            shadow_after: config.shadow_after,
            shadow: config.shadow.clone(),
            last_offset: Cell::new(0.0),
        });

        let handler_state = state.clone();
        let window = document.clone();
        document.listen_window(
            EventKind::Scroll,
            Box::new(move |_| handler_state.on_scroll(window.page_offset())),
        );

        Self { state: Some(state) }
    }

    pub fn is_inert(&self) -> bool {
        self.state.is_none()
    }

    pub fn on_scroll(&self, offset: f64) {
        if let Some(state) = &self.state {
            state.on_scroll(offset);
        }
    }

    pub fn last_offset(&self) -> Option<f64> {
        self.state.as_ref().map(|state| state.last_offset.get())
    }
}
