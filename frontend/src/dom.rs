//! Element locator capability the page behaviors are written against.
//!
//! The browser implementation lives in `web`; tests drive the same
//! controllers through an in-memory document.

use std::cell::Cell;

/// Horizontal scroll position of a scroll container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current scroll offset (`scrollLeft`).
    pub offset: f64,
    /// Visible width (`clientWidth`).
    pub visible: f64,
    /// Full scrollable width (`scrollWidth`).
    pub total: f64,
}

impl ScrollMetrics {
    pub fn new(offset: f64, visible: f64, total: f64) -> Self {
        Self { offset, visible, total }
    }

    pub fn at_start(&self) -> bool {
        self.offset == 0.0
    }

    /// True once the visible window reaches `total - tolerance`.
    pub fn at_end(&self, tolerance: f64) -> bool {
        self.offset + self.visible >= self.total - tolerance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
    Resize,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
        }
    }
}

/// Event handed to listeners. Calling `prevent_default` is forwarded to
/// the host event once the handler returns.
#[derive(Debug, Default)]
pub struct DomEvent {
    default_prevented: Cell<bool>,
}

impl DomEvent {
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Handler = Box<dyn FnMut(&DomEvent)>;

/// Opaque handle to one page element. Clones refer to the same element.
pub trait Element: Clone + 'static {
    fn set_style(&self, property: &str, value: &str);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn toggle_class(&self, class: &str);
    fn set_disabled(&self, disabled: bool);
    fn attribute(&self, name: &str) -> Option<String>;
    fn scroll_metrics(&self) -> ScrollMetrics;
    /// Animated horizontal scroll by a signed pixel distance.
    fn scroll_by_smooth(&self, left: f64);
    fn scroll_into_view_smooth(&self);
    fn listen(&self, kind: EventKind, handler: Handler);
}

/// The host document plus the window around it.
///
/// Selectors that the host cannot parse behave like selectors with no match.
pub trait Document: Clone + 'static {
    type Element: Element;

    fn query(&self, selector: &str) -> Option<Self::Element>;
    /// All matches in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    /// Vertical window scroll offset.
    fn page_offset(&self) -> f64;
    fn viewport_width(&self) -> f64;
    fn listen_window(&self, kind: EventKind, handler: Handler);
}
