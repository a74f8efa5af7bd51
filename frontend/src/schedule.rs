//! Timer and visibility-watcher capabilities.

use crate::dom::Element;
use crate::error::PageError;

/// A running repeating timer. Dropping the handle stops it as well.
pub trait Interval: 'static {
    fn cancel(self);
}

pub trait VisibilityWatcher<E>: 'static {
    fn observe(&self, target: &E);
    fn unobserve(&self, target: &E);
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Fraction of the target that must be visible, 0.0..=1.0.
    pub threshold: f64,
    /// CSS margin grown around the viewport, e.g. `"50px"`.
    pub root_margin: String,
}

#[derive(Debug, Clone)]
pub struct Intersection<E> {
    pub target: E,
    pub is_intersecting: bool,
}

pub type VisibilityCallback<E, W> = Box<dyn FnMut(&[Intersection<E>], &W)>;

pub trait Scheduler {
    type Element: Element;
    type Interval: Interval;
    type Watcher: VisibilityWatcher<Self::Element>;

    /// Calls `tick` every `period_ms` milliseconds until the handle is cancelled.
    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Interval;

    /// Creates a watcher that reports visibility changes of observed elements.
    fn watch_visibility(
        &self,
        options: &WatchOptions,
        on_change: VisibilityCallback<Self::Element, Self::Watcher>,
    ) -> Result<Self::Watcher, PageError>;
}
