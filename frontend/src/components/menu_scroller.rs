use std::rc::Rc;

use log::debug;

use crate::config::MenuStripConfig;
use crate::dom::{Document, Element, EventKind, ScrollMetrics};

/// Slack for sub-pixel rounding at the right end of a strip.
pub const END_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub left_disabled: bool,
    pub right_disabled: bool,
}

impl ButtonState {
    pub fn from_metrics(metrics: ScrollMetrics) -> Self {
        Self {
            left_disabled: metrics.at_start(),
            right_disabled: metrics.at_end(END_TOLERANCE),
        }
    }
}

fn apply<E: Element>(button: &E, disabled: bool) {
    button.set_disabled(disabled);
    button.set_style("opacity", if disabled { "0.5" } else { "1" });
}

struct Strip<E> {
    container: E,
    left: E,
    right: E,
}

impl<E: Element> Strip<E> {
    fn scroll(&self, distance: f64) {
        self.container.scroll_by_smooth(distance);
    }

    fn update_buttons(&self) -> ButtonState {
        let state = ButtonState::from_metrics(self.container.scroll_metrics());
        apply(&self.left, state.left_disabled);
        apply(&self.right, state.right_disabled);
        state
    }
}

/// A horizontally scrolling menu strip with previous/next buttons.
///
/// Inert when the container or either button is missing from the page.
pub struct MenuScroller<E> {
    strip: Option<Rc<Strip<E>>>,
}

impl<E: Element> MenuScroller<E> {
    pub fn mount<D>(document: &D, selectors: &MenuStripConfig, step: f64) -> Self
    where
        D: Document<Element = E>,
    {
        let container = document.query(&selectors.container);
        let left = document.query(&selectors.left_button);
        let right = document.query(&selectors.right_button);

        let (Some(container), Some(left), Some(right)) = (container, left, right) else {
            debug!("Menu strip {} is incomplete, leaving it inert", selectors.container);
            return Self { strip: None };
        };

        let strip = Rc::new(Strip { container, left, right });

        let target = strip.clone();
        strip
            .left
            .listen(EventKind::Click, Box::new(move |_| target.scroll(-step)));

        let target = strip.clone();
        strip
            .right
            .listen(EventKind::Click, Box::new(move |_| target.scroll(step)));

        let target = strip.clone();
        strip.container.listen(
            EventKind::Scroll,
            Box::new(move |_| {
                target.update_buttons();
            }),
        );

        strip.update_buttons();
        Self { strip: Some(strip) }
    }

    pub fn is_inert(&self) -> bool {
        self.strip.is_none()
    }

    /// Smoothly scrolls the strip by a signed pixel distance.
    pub fn scroll(&self, distance: f64) {
        if let Some(strip) = &self.strip {
            strip.scroll(distance);
        }
    }

    /// Recomputes both buttons from the container's current scroll position.
    pub fn update_buttons(&self) -> Option<ButtonState> {
        self.strip.as_ref().map(|strip| strip.update_buttons())
    }
}
