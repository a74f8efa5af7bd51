use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;

use crate::config::BannerConfig;
use crate::dom::{Document, Element, EventKind};
use crate::schedule::{Interval, Scheduler};

const ACTIVE_CLASS: &str = "active";

struct Indicators<E> {
    items: Vec<E>,
    slide_count: usize,
    current: Cell<usize>,
}

impl<E: Element> Indicators<E> {
    fn go_to(&self, index: usize) {
        self.current.set(index);
        self.refresh();
    }

    fn advance(&self) {
        self.go_to((self.current.get() % self.slide_count + 1) % self.slide_count);
    }

    fn refresh(&self) {
        let current = self.current.get();
        for (index, indicator) in self.items.iter().enumerate() {
            if index == current {
                indicator.add_class(ACTIVE_CLASS);
                indicator.set_style("opacity", "1");
            } else {
                indicator.remove_class(ACTIVE_CLASS);
                indicator.set_style("opacity", "0.5");
            }
        }
    }
}

/// Rotating banner position shown through dot and slide indicators.
pub struct BannerSlider<E, I> {
    indicators: Rc<Indicators<E>>,
    auto_play: RefCell<Option<I>>,
}

impl<E: Element, I: Interval> BannerSlider<E, I> {
    pub fn mount<D, S>(document: &D, scheduler: &S, config: &BannerConfig) -> Self
    where
        D: Document<Element = E>,
        S: Scheduler<Element = E, Interval = I>,
    {
        let items = document.query_all(&config.indicators);
        if items.is_empty() {
            debug!("Banner has no indicators");
        }

        let slider = Self {
            indicators: Rc::new(Indicators {
                items,
                slide_count: config.slides.len().max(1),
                current: Cell::new(0),
            }),
            auto_play: RefCell::new(None),
        };

        for (index, indicator) in slider.indicators.items.iter().enumerate() {
            let indicators = slider.indicators.clone();
            indicator.listen(
                EventKind::Click,
                Box::new(move |_| indicators.go_to(index)),
            );
        }

        let indicators = slider.indicators.clone();
        let interval = scheduler.every(config.interval_ms, Box::new(move || indicators.advance()));
        *slider.auto_play.borrow_mut() = Some(interval);

        slider
    }

    /// Jumps to `index`. Out-of-range values leave every indicator inactive.
    pub fn go_to_slide(&self, index: usize) {
        self.indicators.go_to(index);
    }

    pub fn current_slide(&self) -> usize {
        self.indicators.current.get()
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play.borrow().is_some()
    }

    pub fn stop_auto_play(&self) {
        if let Some(interval) = self.auto_play.borrow_mut().take() {
            interval.cancel();
        }
    }
}
