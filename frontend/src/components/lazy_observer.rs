use log::debug;

use crate::config::LazyConfig;
use crate::dom::{Document, Element};
use crate::schedule::{Intersection, Scheduler, VisibilityWatcher, WatchOptions};

/// Plays an entrance animation the first time each menu link scrolls into view.
pub struct LazyObserver<W> {
    watcher: Option<W>,
    observed: usize,
}

impl<W> LazyObserver<W> {
    pub fn mount<D, S>(document: &D, scheduler: &S, config: &LazyConfig) -> Self
    where
        D: Document,
        S: Scheduler<Element = D::Element, Watcher = W>,
        W: VisibilityWatcher<D::Element>,
    {
        let options = WatchOptions {
            threshold: config.threshold,
            root_margin: config.root_margin.clone(),
        };
        let animation = config.animation.clone();

        let watcher = match scheduler.watch_visibility(
            &options,
            Box::new(move |entries: &[Intersection<D::Element>], watcher: &W| {
                for entry in entries.iter().filter(|entry| entry.is_intersecting) {
                    entry.target.set_style("animation", &animation);
                    watcher.unobserve(&entry.target);
                }
            }),
        ) {
            Ok(watcher) => watcher,
            Err(err) => {
                debug!("Visibility watcher unavailable: {}", err);
                return Self { watcher: None, observed: 0 };
            }
        };

        let targets = document.query_all(&config.selector);
        for target in &targets {
            watcher.observe(target);
        }

        Self {
            watcher: Some(watcher),
            observed: targets.len(),
        }
    }

    pub fn is_inert(&self) -> bool {
        self.watcher.is_none()
    }

    /// Number of elements registered at mount time.
    pub fn observed(&self) -> usize {
        self.observed
    }
}
