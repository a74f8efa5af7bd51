//! In-memory document and scheduler for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::{Document, DomEvent, Element, EventKind, Handler, ScrollMetrics};
use crate::error::PageError;
use crate::schedule::{Intersection, Interval, Scheduler, VisibilityCallback, VisibilityWatcher, WatchOptions};

#[derive(Default)]
struct FakeNode {
    tag: String,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    style: HashMap<String, String>,
    disabled: bool,
    metrics: ScrollMetrics,
    listeners: Vec<(EventKind, Handler)>,
    scroll_requests: Vec<f64>,
    scrolled_into_view: usize,
}

#[derive(Clone)]
pub struct FakeElement(Rc<RefCell<FakeNode>>);

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.0.borrow();
        write!(f, "<{} class=\"{}\">", node.tag, node.classes.join(" "))
    }
}

impl FakeElement {
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0.borrow_mut().attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn set_metrics(&self, metrics: ScrollMetrics) {
        self.0.borrow_mut().metrics = metrics;
    }

    pub fn set_scroll_offset(&self, offset: f64) {
        self.0.borrow_mut().metrics.offset = offset;
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().style.get(property).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    pub fn listener_count(&self) -> usize {
        self.0.borrow().listeners.len()
    }

    pub fn scroll_requests(&self) -> Vec<f64> {
        self.0.borrow().scroll_requests.clone()
    }

    pub fn scrolled_into_view(&self) -> usize {
        self.0.borrow().scrolled_into_view
    }

    /// Runs every listener registered for `kind` and returns the event.
    pub fn dispatch(&self, kind: EventKind) -> DomEvent {
        let event = DomEvent::default();
        let mut listeners = std::mem::take(&mut self.0.borrow_mut().listeners);
        for (registered, handler) in listeners.iter_mut() {
            if *registered == kind {
                handler(&event);
            }
        }
        let mut node = self.0.borrow_mut();
        listeners.append(&mut node.listeners);
        node.listeners = listeners;
        event
    }

    pub fn click(&self) -> DomEvent {
        self.dispatch(EventKind::Click)
    }

    fn matches(&self, selector: &Selector) -> bool {
        let node = self.0.borrow();
        selector.parts.iter().all(|part| match part {
            Part::Tag(tag) => node.tag == *tag,
            Part::Class(class) => node.classes.iter().any(|c| c == class),
            Part::Id(id) => node.attributes.get("id") == Some(id),
            Part::AttrPrefix(name, prefix) => node
                .attributes
                .get(name)
                .map_or(false, |value| value.starts_with(prefix.as_str())),
        })
    }
}

impl Element for FakeElement {
    fn set_style(&self, property: &str, value: &str) {
        self.0.borrow_mut().style.insert(property.to_string(), value.to_string());
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn toggle_class(&self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.0.borrow().metrics
    }

    fn scroll_by_smooth(&self, left: f64) {
        let mut node = self.0.borrow_mut();
        node.scroll_requests.push(left);
        let max = (node.metrics.total - node.metrics.visible).max(0.0);
        node.metrics.offset = (node.metrics.offset + left).clamp(0.0, max);
    }

    fn scroll_into_view_smooth(&self) {
        self.0.borrow_mut().scrolled_into_view += 1;
    }

    fn listen(&self, kind: EventKind, handler: Handler) {
        self.0.borrow_mut().listeners.push((kind, handler));
    }
}

enum Part {
    Tag(String),
    Class(String),
    Id(String),
    AttrPrefix(String, String),
}

struct Selector {
    parts: Vec<Part>,
}

fn name_end(text: &str) -> usize {
    text.find(|c| matches!(c, '.' | '#' | '[')).unwrap_or(text.len())
}

/// Parses the compound selectors the page uses: `tag`, `.class`, `#id` and
/// `[attr^="prefix"]`. Anything else is rejected like a browser syntax error.
fn parse_compound(text: &str) -> Option<Selector> {
    let mut parts = Vec::new();
    let tag_end = name_end(text);
    if tag_end > 0 {
        parts.push(Part::Tag(text[..tag_end].to_string()));
    }
    let mut rest = &text[tag_end..];

    while let Some(first) = rest.chars().next() {
        match first {
            '.' | '#' => {
                let body = &rest[1..];
                let end = name_end(body);
                let name = &body[..end];
                if name.is_empty() || name.contains(char::is_whitespace) {
                    return None;
                }
                parts.push(if first == '.' {
                    Part::Class(name.to_string())
                } else {
                    Part::Id(name.to_string())
                });
                rest = &body[end..];
            }
            '[' => {
                let end = rest.find(']')?;
                let (name, value) = rest[1..end].split_once("^=")?;
                parts.push(Part::AttrPrefix(
                    name.trim().to_string(),
                    value.trim().trim_matches('"').to_string(),
                ));
                rest = &rest[end + 1..];
            }
            _ => return None,
        }
    }

    (!parts.is_empty()).then_some(Selector { parts })
}

fn parse_list(selector: &str) -> Option<Vec<Selector>> {
    selector.split(',').map(|part| parse_compound(part.trim())).collect()
}

#[derive(Default)]
struct DocumentState {
    nodes: Vec<FakeElement>,
    page_offset: f64,
    viewport_width: f64,
    window_listeners: Vec<(EventKind, Handler)>,
}

#[derive(Clone, Default)]
pub struct FakeDocument(Rc<RefCell<DocumentState>>);

impl FakeDocument {
    pub fn new() -> Self {
        let document = Self::default();
        document.set_viewport_width(1280.0);
        document
    }

    /// Appends an element at the end of the document.
    pub fn add(&self, tag: &str, classes: &[&str]) -> FakeElement {
        let element = FakeElement(Rc::new(RefCell::new(FakeNode {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..FakeNode::default()
        })));
        self.0.borrow_mut().nodes.push(element.clone());
        element
    }

    pub fn set_page_offset(&self, offset: f64) {
        self.0.borrow_mut().page_offset = offset;
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.0.borrow_mut().viewport_width = width;
    }

    pub fn window_listener_count(&self) -> usize {
        self.0.borrow().window_listeners.len()
    }

    pub fn dispatch_window(&self, kind: EventKind) -> DomEvent {
        let event = DomEvent::default();
        let mut listeners = std::mem::take(&mut self.0.borrow_mut().window_listeners);
        for (registered, handler) in listeners.iter_mut() {
            if *registered == kind {
                handler(&event);
            }
        }
        let mut state = self.0.borrow_mut();
        listeners.append(&mut state.window_listeners);
        state.window_listeners = listeners;
        event
    }

    /// Scrolls the window and fires its scroll listeners.
    pub fn scroll_window_to(&self, offset: f64) {
        self.set_page_offset(offset);
        self.dispatch_window(EventKind::Scroll);
    }
}

impl Document for FakeDocument {
    type Element = FakeElement;

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        let Some(selectors) = parse_list(selector) else {
            return Vec::new();
        };
        let nodes = self.0.borrow().nodes.clone();
        nodes
            .into_iter()
            .filter(|node| selectors.iter().any(|s| node.matches(s)))
            .collect()
    }

    fn page_offset(&self) -> f64 {
        self.0.borrow().page_offset
    }

    fn viewport_width(&self) -> f64 {
        self.0.borrow().viewport_width
    }

    fn listen_window(&self, kind: EventKind, handler: Handler) {
        self.0.borrow_mut().window_listeners.push((kind, handler));
    }
}

pub struct FakeInterval {
    active: Rc<Cell<bool>>,
}

impl Interval for FakeInterval {
    fn cancel(self) {
        self.active.set(false);
    }
}

impl Drop for FakeInterval {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

struct TimerSlot {
    period: u32,
    elapsed: u32,
    active: Rc<Cell<bool>>,
    tick: Option<Box<dyn FnMut()>>,
}

struct WatcherState {
    options: WatchOptions,
    observed: Vec<FakeElement>,
    callback: Option<VisibilityCallback<FakeElement, FakeWatcher>>,
}

#[derive(Clone)]
pub struct FakeWatcher(Rc<RefCell<WatcherState>>);

impl FakeWatcher {
    pub fn options(&self) -> WatchOptions {
        self.0.borrow().options.clone()
    }

    pub fn is_observing(&self, target: &FakeElement) -> bool {
        self.0.borrow().observed.contains(target)
    }

    pub fn observed_count(&self) -> usize {
        self.0.borrow().observed.len()
    }

    /// Reports visibility changes; entries for unobserved elements are dropped
    /// the way a browser would never report them.
    pub fn deliver(&self, entries: &[(FakeElement, bool)]) {
        let entries: Vec<Intersection<FakeElement>> = entries
            .iter()
            .filter(|(target, _)| self.is_observing(target))
            .map(|(target, is_intersecting)| Intersection {
                target: target.clone(),
                is_intersecting: *is_intersecting,
            })
            .collect();
        if entries.is_empty() {
            return;
        }
        let callback = self.0.borrow_mut().callback.take();
        if let Some(mut callback) = callback {
            callback(&entries, self);
            self.0.borrow_mut().callback = Some(callback);
        }
    }
}

impl VisibilityWatcher<FakeElement> for FakeWatcher {
    fn observe(&self, target: &FakeElement) {
        if !self.is_observing(target) {
            self.0.borrow_mut().observed.push(target.clone());
        }
    }

    fn unobserve(&self, target: &FakeElement) {
        self.0.borrow_mut().observed.retain(|observed| observed != target);
    }
}

#[derive(Default)]
struct SchedulerState {
    timers: Vec<TimerSlot>,
    watchers: Vec<FakeWatcher>,
}

#[derive(Clone, Default)]
pub struct FakeScheduler(Rc<RefCell<SchedulerState>>);

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_timers(&self) -> usize {
        self.0.borrow().timers.iter().filter(|t| t.active.get()).count()
    }

    pub fn watcher(&self, index: usize) -> Option<FakeWatcher> {
        self.0.borrow().watchers.get(index).cloned()
    }

    /// Moves the clock forward, firing every active timer as often as its
    /// period fits into the elapsed time.
    pub fn advance(&self, ms: u32) {
        let count = self.0.borrow().timers.len();
        for index in 0..count {
            let (fires, active, tick) = {
                let mut state = self.0.borrow_mut();
                let timer = &mut state.timers[index];
                if !timer.active.get() {
                    continue;
                }
                timer.elapsed += ms;
                let fires = timer.elapsed / timer.period;
                timer.elapsed %= timer.period;
                (fires, timer.active.clone(), timer.tick.take())
            };
            if let Some(mut tick) = tick {
                for _ in 0..fires {
                    if !active.get() {
                        break;
                    }
                    tick();
                }
                self.0.borrow_mut().timers[index].tick = Some(tick);
            }
        }
    }
}

impl Scheduler for FakeScheduler {
    type Element = FakeElement;
    type Interval = FakeInterval;
    type Watcher = FakeWatcher;

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> FakeInterval {
        let active = Rc::new(Cell::new(true));
        self.0.borrow_mut().timers.push(TimerSlot {
            period: period_ms.max(1),
            elapsed: 0,
            active: active.clone(),
            tick: Some(tick),
        });
        FakeInterval { active }
    }

    fn watch_visibility(
        &self,
        options: &WatchOptions,
        on_change: VisibilityCallback<FakeElement, FakeWatcher>,
    ) -> Result<FakeWatcher, PageError> {
        let watcher = FakeWatcher(Rc::new(RefCell::new(WatcherState {
            options: options.clone(),
            observed: Vec::new(),
            callback: Some(on_change),
        })));
        self.0.borrow_mut().watchers.push(watcher.clone());
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_selector_keeps_document_order() {
        let document = FakeDocument::new();
        let slide = document.add("div", &["Banner-slide"]);
        let circle = document.add("span", &["Banner-circle"]);
        document.add("div", &["Other"]);

        let found = document.query_all(".Banner-circle, .Banner-slide");
        assert_eq!(found, vec![slide, circle]);
    }

    #[test]
    fn test_attribute_prefix_and_invalid_selectors() {
        let document = FakeDocument::new();
        let anchor = document.add("a", &[]).with_attr("href", "#menu");
        document.add("a", &[]).with_attr("href", "/about");
        document.add("div", &[]).with_attr("id", "menu");

        assert_eq!(document.query_all("a[href^=\"#\"]"), vec![anchor]);
        assert!(document.query("#").is_none());
        assert!(document.query("").is_none());
        assert!(document.query("#menu").is_some());
    }
}
