//! Browser-backed document and scheduler built on `web-sys`.

use gloo_timers::callback::Interval as GlooInterval;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys, EventTarget, HtmlButtonElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollToOptions, SvgElement, Window,
};

use crate::dom::{Document, DomEvent, Element, EventKind, Handler, ScrollMetrics};
use crate::error::PageError;
use crate::schedule::{Intersection, Interval, Scheduler, VisibilityCallback, VisibilityWatcher, WatchOptions};

fn attach(target: &EventTarget, kind: EventKind, mut handler: Handler) {
    let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let dom_event = DomEvent::default();
        handler(&dom_event);
        if dom_event.default_prevented() {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    if let Err(err) = target.add_event_listener_with_callback(kind.name(), callback.as_ref().unchecked_ref()) {
        debug!("Failed to attach {} listener: {}", kind.name(), PageError::from(err));
        return;
    }
    // Listeners stay registered for the whole page session.
    callback.forget();
}

#[derive(Clone, Debug)]
pub struct WebElement(web_sys::Element);

impl Element for WebElement {
    fn set_style(&self, property: &str, value: &str) {
        let style = if let Some(html) = self.0.dyn_ref::<HtmlElement>() {
            html.style()
        } else if let Some(svg) = self.0.dyn_ref::<SvgElement>() {
            svg.style()
        } else {
            return;
        };
        let _ = style.set_property(property, value);
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn toggle_class(&self, class: &str) {
        let _ = self.0.class_list().toggle(class);
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: f64::from(self.0.scroll_left()),
            visible: f64::from(self.0.client_width()),
            total: f64::from(self.0.scroll_width()),
        }
    }

    fn scroll_by_smooth(&self, left: f64) {
        let options = ScrollToOptions::new();
        options.set_left(left);
        options.set_behavior(ScrollBehavior::Smooth);
        self.0.scroll_by_with_scroll_to_options(&options);
    }

    fn scroll_into_view_smooth(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn listen(&self, kind: EventKind, handler: Handler) {
        attach(&self.0, kind, handler);
    }
}

#[derive(Clone, Debug)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    pub fn current() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        Ok(Self { window, document })
    }

    fn is_loading(&self) -> bool {
        js_sys::Reflect::get(&self.document, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|state| state.as_string())
            .map_or(false, |state| state == "loading")
    }

    /// Runs `mount` once the DOM is parsed: right away if it already is,
    /// otherwise on `DOMContentLoaded`.
    pub fn on_ready<F>(&self, mount: F)
    where
        F: FnOnce(WebDocument) + 'static,
    {
        if !self.is_loading() {
            mount(self.clone());
            return;
        }

        let document = self.clone();
        let callback = Closure::once(move |_: web_sys::Event| mount(document));
        if let Err(err) = self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
        {
            debug!("Failed to wait for DOMContentLoaded: {}", PageError::from(err));
            return;
        }
        callback.forget();
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn query(&self, selector: &str) -> Option<WebElement> {
        self.document.query_selector(selector).ok().flatten().map(WebElement)
    }

    fn query_all(&self, selector: &str) -> Vec<WebElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect()
    }

    fn page_offset(&self) -> f64 {
        let offset = self.window.scroll_y().unwrap_or(0.0);
        if offset != 0.0 {
            return offset;
        }
        self.document
            .document_element()
            .map_or(0.0, |root| f64::from(root.scroll_top()))
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn listen_window(&self, kind: EventKind, handler: Handler) {
        attach(&self.window, kind, handler);
    }
}

pub struct WebInterval(GlooInterval);

impl Interval for WebInterval {
    fn cancel(self) {
        let _ = self.0.cancel();
    }
}

pub struct WebWatcher(IntersectionObserver);

impl VisibilityWatcher<WebElement> for WebWatcher {
    fn observe(&self, target: &WebElement) {
        self.0.observe(&target.0);
    }

    fn unobserve(&self, target: &WebElement) {
        self.0.unobserve(&target.0);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    type Element = WebElement;
    type Interval = WebInterval;
    type Watcher = WebWatcher;

    fn every(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> WebInterval {
        WebInterval(GlooInterval::new(period_ms, move || tick()))
    }

    fn watch_visibility(
        &self,
        options: &WatchOptions,
        mut on_change: VisibilityCallback<WebElement, WebWatcher>,
    ) -> Result<WebWatcher, PageError> {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let intersections: Vec<Intersection<WebElement>> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| Intersection {
                    target: WebElement(entry.target()),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect();
            on_change(&intersections, &WebWatcher(observer));
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        callback.forget();
        Ok(WebWatcher(observer))
    }
}
