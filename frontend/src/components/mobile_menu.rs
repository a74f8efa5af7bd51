use std::rc::Rc;

use log::debug;

use crate::config::MobileMenuConfig;
use crate::dom::{Document, Element, EventKind};

const ACTIVE_CLASS: &str = "active";

struct MenuParts<E> {
    toggle: E,
    menu: E,
}

impl<E: Element> MenuParts<E> {
    // Both flip together so the button never disagrees with the menu.
    fn toggle(&self) {
        self.menu.toggle_class(ACTIVE_CLASS);
        self.toggle.toggle_class(ACTIVE_CLASS);
    }
}

/// Hamburger button that opens and closes the main menu.
pub struct MobileMenu<E> {
    parts: Option<Rc<MenuParts<E>>>,
}

/// Whether the page should get a mobile menu at this viewport width.
pub fn wanted(config: &MobileMenuConfig, viewport_width: f64) -> bool {
    config.enabled && viewport_width < config.breakpoint
}

impl<E: Element> MobileMenu<E> {
    pub fn mount<D>(document: &D, config: &MobileMenuConfig) -> Self
    where
        D: Document<Element = E>,
    {
        let (Some(toggle), Some(menu)) = (document.query(&config.toggle), document.query(&config.menu)) else {
            debug!("Mobile menu elements missing");
            return Self { parts: None };
        };

        let parts = Rc::new(MenuParts { toggle, menu });
        let handler_parts = parts.clone();
        parts
            .toggle
            .listen(EventKind::Click, Box::new(move |_| handler_parts.toggle()));

        Self { parts: Some(parts) }
    }

    pub fn is_inert(&self) -> bool {
        self.parts.is_none()
    }

    pub fn toggle(&self) {
        if let Some(parts) = &self.parts {
            parts.toggle();
        }
    }
}
