use std::rc::Rc;

use log::{debug, info};

use crate::components::{
    banner::BannerSlider,
    lazy_observer::LazyObserver,
    menu_scroller::MenuScroller,
    mobile_menu::{self, MobileMenu},
    smooth_scroll::SmoothScroll,
    sticky_header::StickyHeader,
};
use crate::config::PageConfig;
use crate::dom::{Document, EventKind};
use crate::schedule::Scheduler;

/// Every behavior mounted on one page load. Dropping it stops the banner timer.
pub struct Page<D: Document, S: Scheduler<Element = D::Element>> {
    pub banner: BannerSlider<D::Element, S::Interval>,
    pub menus: Rc<Vec<MenuScroller<D::Element>>>,
    pub header: StickyHeader<D::Element>,
    pub smooth_scroll: SmoothScroll,
    pub lazy: LazyObserver<S::Watcher>,
    pub mobile_menu: Option<MobileMenu<D::Element>>,
}

impl<D: Document, S: Scheduler<Element = D::Element>> Page<D, S> {
    pub fn mount(document: &D, scheduler: &S, config: &PageConfig) -> Self {
        info!("Mounting page behaviors");

        let banner = BannerSlider::mount(document, scheduler, &config.banner);

        let menus: Rc<Vec<_>> = Rc::new(
            config
                .menus
                .iter()
                .map(|strip| MenuScroller::mount(document, strip, config.scroll_step))
                .collect(),
        );

        let header = StickyHeader::mount(document, &config.header);
        let smooth_scroll = SmoothScroll::mount(document, &config.anchors);
        let lazy = LazyObserver::mount(document, scheduler, &config.lazy);

        {
            let menus = menus.clone();
            document.listen_window(
                EventKind::Resize,
                Box::new(move |_| {
                    for menu in menus.iter() {
                        menu.update_buttons();
                    }
                }),
            );
        }

        let mobile_menu = if mobile_menu::wanted(&config.mobile_menu, document.viewport_width()) {
            Some(MobileMenu::mount(document, &config.mobile_menu))
        } else {
            debug!("Mobile menu not enabled for this page");
            None
        };

        info!(
            "Page behaviors mounted: {} active menu strips, {} anchors, {} lazy links",
            menus.iter().filter(|menu| !menu.is_inert()).count(),
            smooth_scroll.anchor_count(),
            lazy.observed()
        );

        Self {
            banner,
            menus,
            header,
            smooth_scroll,
            lazy,
            mobile_menu,
        }
    }
}
