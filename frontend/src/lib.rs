//! Storefront page behaviors: banner rotation, menu strips, sticky header,
//! smooth anchors, lazy reveal and the mobile menu.

pub mod config;
pub mod dom;
pub mod error;
pub mod page;
pub mod schedule;
pub mod web;
#[cfg(test)]
mod testing;

pub mod components {
    pub mod banner;
    pub mod lazy_observer;
    pub mod menu_scroller;
    pub mod mobile_menu;
    pub mod smooth_scroll;
    pub mod sticky_header;
}
