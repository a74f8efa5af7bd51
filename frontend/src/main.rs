use log::{error, info};

use storefront::config::{self, PageConfig};
use storefront::page::Page;
use storefront::web::{WebDocument, WebScheduler};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page behaviors");
    let document = match WebDocument::current() {
        Ok(document) => document,
        Err(err) => {
            error!("Cannot attach page behaviors: {}", err);
            return;
        }
    };

    document.on_ready(|document| {
        let page = Page::mount(&document, &WebScheduler, &PageConfig::default());
        // Controllers live as long as the page does.
        std::mem::forget(page);
    });
}
