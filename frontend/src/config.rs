use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq)]
pub struct BannerConfig {
    /// Dots and slide markers share one index space, in document order.
    pub indicators: String,
    pub slides: Vec<String>,
    pub interval_ms: u32,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            indicators: ".Banner-circle, .Banner-slide".to_string(),
            slides: vec![
                "https://www.figma.com/api/mcp/asset/7c35b3b1-23af-4fe5-a598-ebddd749acb4".to_string(),
            ],
            interval_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuStripConfig {
    pub container: String,
    pub left_button: String,
    pub right_button: String,
}

impl MenuStripConfig {
    /// Selectors for a strip following the `<Name>-items` / `<Name>-buttonLeft`
    /// / `<Name>-buttonRight` class convention.
    pub fn named(name: &str) -> Self {
        Self {
            container: format!(".{}-items", name),
            left_button: format!(".{}-buttonLeft", name),
            right_button: format!(".{}-buttonRight", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderConfig {
    pub selector: String,
    /// Shadow shows once the page is scrolled strictly past this offset.
    pub shadow_after: f64,
    pub shadow: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: ".Header".to_string(),
            shadow_after: 50.0,
            shadow: "0 2px 8px rgba(0, 0, 0, 0.1)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LazyConfig {
    pub selector: String,
    pub threshold: f64,
    pub root_margin: String,
    pub animation: String,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            selector: ".NewMenu-Link, .BestMenu-Link".to_string(),
            threshold: 0.1,
            root_margin: "50px".to_string(),
            animation: "slideIn 0.5s ease-out".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MobileMenuConfig {
    pub enabled: bool,
    /// Only mounted when the viewport is narrower than this.
    pub breakpoint: f64,
    pub toggle: String,
    pub menu: String,
}

impl Default for MobileMenuConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            breakpoint: 768.0,
            toggle: ".menu-toggle".to_string(),
            menu: ".Header-MainMenu".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub banner: BannerConfig,
    pub menus: Vec<MenuStripConfig>,
    /// Pixels a menu strip moves per button click.
    pub scroll_step: f64,
    pub header: HeaderConfig,
    pub anchors: String,
    pub lazy: LazyConfig,
    pub mobile_menu: MobileMenuConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            banner: BannerConfig::default(),
            menus: vec![MenuStripConfig::named("NewMenu"), MenuStripConfig::named("BestMenu")],
            scroll_step: 340.0,
            header: HeaderConfig::default(),
            anchors: "a[href^=\"#\"]".to_string(),
            lazy: LazyConfig::default(),
            mobile_menu: MobileMenuConfig::default(),
        }
    }
}
