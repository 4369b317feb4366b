//! Presentation panels. Every element is looked up by id and may be absent;
//! a missing element turns the corresponding update into a no-op.

use map_core::{Location, PanelState, Session, Theme};
use web_sys as web;

pub const WELCOME: &str = "welcome-screen";
pub const WELCOME_START: &str = "welcome-start";
pub const LIST: &str = "location-list";
pub const LIST_ITEMS: &str = "location-list-items";
pub const LIST_TOGGLE: &str = "list-toggle";
pub const DETAIL: &str = "location-detail";
pub const DETAIL_NAME: &str = "detail-name";
pub const DETAIL_CATEGORY: &str = "detail-category";
pub const DETAIL_DESCRIPTION: &str = "detail-description";
pub const DETAIL_IMAGE: &str = "detail-image";
pub const DETAIL_RATING: &str = "detail-rating";
pub const DETAIL_CLOSE: &str = "detail-close";
pub const COMPASS_NEEDLE: &str = "compass-needle";
pub const THEME_TOGGLE: &str = "theme-toggle";
pub const RESET_VIEW: &str = "reset-view";

/// Attribute carrying the location id on each list entry.
pub const LOCATION_ID_ATTR: &str = "data-location-id";

/// Fill the location list with one entry per location.
pub fn populate_list(document: &web::Document, locations: &[Location]) {
    let Some(container) = document.get_element_by_id(LIST_ITEMS) else {
        log::debug!("[panels] no #{}; list disabled", LIST_ITEMS);
        return;
    };
    container.set_inner_html("");
    for loc in locations {
        let Ok(item) = document.create_element("li") else {
            continue;
        };
        let _ = item.set_attribute(LOCATION_ID_ATTR, loc.id);
        let _ = item.set_attribute("class", "location-item");
        let _ = item.set_attribute("role", "button");
        let _ = item.set_attribute("tabindex", "0");
        if let Ok(name) = document.create_element("span") {
            let _ = name.set_attribute("class", "location-name");
            name.set_text_content(Some(loc.name));
            let _ = item.append_child(&name);
        }
        if let Ok(category) = document.create_element("span") {
            let _ = category.set_attribute("class", "location-category");
            category.set_text_content(Some(loc.category));
            let _ = item.append_child(&category);
        }
        let _ = container.append_child(&item);
    }
    log::debug!("[panels] listed {} locations", locations.len());
}

pub fn fill_detail(document: &web::Document, loc: &Location) {
    crate::dom::set_text(document, DETAIL_NAME, loc.name);
    crate::dom::set_text(document, DETAIL_CATEGORY, loc.category);
    crate::dom::set_text(document, DETAIL_DESCRIPTION, loc.description);
    crate::dom::set_text(document, DETAIL_RATING, &format!("★ {}", loc.rating));
    if let Some(img) = document.get_element_by_id(DETAIL_IMAGE) {
        let _ = img.set_attribute("src", loc.image_url);
        let _ = img.set_attribute("alt", loc.name);
    }
}

/// Rotate the compass needle; `heading` in radians.
pub fn set_compass(document: &web::Document, heading: f32) {
    if let Some(el) = document.get_element_by_id(COMPASS_NEEDLE) {
        let _ = el.set_attribute("style", &format!("transform: rotate({}rad)", heading));
    }
}

pub fn set_theme(document: &web::Document, theme: Theme) {
    if let Some(body) = document.body() {
        let _ = body.set_attribute("data-theme", &theme.label().to_lowercase());
    }
    crate::dom::set_text(
        document,
        THEME_TOGGLE,
        &format!("{} mode", theme.toggled().label()),
    );
}

/// What the DOM last showed; used to skip redundant updates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shown {
    pub panels: PanelState,
    pub theme: Theme,
}

/// Bring every panel in line with the session, touching only what changed.
pub fn sync(document: &web::Document, session: &Session, shown: &mut Option<Shown>) {
    let now = Shown {
        panels: session.panels,
        theme: session.theme.theme(),
    };
    let prev = *shown;
    if prev == Some(now) {
        return;
    }
    let changed = |f: fn(&Shown) -> bool| prev.map_or(true, |p| f(&p) != f(&now));

    if changed(|s| s.panels.welcome_visible) {
        crate::dom::set_visible(document, WELCOME, now.panels.welcome_visible);
    }
    if changed(|s| s.panels.list_open) {
        crate::dom::set_class(document, LIST, "open", now.panels.list_open);
        if let Some(btn) = document.get_element_by_id(LIST_TOGGLE) {
            let expanded = if now.panels.list_open { "true" } else { "false" };
            let _ = btn.set_attribute("aria-expanded", expanded);
        }
    }
    if prev.map_or(true, |p| p.panels.detail != now.panels.detail) {
        match session.detail_location() {
            Some(loc) => {
                fill_detail(document, loc);
                crate::dom::set_visible(document, DETAIL, true);
            }
            None => crate::dom::set_visible(document, DETAIL, false),
        }
    }
    if prev.map_or(true, |p| p.theme != now.theme) {
        set_theme(document, now.theme);
    }
    *shown = Some(now);
}
