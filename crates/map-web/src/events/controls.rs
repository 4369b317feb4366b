use crate::clock::Clock;
use crate::dom::add_click_listener;
use crate::panels;
use map_core::Session;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire the panel buttons and list entries to session operations.
pub fn wire_panel_controls(document: &web::Document, session: Rc<RefCell<Session>>, clock: Clock) {
    {
        let s = session.clone();
        add_click_listener(document, panels::WELCOME_START, move || {
            s.borrow_mut().dismiss_welcome();
        });
    }
    {
        let s = session.clone();
        add_click_listener(document, panels::LIST_TOGGLE, move || {
            s.borrow_mut().toggle_list();
        });
    }
    {
        let s = session.clone();
        add_click_listener(document, panels::DETAIL_CLOSE, move || {
            s.borrow_mut().close_detail();
        });
    }
    {
        let s = session.clone();
        add_click_listener(document, panels::THEME_TOGGLE, move || {
            s.borrow_mut().toggle_theme();
        });
    }
    {
        let s = session.clone();
        add_click_listener(document, panels::RESET_VIEW, move || {
            s.borrow_mut().reset_view(clock.now_ms());
        });
    }

    // one delegated listener for every list entry
    if let Some(container) = document.get_element_by_id(panels::LIST_ITEMS) {
        let selector = format!("[{}]", panels::LOCATION_ID_ATTR);
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let Some(item) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
                .and_then(|el| el.closest(&selector).ok().flatten())
            else {
                return;
            };
            let Some(id) = item.get_attribute(panels::LOCATION_ID_ATTR) else {
                return;
            };
            if let Err(e) = session.borrow_mut().select_location(&id, clock.now_ms()) {
                log::warn!("[list] {}", e);
            }
        }) as Box<dyn FnMut(_)>);
        let _ =
            container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
