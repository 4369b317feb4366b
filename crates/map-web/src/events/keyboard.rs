use crate::clock::Clock;
use crate::input::{key_command, KeyCommand};
use map_core::Session;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, session: &Rc<RefCell<Session>>, clock: Clock) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(cmd) = key_command(&ev.key()) else {
        return;
    };
    let mut s = session.borrow_mut();
    match cmd {
        KeyCommand::ToggleTheme => {
            s.toggle_theme();
        }
        KeyCommand::ResetView => s.reset_view(clock.now_ms()),
        KeyCommand::ToggleList => {
            s.toggle_list();
        }
        KeyCommand::Dismiss => s.dismiss_top_panel(),
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(session: Rc<RefCell<Session>>, clock: Clock) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &session, clock);
            }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
