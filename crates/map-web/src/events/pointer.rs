use crate::clock::Clock;
use crate::input::{self, DragMode, Release};
use map_core::{ClickOutcome, Session};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<Session>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
    pub clock: Clock,
}

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_input_handlers(w: InputWiring) {
    let target: &web::EventTarget = w.canvas.as_ref();

    // pointerdown
    {
        let drag_m = w.drag_state.clone();
        let canvas_m = w.canvas.clone();
        listen(target, "pointerdown", move |ev: web::PointerEvent| {
            let px = input::pointer_canvas_px(&ev, &canvas_m);
            drag_m.borrow_mut().begin(px, ev.button(), ev.shift_key());
            let _ = canvas_m.set_pointer_capture(ev.pointer_id());
        });
    }

    // pointermove: drag manipulates the camera, otherwise hover
    {
        let drag_m = w.drag_state.clone();
        let session_m = w.session.clone();
        let canvas_m = w.canvas.clone();
        listen(target, "pointermove", move |ev: web::PointerEvent| {
            let px = input::pointer_canvas_px(&ev, &canvas_m);
            let moved = drag_m.borrow_mut().update(px);
            let mut session = session_m.borrow_mut();
            match moved {
                Some((DragMode::Orbit, d)) => {
                    session.orbit(d.x, d.y);
                }
                Some((DragMode::Pan, d)) => {
                    session.pan(d.x, d.y);
                }
                None if !drag_m.borrow().down => {
                    let ndc = input::pointer_ndc(px, &canvas_m);
                    session.pointer_move(ndc);
                }
                None => {}
            }
        });
    }

    // pointerup: a press that never became a drag is a click
    {
        let drag_m = w.drag_state.clone();
        let session_m = w.session.clone();
        let canvas_m = w.canvas.clone();
        let clock = w.clock;
        listen(target, "pointerup", move |ev: web::PointerEvent| {
            let px = input::pointer_canvas_px(&ev, &canvas_m);
            let _ = canvas_m.release_pointer_capture(ev.pointer_id());
            let released = drag_m.borrow_mut().end(px);
            if released != Some(Release::Click) || ev.button() != 0 {
                return;
            }
            let ndc = input::pointer_ndc(px, &canvas_m);
            let outcome = session_m.borrow_mut().click(ndc, clock.now_ms());
            match outcome {
                ClickOutcome::FocusStarted(m) => log::info!("[click] focus marker {}", m.0),
                ClickOutcome::DetailOpened(m) => log::info!("[click] detail marker {}", m.0),
                ClickOutcome::Cleared => log::debug!("[click] empty"),
            }
        });
    }

    // pointercancel / pointerleave
    {
        let drag_m = w.drag_state.clone();
        listen(target, "pointercancel", move |_ev: web::PointerEvent| {
            *drag_m.borrow_mut() = input::DragState::default();
        });
        let session_m = w.session.clone();
        listen(target, "pointerleave", move |_ev: web::PointerEvent| {
            session_m.borrow_mut().pointer_leave();
        });
    }

    // wheel zoom; non-passive so the page does not scroll
    {
        let session_m = w.session.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            let delta = match ev.delta_mode() {
                web::WheelEvent::DOM_DELTA_LINE => ev.delta_y() * 16.0,
                web::WheelEvent::DOM_DELTA_PAGE => ev.delta_y() * 400.0,
                _ => ev.delta_y(),
            };
            session_m.borrow_mut().zoom(delta as f32);
        }) as Box<dyn FnMut(_)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
        closure.forget();
    }

    // secondary button pans; keep the browser menu away
    listen(target, "contextmenu", move |ev: web::MouseEvent| {
        ev.prevent_default();
    });
}
