#![cfg(target_arch = "wasm32")]
mod clock;
mod dom;
mod events;
mod frame;
mod input;
mod panels;
mod render;
mod texture;

use map_core::{build_scene, MapConfig, Session};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("map-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("map-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #map-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);
    dom::wire_canvas_resize(&canvas);

    let config = MapConfig::default();
    let ground_url = config.ground_texture_url;
    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
    let session = Rc::new(RefCell::new(Session::new(config, aspect)?));
    let city = build_scene(&session.borrow().config);

    panels::populate_list(&document, &session.borrow().config.locations);

    let clock = clock::Clock::start();
    let gpu = frame::init_gpu(&canvas, &city).await;

    let pending_ground = Rc::new(RefCell::new(None));
    match ground_url {
        Some(url) if gpu.is_some() => texture::spawn_ground_texture_load(url, pending_ground.clone()),
        Some(_) => {}
        None => log::info!("[texture] no ground texture configured"),
    }

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        session: session.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
        clock,
    });
    events::wire_global_keydown(session.clone(), clock);
    events::wire_panel_controls(&document, session.clone(), clock);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        canvas,
        document,
        clock,
        gpu,
        pending_ground,
        shown: None,
        applied_theme: None,
        last_heading: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
