use crate::clock::Clock;
use crate::dom;
use crate::panels;
use crate::render;
use map_core::{view_proj, Scene, Session, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub session: Rc<RefCell<Session>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub clock: Clock,
    pub gpu: Option<render::GpuState<'a>>,
    pub pending_ground: Rc<RefCell<Option<web::ImageBitmap>>>,

    pub shown: Option<panels::Shown>,
    pub applied_theme: Option<Theme>,
    pub last_heading: Option<f32>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = self.clock.now_ms();
        let w = self.canvas.width();
        let h = self.canvas.height();

        let mut session = self.session.borrow_mut();
        session.resize(w, h);
        // camera transition first, then marker animation
        session.advance(now);

        if let Some(g) = &mut self.gpu {
            if let Some(bitmap) = self.pending_ground.borrow_mut().take() {
                g.set_ground_texture(bitmap);
            }
            let theme = session.theme.theme();
            if self.applied_theme != Some(theme) {
                g.apply_theme(session.theme.applied());
                self.applied_theme = Some(theme);
            }
            g.resize_if_needed(w, h);
            g.set_camera(
                view_proj(&session.camera, &session.projection),
                session.camera.position,
                (now / 1000.0) as f32,
            );
            match g.render(&session.markers.instances()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        let heading = session.compass_heading();
        if self.last_heading.map_or(true, |h| (heading - h).abs() > 1e-4) {
            panels::set_compass(&self.document, heading);
            self.last_heading = Some(heading);
        }
        panels::sync(&self.document, &session, &mut self.shown);
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &Scene,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            if let Some(doc) = dom::window_document() {
                dom::set_text(&doc, "gpu-status", "WebGPU is not available in this browser.");
            }
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
