use glam::Vec2;
use map_core::constants::CLICK_DRAG_THRESHOLD_PX;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Orbit,
    Pan,
}

/// How a press ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    Click,
    DragEnd,
}

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub down: bool,
    pub mode: Option<DragMode>,
    pub start: Vec2,
    pub last: Vec2,
    pub dragging: bool,
}

impl DragState {
    /// Primary button orbits; secondary button or shift pans.
    pub fn begin(&mut self, px: Vec2, button: i16, shift: bool) {
        self.down = true;
        self.mode = Some(if button == 2 || shift {
            DragMode::Pan
        } else {
            DragMode::Orbit
        });
        self.start = px;
        self.last = px;
        self.dragging = false;
    }

    /// Record a move while pressed. Returns the pixel delta once the press has
    /// become a drag.
    pub fn update(&mut self, px: Vec2) -> Option<(DragMode, Vec2)> {
        if !self.down {
            return None;
        }
        if !self.dragging && px.distance(self.start) > CLICK_DRAG_THRESHOLD_PX {
            self.dragging = true;
        }
        let delta = px - self.last;
        self.last = px;
        if self.dragging {
            self.mode.map(|m| (m, delta))
        } else {
            None
        }
    }

    pub fn end(&mut self, px: Vec2) -> Option<Release> {
        if !self.down {
            return None;
        }
        let moved = self.dragging || px.distance(self.start) > CLICK_DRAG_THRESHOLD_PX;
        *self = Self::default();
        Some(if moved { Release::DragEnd } else { Release::Click })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    ToggleTheme,
    ResetView,
    ToggleList,
    Dismiss,
}

#[inline]
pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "t" | "T" => Some(KeyCommand::ToggleTheme),
        "r" | "R" => Some(KeyCommand::ResetView),
        "l" | "L" => Some(KeyCommand::ToggleList),
        "Escape" => Some(KeyCommand::Dismiss),
        _ => None,
    }
}

#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    Vec2::new(
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}

#[inline]
pub fn pointer_ndc(px: Vec2, canvas: &web::HtmlCanvasElement) -> Vec2 {
    map_core::ndc_from_pixels(px, canvas.width() as f32, canvas.height() as f32)
}
