//! The single session record shared by the frame loop and input handlers.
//!
//! All mutable state lives here: camera view, orbit controls, the transition
//! slot, marker registry, focus, hover, theme and panel visibility. Nothing in
//! this module touches a rendering context or the DOM.

use crate::animator::{AnimatorState, CameraAnimator};
use crate::camera::{ray_from_ndc, CameraView, Projection};
use crate::config::{Location, MapConfig};
use crate::error::MapError;
use crate::markers::{MarkerId, MarkerRegistry};
use crate::orbit::{OrbitControls, OrbitLimits};
use crate::ray::Ray;
use crate::theme::{Theme, ThemeController};
use glam::Vec2;

/// What a click on the map did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A camera transition toward the marker started and it became the focus.
    FocusStarted(MarkerId),
    /// The focused marker was clicked again; its detail view opened.
    DetailOpened(MarkerId),
    /// Nothing was hit; focus was cleared.
    Cleared,
}

/// Visibility of the presentation panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelState {
    pub welcome_visible: bool,
    pub list_open: bool,
    /// Marker whose detail view is open.
    pub detail: Option<MarkerId>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            welcome_visible: true,
            list_open: false,
            detail: None,
        }
    }
}

pub struct Session {
    pub config: MapConfig,
    pub camera: CameraView,
    pub projection: Projection,
    pub controls: OrbitControls,
    pub animator: CameraAnimator,
    pub markers: MarkerRegistry,
    pub theme: ThemeController,
    pub panels: PanelState,
    focus: Option<MarkerId>,
    hovered: Option<MarkerId>,
}

impl Session {
    pub fn new(config: MapConfig, aspect: f32) -> Result<Self, MapError> {
        config.validate()?;
        let theme = ThemeController::new(Theme::Day);
        let markers = MarkerRegistry::new(
            &config.locations,
            &config.palette,
            theme.applied().marker_emissive,
        );
        Ok(Self {
            camera: CameraView::home(&config.camera),
            projection: Projection::from_config(&config.camera, aspect),
            controls: OrbitControls::new(OrbitLimits::for_map(config.half_extent)),
            animator: CameraAnimator::new(),
            markers,
            theme,
            panels: PanelState::default(),
            focus: None,
            hovered: None,
            config,
        })
    }

    #[inline]
    pub fn focus(&self) -> Option<MarkerId> {
        self.focus
    }

    #[inline]
    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    pub fn location_of(&self, marker: MarkerId) -> Option<&Location> {
        let m = self.markers.get(marker)?;
        self.config.locations.get(m.location)
    }

    pub fn focused_location(&self) -> Option<&Location> {
        self.focus.and_then(|m| self.location_of(m))
    }

    pub fn detail_location(&self) -> Option<&Location> {
        self.panels.detail.and_then(|m| self.location_of(m))
    }

    #[inline]
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        ray_from_ndc(&self.camera, &self.projection, ndc)
    }

    /// Marker under an NDC point; runs a fresh intersection every call.
    pub fn pick(&self, ndc: Vec2) -> Option<MarkerId> {
        self.markers
            .hit_test(&self.ray_through(ndc))
            .map(|hit| hit.marker)
    }

    /// Update hover from a pointer move.
    pub fn pointer_move(&mut self, ndc: Vec2) -> Option<MarkerId> {
        self.hovered = self.pick(ndc);
        self.hovered
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    /// Two-click disclosure: first click focuses, a second click on the same
    /// marker opens its details, a click on empty space clears focus.
    pub fn click(&mut self, ndc: Vec2, now_ms: f64) -> ClickOutcome {
        match (self.pick(ndc), self.focus) {
            (Some(hit), Some(focused)) if hit == focused => {
                self.panels.detail = Some(hit);
                log::info!("[focus] open detail for marker {}", hit.0);
                ClickOutcome::DetailOpened(hit)
            }
            (Some(hit), _) => {
                self.focus_marker(hit, now_ms);
                ClickOutcome::FocusStarted(hit)
            }
            (None, _) => {
                if self.focus.take().is_some() {
                    log::info!("[focus] cleared");
                }
                ClickOutcome::Cleared
            }
        }
    }

    /// Selecting a location from the list behaves like a first click on its
    /// marker regardless of the current focus, and closes the list.
    pub fn select_location(&mut self, location_id: &str, now_ms: f64) -> Result<MarkerId, MapError> {
        let marker = self
            .markers
            .by_location_id(location_id)
            .ok_or_else(|| MapError::UnknownLocation(location_id.to_string()))?;
        self.focus_marker(marker, now_ms);
        self.panels.list_open = false;
        Ok(marker)
    }

    fn focus_marker(&mut self, marker: MarkerId, now_ms: f64) {
        let Some(ground) = self.markers.get(marker).map(|m| m.position) else {
            return;
        };
        self.animator.focus_on(now_ms, self.camera, ground);
        self.controls.enabled = false;
        self.focus = Some(marker);
        log::info!(
            "[focus] marker {} at ({:.1},{:.1})",
            marker.0,
            ground.x,
            ground.z
        );
    }

    /// Animate back to the configured home view and clear focus.
    pub fn reset_view(&mut self, now_ms: f64) {
        let home = CameraView::home(&self.config.camera);
        self.animator.reset(now_ms, self.camera, home);
        self.controls.enabled = false;
        self.focus = None;
        log::info!("[focus] reset view");
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(&mut self.markers)
    }

    /// Per-frame update: camera transition first, then marker animation.
    pub fn advance(&mut self, now_ms: f64) -> AnimatorState {
        let state = self.animator.tick(now_ms, &mut self.camera);
        if state == AnimatorState::Idle && !self.controls.enabled {
            self.controls.enabled = true;
        }
        self.markers.animate((now_ms / 1000.0) as f32, self.hovered);
        state
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    #[inline]
    pub fn compass_heading(&self) -> f32 {
        self.camera.heading()
    }

    pub fn orbit(&mut self, dx: f32, dy: f32) -> bool {
        self.controls.rotate(&mut self.camera, dx, dy)
    }

    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        self.controls.pan(&mut self.camera, dx, dy)
    }

    pub fn zoom(&mut self, wheel_delta: f32) -> bool {
        self.controls.zoom(&mut self.camera, wheel_delta)
    }

    pub fn dismiss_welcome(&mut self) {
        self.panels.welcome_visible = false;
    }

    pub fn open_list(&mut self) {
        self.panels.list_open = true;
    }

    pub fn close_list(&mut self) {
        self.panels.list_open = false;
    }

    pub fn toggle_list(&mut self) -> bool {
        self.panels.list_open = !self.panels.list_open;
        self.panels.list_open
    }

    pub fn close_detail(&mut self) {
        self.panels.detail = None;
    }

    /// Escape: close the detail view first, then the list.
    pub fn dismiss_top_panel(&mut self) {
        if self.panels.detail.is_some() {
            self.panels.detail = None;
        } else {
            self.panels.list_open = false;
        }
    }
}
