//! Time-boxed, eased camera transitions.
//!
//! A single [`Transition`] slot holds the active run. Starting a new run
//! overwrites the slot; the next tick samples whatever the slot holds, so a
//! superseded run is simply never sampled again.

use crate::camera::CameraView;
use crate::constants::{FOCUS_DURATION_MS, FOCUS_OFFSET, RESET_DURATION_MS};
use glam::Vec3;

/// `1 - (1 - p)^3` with `p` clamped to `[0, 1]`.
#[inline]
pub fn ease_out_cubic(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Camera viewpoint used when focusing a marker standing at `ground`.
#[inline]
pub fn focus_view(ground: Vec3) -> CameraView {
    CameraView::new(ground + Vec3::from(FOCUS_OFFSET), ground)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub start_ms: f64,
    pub duration_ms: f64,
    pub from: CameraView,
    pub to: CameraView,
}

impl Transition {
    /// Normalized progress, clamped to `[0, 1]`. Zero-length runs are complete
    /// immediately.
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn sample(&self, now_ms: f64) -> CameraView {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            // exact endpoint, no lerp rounding
            return self.to;
        }
        self.from.lerp(&self.to, ease_out_cubic(p))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Transitioning,
}

#[derive(Clone, Debug, Default)]
pub struct CameraAnimator {
    slot: Option<Transition>,
}

impl CameraAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any in-flight run with a new one starting from `from`.
    pub fn start(&mut self, now_ms: f64, from: CameraView, to: CameraView, duration_ms: f64) {
        if self.slot.is_some() {
            log::debug!("[camera] superseding in-flight transition");
        }
        self.slot = Some(Transition {
            start_ms: now_ms,
            duration_ms,
            from,
            to,
        });
    }

    pub fn focus_on(&mut self, now_ms: f64, current: CameraView, ground: Vec3) {
        self.start(now_ms, current, focus_view(ground), FOCUS_DURATION_MS);
    }

    pub fn reset(&mut self, now_ms: f64, current: CameraView, home: CameraView) {
        self.start(now_ms, current, home, RESET_DURATION_MS);
    }

    /// Advance the active run and commit the sampled view into `view`.
    pub fn tick(&mut self, now_ms: f64, view: &mut CameraView) -> AnimatorState {
        let Some(tr) = self.slot else {
            return AnimatorState::Idle;
        };
        *view = tr.sample(now_ms);
        if tr.progress(now_ms) >= 1.0 {
            self.slot = None;
            AnimatorState::Idle
        } else {
            AnimatorState::Transitioning
        }
    }

    #[inline]
    pub fn state(&self) -> AnimatorState {
        if self.slot.is_some() {
            AnimatorState::Transitioning
        } else {
            AnimatorState::Idle
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    #[inline]
    pub fn current(&self) -> Option<&Transition> {
        self.slot.as_ref()
    }
}
