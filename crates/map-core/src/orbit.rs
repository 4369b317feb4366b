//! Orbit / zoom / pan manipulation of the camera around its target.

use crate::camera::CameraView;
use crate::constants::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle measured from straight down onto the target.
    pub min_polar: f32,
    pub max_polar: f32,
    /// Target stays within `[-pan_bound, pan_bound]` on x and z.
    pub pan_bound: f32,
}

impl OrbitLimits {
    pub fn for_map(half_extent: f32) -> Self {
        Self {
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
            pan_bound: half_extent,
        }
    }
}

/// Spherical offset of the camera relative to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let (sp, cp) = self.phi.sin_cos();
        let (st, ct) = self.theta.sin_cos();
        Vec3::new(self.radius * sp * st, self.radius * cp, self.radius * sp * ct)
    }
}

/// User-driven camera manipulation. Disabled controls ignore every input,
/// which is how camera transitions keep exclusive ownership of the view.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enabled: bool,
    pub limits: OrbitLimits,
    pub rotate_speed: f32,
    pub zoom_step: f32,
    pub pan_speed: f32,
}

impl OrbitControls {
    pub fn new(limits: OrbitLimits) -> Self {
        Self {
            enabled: true,
            limits,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_step: ORBIT_ZOOM_STEP,
            pan_speed: ORBIT_PAN_SPEED,
        }
    }

    fn apply(&self, view: &mut CameraView, mut s: Spherical) {
        s.phi = s.phi.clamp(self.limits.min_polar, self.limits.max_polar);
        s.radius = s
            .radius
            .clamp(self.limits.min_distance, self.limits.max_distance);
        view.position = view.target + s.to_offset();
    }

    /// Orbit by a pointer drag of `(dx, dy)` pixels. Returns whether the view moved.
    pub fn rotate(&self, view: &mut CameraView, dx: f32, dy: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let mut s = Spherical::from_offset(view.position - view.target);
        s.theta -= dx * self.rotate_speed;
        s.phi -= dy * self.rotate_speed;
        self.apply(view, s);
        true
    }

    /// Dolly in or out; positive `wheel_delta` moves away like a browser wheel.
    pub fn zoom(&self, view: &mut CameraView, wheel_delta: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let mut s = Spherical::from_offset(view.position - view.target);
        s.radius *= self.zoom_step.powf(wheel_delta / 100.0);
        self.apply(view, s);
        true
    }

    /// Slide target and camera across the ground plane by a drag of `(dx, dy)`
    /// pixels. Movement scales with distance so panning feels constant on screen.
    pub fn pan(&self, view: &mut CameraView, dx: f32, dy: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let offset = view.position - view.target;
        let mut forward = -Vec3::new(offset.x, 0.0, offset.z);
        if forward.length_squared() <= f32::EPSILON {
            forward = Vec3::NEG_Z;
        }
        let forward = forward.normalize();
        let right = forward.cross(Vec3::Y);
        let k = self.pan_speed * offset.length();
        let delta = (-right * dx + forward * dy) * k;

        let b = self.limits.pan_bound;
        let new_target = Vec3::new(
            (view.target.x + delta.x).clamp(-b, b),
            view.target.y,
            (view.target.z + delta.z).clamp(-b, b),
        );
        let applied = new_target - view.target;
        view.target = new_target;
        view.position += applied;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spherical_round_trip() {
        let off = Vec3::new(30.0, 40.0, -20.0);
        let back = Spherical::from_offset(off).to_offset();
        assert!(back.abs_diff_eq(off, 1e-3));
    }
}
