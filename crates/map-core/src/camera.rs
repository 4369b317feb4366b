//! Camera view state, projection and screen/world conversions.
//!
//! These types avoid any platform API so picking and compass math can be
//! exercised on the host. The web frontend feeds them canvas sizes and pointer
//! positions and reads back matrices for the renderer.

use crate::config::CameraConfig;
use crate::ray::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Where the camera sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraView {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    pub fn home(config: &CameraConfig) -> Self {
        Self::new(config.home_position, config.home_target)
    }

    /// Component-wise linear blend of position and target.
    #[inline]
    pub fn lerp(&self, other: &CameraView, t: f32) -> CameraView {
        CameraView {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Compass needle angle in radians: `atan2(cam.x - target.x, cam.z - target.z)`.
    #[inline]
    pub fn heading(&self) -> f32 {
        (self.position.x - self.target.x).atan2(self.position.z - self.target.z)
    }
}

/// Perspective projection parameters; `aspect` follows the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fovy_radians: config.fov_y_deg.to_radians(),
            aspect,
            znear: config.near,
            zfar: config.far,
        }
    }

    /// Recompute aspect for a new viewport; zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-4), self.znear, self.zfar)
    }
}

#[inline]
pub fn view_proj(view: &CameraView, proj: &Projection) -> Mat4 {
    proj.matrix() * view.view_matrix()
}

/// Convert canvas pixel coordinates (origin top-left) to normalized device
/// coordinates in `[-1, 1]`, +Y up.
#[inline]
pub fn ndc_from_pixels(px: Vec2, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new(2.0 * px.x / w - 1.0, 1.0 - 2.0 * px.y / h)
}

/// World-space ray from the camera through an NDC point.
pub fn ray_from_ndc(view: &CameraView, proj: &Projection, ndc: Vec2) -> Ray {
    // built in view space; unprojecting through a wide near/far range loses precision
    let half = (proj.fovy_radians * 0.5).tan();
    let dir_view = Vec3::new(ndc.x * half * proj.aspect, ndc.y * half, -1.0);
    let dir = view.view_matrix().inverse().transform_vector3(dir_view);
    Ray::new(view.position, dir)
}

/// Project a world point to NDC; `None` when it is behind the camera.
pub fn project_to_ndc(view: &CameraView, proj: &Projection, world: Vec3) -> Option<Vec2> {
    let clip = view_proj(view, proj) * world.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (CameraView, Projection) {
        let cfg = CameraConfig::default();
        (CameraView::home(&cfg), Projection::from_config(&cfg, 16.0 / 9.0))
    }

    #[test]
    fn center_ray_points_at_target() {
        let (view, proj) = setup();
        let ray = ray_from_ndc(&view, &proj, Vec2::ZERO);
        let expected = (view.target - view.position).normalize();
        assert!(ray.dir.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn projection_round_trips_through_ray() {
        let (view, proj) = setup();
        let world = Vec3::new(40.0, 0.0, -30.0);
        let ndc = project_to_ndc(&view, &proj, world).unwrap();
        let ray = ray_from_ndc(&view, &proj, ndc);
        let to_point = (world - view.position).normalize();
        assert!(ray.dir.abs_diff_eq(to_point, 1e-3));
    }

    #[test]
    fn pixel_corners_map_to_ndc_corners() {
        assert_eq!(ndc_from_pixels(Vec2::ZERO, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(
            ndc_from_pixels(Vec2::new(800.0, 600.0), 800.0, 600.0),
            Vec2::new(1.0, -1.0)
        );
    }

    #[test]
    fn heading_is_zero_when_camera_is_south_of_target() {
        let view = CameraView::new(Vec3::new(0.0, 10.0, 50.0), Vec3::ZERO);
        assert!(view.heading().abs() < 1e-6);
        let east = CameraView::new(Vec3::new(50.0, 10.0, 0.0), Vec3::ZERO);
        assert!((east.heading() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
