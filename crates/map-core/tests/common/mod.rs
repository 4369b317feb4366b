// Shared helpers for map-core integration tests.

#![allow(dead_code)]

use glam::{Vec2, Vec3};
use map_core::camera::project_to_ndc;
use map_core::{MarkerId, PartKind, Session};

/// Current world-space center of a marker's body sphere.
pub fn body_center(session: &Session, marker: MarkerId) -> Vec3 {
    let m = session.markers.get(marker).expect("marker exists");
    let body = session
        .markers
        .parts_of(marker)
        .find(|p| p.kind == PartKind::Body)
        .expect("marker has a body");
    m.position + Vec3::Y * (body.offset_y * m.scale)
}

/// NDC point that lands on the marker's body from the current camera.
pub fn ndc_on(session: &Session, marker: MarkerId) -> Vec2 {
    project_to_ndc(&session.camera, &session.projection, body_center(session, marker))
        .expect("marker in front of camera")
}

/// Some NDC point where no marker is under the pointer.
pub fn empty_ndc(session: &Session) -> Vec2 {
    for iy in 0..9 {
        for ix in 0..9 {
            let ndc = Vec2::new(-0.9 + ix as f32 * 0.225, 0.9 - iy as f32 * 0.225);
            if session.pick(ndc).is_none() {
                return ndc;
            }
        }
    }
    panic!("every probe point hits a marker");
}

pub fn session() -> Session {
    Session::new(map_core::MapConfig::default(), 16.0 / 9.0).expect("default config is valid")
}
