// Orbit, zoom and pan limits.

use glam::Vec3;
use map_core::{CameraView, OrbitControls, OrbitLimits};

fn setup() -> (OrbitControls, CameraView) {
    (
        OrbitControls::new(OrbitLimits::for_map(200.0)),
        CameraView::new(Vec3::new(0.0, 220.0, 260.0), Vec3::ZERO),
    )
}

#[test]
fn zoom_respects_distance_limits() {
    let (controls, mut view) = setup();
    for _ in 0..100 {
        controls.zoom(&mut view, -500.0);
    }
    assert!((view.distance() - controls.limits.min_distance).abs() < 1e-2);
    for _ in 0..100 {
        controls.zoom(&mut view, 500.0);
    }
    assert!((view.distance() - controls.limits.max_distance).abs() < 1e-2);
}

#[test]
fn orbit_keeps_distance_and_clamps_polar_angle() {
    let (controls, mut view) = setup();
    let d = view.distance();
    controls.rotate(&mut view, 300.0, 0.0);
    assert!((view.distance() - d).abs() < 1e-2);

    controls.rotate(&mut view, 0.0, -10_000.0);
    let polar = ((view.position.y - view.target.y) / view.distance()).acos();
    assert!((polar - controls.limits.max_polar).abs() < 1e-3);
    assert!(view.position.y > 0.0, "camera stays above the ground");
}

#[test]
fn pan_moves_camera_and_target_together_within_bounds() {
    let (controls, mut view) = setup();
    let offset = view.position - view.target;
    controls.pan(&mut view, 0.0, 100.0);
    assert!((view.position - view.target).abs_diff_eq(offset, 1e-3));
    assert!(view.target.z < 0.0, "dragging up moves toward the view direction");

    for _ in 0..100 {
        controls.pan(&mut view, 10_000.0, 10_000.0);
    }
    assert!(view.target.x.abs() <= 200.0 && view.target.z.abs() <= 200.0);
    assert_eq!(view.target.y, 0.0);
}

#[test]
fn disabled_controls_leave_view_untouched() {
    let (mut controls, mut view) = setup();
    controls.enabled = false;
    let before = view;
    assert!(!controls.rotate(&mut view, 50.0, 50.0));
    assert!(!controls.zoom(&mut view, 100.0));
    assert!(!controls.pan(&mut view, 50.0, 50.0));
    assert_eq!(view, before);
}
