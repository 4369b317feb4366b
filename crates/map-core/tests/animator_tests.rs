// Transition timing, easing and the single-slot supersede contract.

use glam::Vec3;
use map_core::animator::focus_view;
use map_core::constants::{FOCUS_DURATION_MS, RESET_DURATION_MS};
use map_core::{ease_out_cubic, AnimatorState, CameraAnimator, CameraView};

fn view(px: f32, py: f32, pz: f32) -> CameraView {
    CameraView::new(Vec3::new(px, py, pz), Vec3::ZERO)
}

#[test]
fn progress_is_zero_at_start_and_exactly_one_at_end() {
    let from = view(0.0, 220.0, 260.0);
    let ground = Vec3::new(55.0, 0.0, 55.0);
    let mut anim = CameraAnimator::new();
    anim.focus_on(1000.0, from, ground);

    let tr = *anim.current().unwrap();
    assert_eq!(tr.duration_ms, FOCUS_DURATION_MS);
    assert_eq!(tr.progress(1000.0), 0.0);
    assert_eq!(tr.sample(1000.0), from);
    assert_eq!(tr.progress(1000.0 + FOCUS_DURATION_MS), 1.0);
    assert_eq!(tr.progress(1_000_000.0), 1.0);

    let mut cam = from;
    assert_eq!(anim.tick(1000.0 + FOCUS_DURATION_MS + 16.0, &mut cam), AnimatorState::Idle);
    assert_eq!(cam, focus_view(ground));
    assert_eq!(cam.position, Vec3::new(100.0, 50.0, 100.0));
    assert!(!anim.is_active());
}

#[test]
fn reset_uses_its_own_duration() {
    let home = view(0.0, 220.0, 260.0);
    let mut anim = CameraAnimator::new();
    anim.reset(0.0, view(100.0, 50.0, 100.0), home);
    assert_eq!(anim.current().unwrap().duration_ms, RESET_DURATION_MS);

    let mut cam = view(100.0, 50.0, 100.0);
    assert_eq!(anim.tick(RESET_DURATION_MS * 0.5, &mut cam), AnimatorState::Transitioning);
    assert_ne!(cam, home);
    assert_eq!(anim.tick(RESET_DURATION_MS, &mut cam), AnimatorState::Idle);
    assert_eq!(cam, home);
}

#[test]
fn easing_is_monotonic_with_fixed_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    let mut prev = 0.0;
    for i in 0..=1000 {
        let e = ease_out_cubic(i as f32 / 1000.0);
        assert!(e >= prev, "ease dipped at step {}", i);
        assert!((0.0..=1.0).contains(&e));
        prev = e;
    }
    // ease-out: ahead of linear in the middle
    assert!(ease_out_cubic(0.5) > 0.5);
}

#[test]
fn new_transition_starts_from_the_current_view() {
    let home = view(0.0, 220.0, 260.0);
    let ground_a = Vec3::new(150.0, 0.0, -60.0);
    let ground_b = Vec3::new(-150.0, 0.0, 135.0);
    let mut anim = CameraAnimator::new();
    let mut cam = home;

    anim.focus_on(0.0, cam, ground_a);
    anim.tick(400.0, &mut cam);
    let mid_a = cam;
    assert_ne!(mid_a, home);

    anim.focus_on(400.0, cam, ground_b);
    anim.tick(700.0, &mut cam);

    let eased = ease_out_cubic((300.0 / FOCUS_DURATION_MS) as f32);
    let expected = mid_a.lerp(&focus_view(ground_b), eased);
    assert!(cam.position.abs_diff_eq(expected.position, 1e-3));
    assert!(cam.target.abs_diff_eq(expected.target, 1e-3));

    // nothing of A's target survives once B completes
    anim.tick(400.0 + FOCUS_DURATION_MS, &mut cam);
    assert_eq!(cam, focus_view(ground_b));
}

#[test]
fn idle_animator_leaves_the_camera_alone() {
    let mut anim = CameraAnimator::new();
    let mut cam = view(10.0, 20.0, 30.0);
    assert_eq!(anim.tick(5.0, &mut cam), AnimatorState::Idle);
    assert_eq!(cam, view(10.0, 20.0, 30.0));
    assert_eq!(anim.state(), AnimatorState::Idle);
}
