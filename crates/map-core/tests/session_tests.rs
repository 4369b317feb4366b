// Click disclosure, list selection and transition ownership of the camera.

mod common;

use common::*;
use map_core::animator::focus_view;
use glam::{Vec2, Vec3};
use map_core::{AnimatorState, CameraView, ClickOutcome, MapError, MarkerId};

#[test]
fn first_click_focuses_second_opens_detail_empty_clears() {
    let mut s = session();
    let a = s.markers.by_location_id("tech-hub").unwrap();

    assert_eq!(s.click(ndc_on(&s, a), 0.0), ClickOutcome::FocusStarted(a));
    assert_eq!(s.focus(), Some(a));
    assert_eq!(s.panels.detail, None, "first click must not open details");
    assert!(!s.controls.enabled);

    assert_eq!(s.advance(1200.0), AnimatorState::Idle);
    let ground = s.markers.get(a).unwrap().position;
    assert_eq!(s.camera, focus_view(ground));
    assert!(s.controls.enabled, "controls come back when the transition ends");

    assert_eq!(s.click(ndc_on(&s, a), 1300.0), ClickOutcome::DetailOpened(a));
    assert_eq!(s.detail_location().map(|l| l.id), Some("tech-hub"));
    assert!(!s.animator.is_active(), "opening details does not move the camera");

    let empty = empty_ndc(&s);
    assert_eq!(s.click(empty, 1400.0), ClickOutcome::Cleared);
    assert_eq!(s.focus(), None);
    assert_eq!(s.panels.detail, Some(a), "empty click leaves the detail view alone");
    assert!(!s.animator.is_active());

    let b = s.markers.by_location_id("city-museum").unwrap();
    assert_eq!(s.click(ndc_on(&s, b), 1500.0), ClickOutcome::FocusStarted(b));
    assert_eq!(s.focus(), Some(b));
    let target = s.animator.current().expect("transition toward the new focus").to;
    assert_eq!(target, focus_view(s.markers.get(b).unwrap().position));
}

#[test]
fn clicking_another_marker_moves_focus() {
    let mut s = session();
    let a = s.markers.by_location_id("central-library").unwrap();
    let b = s.markers.by_location_id("city-museum").unwrap();

    s.click(ndc_on(&s, a), 0.0);
    s.advance(1200.0);
    assert_eq!(s.click(ndc_on(&s, b), 1250.0), ClickOutcome::FocusStarted(b));
    assert_eq!(s.focus(), Some(b));
    assert_eq!(s.panels.detail, None);
}

#[test]
fn later_transition_supersedes_earlier_one() {
    let mut s = session();
    let a = s.markers.by_location_id("arena").unwrap();
    let b = s.markers.by_location_id("sunset-cafe").unwrap();

    s.select_location("arena", 0.0).unwrap();
    assert_eq!(s.advance(500.0), AnimatorState::Transitioning);
    s.select_location("sunset-cafe", 500.0).unwrap();

    let mid = s.advance(1100.0);
    assert_eq!(mid, AnimatorState::Transitioning);
    let ground_a = s.markers.get(a).unwrap().position;
    assert_ne!(s.camera, focus_view(ground_a));

    assert_eq!(s.advance(1700.0), AnimatorState::Idle);
    let ground_b = s.markers.get(b).unwrap().position;
    assert_eq!(s.camera, focus_view(ground_b));
    assert_eq!(s.focus(), Some(b));
}

#[test]
fn select_location_closes_list_and_rejects_unknown_ids() {
    let mut s = session();
    s.open_list();
    let m = s.select_location("harbor-market", 0.0).unwrap();
    assert_eq!(s.focus(), Some(m));
    assert!(!s.panels.list_open);

    let err = s.select_location("nowhere", 10.0).unwrap_err();
    assert_eq!(err, MapError::UnknownLocation("nowhere".into()));
    assert_eq!(s.focus(), Some(m), "a failed selection leaves focus alone");
}

#[test]
fn reset_returns_home_and_clears_focus() {
    let mut s = session();
    s.select_location("old-town-hall", 0.0).unwrap();
    s.advance(1200.0);

    s.reset_view(2000.0);
    assert_eq!(s.focus(), None);
    assert_eq!(s.advance(2500.0), AnimatorState::Transitioning);
    assert_eq!(s.advance(3000.0), AnimatorState::Idle);
    assert_eq!(s.camera, CameraView::home(&s.config.camera));
    assert!(s.compass_heading().abs() < 1e-6);
}

#[test]
fn user_controls_are_ignored_during_transitions() {
    let mut s = session();
    s.select_location("tech-hub", 0.0).unwrap();
    s.advance(100.0);
    let before = s.camera;
    assert!(!s.orbit(40.0, 10.0));
    assert!(!s.zoom(200.0));
    assert!(!s.pan(30.0, 30.0));
    assert_eq!(s.camera, before);

    s.advance(1200.0);
    assert!(s.orbit(40.0, 10.0));
    assert_ne!(s.camera, before);
}

#[test]
fn escape_closes_detail_before_list() {
    let mut s = session();
    s.open_list();
    s.panels.detail = Some(MarkerId(0));
    s.dismiss_top_panel();
    assert_eq!(s.panels.detail, None);
    assert!(s.panels.list_open);
    s.dismiss_top_panel();
    assert!(!s.panels.list_open);
}

#[test]
fn welcome_and_list_panels_toggle() {
    let mut s = session();
    assert!(s.panels.welcome_visible);
    s.dismiss_welcome();
    assert!(!s.panels.welcome_visible);
    assert!(s.toggle_list());
    assert!(!s.toggle_list());
}

#[test]
fn compass_follows_orbit() {
    let mut s = session();
    s.orbit(-200.0, 0.0);
    let c = s.camera;
    let expected = (c.position.x - c.target.x).atan2(c.position.z - c.target.z);
    assert!((s.compass_heading() - expected).abs() < 1e-6);
    assert!(s.compass_heading().abs() > 0.5);
}

#[test]
fn projected_body_center_picks_its_marker() {
    let mut s = session();
    s.camera = CameraView::new(Vec3::new(0.0, 480.0, 1.0), Vec3::ZERO);
    let ids: Vec<MarkerId> = s.markers.markers().iter().map(|m| m.id).collect();
    for m in ids {
        assert_eq!(s.pick(ndc_on(&s, m)), Some(m));
    }
    // top-left corner of the view lands outside every footprint
    assert_eq!(s.pick(Vec2::new(-0.99, 0.99)), None);
}
