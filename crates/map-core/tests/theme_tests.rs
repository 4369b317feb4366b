// Day/night toggling and the parameters it manages.

mod common;

use common::*;
use map_core::theme::{DAY_PRESET, NIGHT_PRESET};
use map_core::Theme;

#[test]
fn toggle_swaps_every_managed_parameter() {
    let mut s = session();
    assert_eq!(s.theme.theme(), Theme::Day);
    assert_eq!(*s.theme.applied(), DAY_PRESET);

    assert_eq!(s.toggle_theme(), Theme::Night);
    assert_eq!(*s.theme.applied(), NIGHT_PRESET);
    for m in s.markers.markers() {
        assert_eq!(m.emissive_intensity, NIGHT_PRESET.marker_emissive);
    }
}

#[test]
fn double_toggle_restores_initial_state() {
    let mut s = session();
    let before: Vec<f32> = s.markers.markers().iter().map(|m| m.emissive_intensity).collect();
    s.toggle_theme();
    s.toggle_theme();
    assert_eq!(s.theme.theme(), Theme::Day);
    assert_eq!(*s.theme.applied(), DAY_PRESET);
    let after: Vec<f32> = s.markers.markers().iter().map(|m| m.emissive_intensity).collect();
    assert_eq!(before, after);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn night_is_darker_and_glows_more() {
    assert!(NIGHT_PRESET.ambient_intensity < DAY_PRESET.ambient_intensity);
    assert!(NIGHT_PRESET.sun_intensity < DAY_PRESET.sun_intensity);
    assert!(NIGHT_PRESET.bloom_strength > DAY_PRESET.bloom_strength);
    assert!(NIGHT_PRESET.marker_emissive > DAY_PRESET.marker_emissive);
    assert!(DAY_PRESET.fog_near < DAY_PRESET.fog_far);
    assert!(NIGHT_PRESET.fog_near < NIGHT_PRESET.fog_far);
}

#[test]
fn toggling_leaves_camera_and_focus_alone() {
    let mut s = session();
    s.select_location("riverside-park", 0.0).unwrap();
    s.advance(400.0);
    let camera = s.camera;
    let focus = s.focus();
    s.toggle_theme();
    assert_eq!(s.camera, camera);
    assert_eq!(s.focus(), focus);
    assert!(s.animator.is_active());
}
