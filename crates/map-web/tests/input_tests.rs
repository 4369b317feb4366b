// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the input module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn press_and_release_in_place_is_a_click() {
    let mut drag = DragState::default();
    drag.begin(Vec2::new(100.0, 100.0), 0, false);
    assert_eq!(drag.update(Vec2::new(102.0, 101.0)), None);
    assert_eq!(drag.end(Vec2::new(103.0, 102.0)), Some(Release::Click));
    assert!(!drag.down);
}

#[test]
fn moving_past_threshold_turns_press_into_drag() {
    let mut drag = DragState::default();
    drag.begin(Vec2::new(100.0, 100.0), 0, false);
    let first = drag.update(Vec2::new(110.0, 100.0));
    assert_eq!(first, Some((DragMode::Orbit, Vec2::new(10.0, 0.0))));
    // Deltas are relative to the previous move once dragging.
    let second = drag.update(Vec2::new(112.0, 97.0));
    assert_eq!(second, Some((DragMode::Orbit, Vec2::new(2.0, -3.0))));
    // Returning near the start does not turn the drag back into a click.
    assert_eq!(drag.end(Vec2::new(101.0, 100.0)), Some(Release::DragEnd));
}

#[test]
fn release_far_from_start_without_moves_is_drag_end() {
    let mut drag = DragState::default();
    drag.begin(Vec2::ZERO, 0, false);
    assert_eq!(drag.end(Vec2::new(0.0, 20.0)), Some(Release::DragEnd));
}

#[test]
fn secondary_button_or_shift_pans() {
    let mut drag = DragState::default();
    drag.begin(Vec2::ZERO, 2, false);
    assert_eq!(drag.mode, Some(DragMode::Pan));

    drag.begin(Vec2::ZERO, 0, true);
    assert_eq!(drag.mode, Some(DragMode::Pan));

    drag.begin(Vec2::ZERO, 0, false);
    assert_eq!(drag.mode, Some(DragMode::Orbit));
}

#[test]
fn events_without_press_are_ignored() {
    let mut drag = DragState::default();
    assert_eq!(drag.update(Vec2::new(50.0, 50.0)), None);
    assert_eq!(drag.end(Vec2::new(50.0, 50.0)), None);
}

#[test]
fn key_bindings() {
    assert_eq!(key_command("t"), Some(KeyCommand::ToggleTheme));
    assert_eq!(key_command("T"), Some(KeyCommand::ToggleTheme));
    assert_eq!(key_command("r"), Some(KeyCommand::ResetView));
    assert_eq!(key_command("l"), Some(KeyCommand::ToggleList));
    assert_eq!(key_command("Escape"), Some(KeyCommand::Dismiss));
    assert_eq!(key_command("x"), None);
    assert_eq!(key_command("Enter"), None);
}
