// Hover scale smoothing and per-frame marker animation.

mod common;

use common::*;
use map_core::constants::{HOVER_SCALE, IDLE_SCALE, PULSE_START_OPACITY};
use map_core::markers::step_scale;
use map_core::PartKind;

#[test]
fn step_covers_fixed_fraction_of_remaining_distance() {
    let next = step_scale(1.0, 1.15);
    assert!((next - 1.0225).abs() < 1e-6);
    let back = step_scale(1.15, 1.0);
    assert!((back - 1.1275).abs() < 1e-6);
}

#[test]
fn hovered_marker_grows_monotonically_without_overshoot() {
    let mut s = session();
    let m = s.markers.by_location_id("old-town-hall").unwrap();
    assert_eq!(s.pointer_move(ndc_on(&s, m)), Some(m));

    let mut prev = IDLE_SCALE;
    for frame in 1..=120 {
        s.advance(frame as f64 * 16.0);
        let scale = s.markers.get(m).unwrap().scale;
        assert!(scale >= prev, "frame {frame}: {scale} < {prev}");
        assert!(scale <= HOVER_SCALE + 1e-6, "frame {frame}: overshoot {scale}");
        prev = scale;
    }
    assert!((prev - HOVER_SCALE).abs() < 1e-3);

    for other in s.markers.markers().iter().filter(|o| o.id != m) {
        assert_eq!(other.scale, IDLE_SCALE);
    }
}

#[test]
fn leaving_a_marker_shrinks_it_back() {
    let mut s = session();
    let m = s.markers.by_location_id("tech-hub").unwrap();
    s.pointer_move(ndc_on(&s, m));
    for frame in 1..=60 {
        s.advance(frame as f64 * 16.0);
    }
    let empty = empty_ndc(&s);
    assert_eq!(s.pointer_move(empty), None);
    let mut prev = s.markers.get(m).unwrap().scale;
    for frame in 61..=200 {
        s.advance(frame as f64 * 16.0);
        let scale = s.markers.get(m).unwrap().scale;
        assert!(scale <= prev && scale >= IDLE_SCALE - 1e-6);
        prev = scale;
    }
    assert!((prev - IDLE_SCALE).abs() < 1e-3);
}

#[test]
fn bob_stays_around_cached_rest_height() {
    let mut s = session();
    let m = s.markers.by_location_id("arena").unwrap();
    for frame in 0..200 {
        s.advance(frame as f64 * 16.0);
        for part in s.markers.parts_of(m) {
            let base = part.base_offset().expect("cached after the first pass");
            assert_eq!(base, part.kind.rest_offset());
            assert!((part.offset_y - base).abs() <= 1.2 + 1e-4);
        }
    }
}

#[test]
fn pulse_ring_fades_as_it_expands() {
    let mut s = session();
    let m = s.markers.by_location_id("arena").unwrap();
    for frame in 0..120 {
        s.advance(frame as f64 * 16.0);
        let ring = s
            .markers
            .parts_of(m)
            .find(|p| p.kind == PartKind::PulseRing)
            .unwrap();
        assert!(ring.spread >= 1.0 && ring.spread <= 2.5 + 1e-4);
        assert!(ring.opacity >= 0.0 && ring.opacity <= PULSE_START_OPACITY + 1e-6);
        // linear in the same cycle position
        let expected = PULSE_START_OPACITY * (1.0 - (ring.spread - 1.0) / 1.5);
        assert!((ring.opacity - expected).abs() < 1e-4);
    }
}
