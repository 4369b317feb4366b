// Ray picking against marker parts and resolution to the owning marker.

use glam::Vec3;
use map_core::config::{Palette, LOCATIONS};
use map_core::ray::ray_vertical_cylinder;
use map_core::{MarkerRegistry, PartKind, Ray};

fn registry() -> MarkerRegistry {
    MarkerRegistry::new(LOCATIONS, &Palette::default(), 0.25)
}

fn straight_down(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 100.0, z), Vec3::NEG_Y)
}

#[test]
fn ray_from_above_hits_body_first() {
    let reg = registry();
    let m = reg.by_location_id("tech-hub").unwrap();
    let p = reg.get(m).unwrap().position;
    let hit = reg.hit_test(&straight_down(p.x, p.z)).expect("pin is under the ray");
    assert_eq!(hit.marker, m);
    assert_eq!(reg.part(hit.part).unwrap().kind, PartKind::Body);
    // sphere top sits at 14 + 4
    assert!((hit.distance - 82.0).abs() < 1e-3, "distance {}", hit.distance);
}

#[test]
fn ring_hits_resolve_to_owner() {
    let reg = registry();
    let m = reg.by_location_id("arena").unwrap();
    let p = reg.get(m).unwrap().position;
    let hit = reg.hit_test(&straight_down(p.x + 5.7, p.z)).expect("ground ring hit");
    assert_eq!(hit.marker, m);
    assert_eq!(reg.part(hit.part).unwrap().kind, PartKind::GroundRing);
    assert_eq!(reg.owner_of(hit.part), Some(m));
}

#[test]
fn nearest_part_wins_where_parts_overlap() {
    let reg = registry();
    let m = reg.by_location_id("arena").unwrap();
    let p = reg.get(m).unwrap().position;
    // inside both the ground ring and the slightly higher pulse ring
    let hit = reg.hit_test(&straight_down(p.x + 6.2, p.z)).unwrap();
    assert_eq!(reg.part(hit.part).unwrap().kind, PartKind::PulseRing);
}

#[test]
fn empty_ground_hits_nothing() {
    let reg = registry();
    assert!(reg.hit_test(&straight_down(0.0, 0.0)).is_none());
    let sideways = Ray::new(Vec3::new(0.0, 500.0, 0.0), Vec3::X);
    assert!(reg.hit_test(&sideways).is_none());
}

#[test]
fn hover_scale_widens_pick_volume() {
    let mut reg = registry();
    let m = reg.by_location_id("city-museum").unwrap();
    let p = reg.get(m).unwrap().position;
    // just outside the idle body, inside the ground ring's hole
    let ray = straight_down(p.x + 4.3, p.z);
    assert!(reg.hit_test(&ray).is_none());
    for frame in 0..60 {
        reg.animate(frame as f32 / 60.0, Some(m));
    }
    let hit = reg.hit_test(&ray).expect("scaled body reaches the ray");
    assert_eq!(reg.part(hit.part).unwrap().kind, PartKind::Body);
}

#[test]
fn side_ray_at_pointer_height_hits_pointer() {
    let reg = registry();
    let m = reg.by_location_id("tech-hub").unwrap();
    let p = reg.get(m).unwrap().position;
    // pointer spans y 2..11, below the body sphere
    let ray = Ray::new(Vec3::new(p.x - 50.0, 6.0, p.z), Vec3::X);
    let hit = reg.hit_test(&ray).expect("pointer hit");
    assert_eq!(hit.marker, m);
    assert_eq!(reg.part(hit.part).unwrap().kind, PartKind::Pointer);
    assert_eq!(reg.owner_of(hit.part), Some(m));
    assert!((hit.distance - 47.4).abs() < 1e-3, "distance {}", hit.distance);
}

#[test]
fn upward_ray_meets_pointer_bottom_cap_before_body() {
    let reg = registry();
    let m = reg.by_location_id("old-town-hall").unwrap();
    let p = reg.get(m).unwrap().position;
    // inside the ground ring hole, under the pointer
    let ray = Ray::new(Vec3::new(p.x + 1.0, -5.0, p.z), Vec3::Y);
    let hit = reg.hit_test(&ray).expect("cap hit");
    assert_eq!(reg.part(hit.part).unwrap().kind, PartKind::Pointer);
    assert_eq!(hit.marker, m);
    assert!((hit.distance - 7.0).abs() < 1e-3, "distance {}", hit.distance);
}

#[test]
fn vertical_cylinder_caps_and_wall() {
    let base = Vec3::new(10.0, 0.0, -4.0);
    // top cap from above
    let down = Ray::new(Vec3::new(11.0, 20.0, -4.0), Vec3::NEG_Y);
    assert_eq!(ray_vertical_cylinder(&down, base, 2.0, 5.0), Some(15.0));
    // wall from the side
    let side = Ray::new(Vec3::new(0.0, 2.5, -4.0), Vec3::X);
    assert_eq!(ray_vertical_cylinder(&side, base, 2.0, 5.0), Some(8.0));
    // just above the top
    let over = Ray::new(Vec3::new(0.0, 5.1, -4.0), Vec3::X);
    assert_eq!(ray_vertical_cylinder(&over, base, 2.0, 5.0), None);
    // beside the cap footprint
    let beside = Ray::new(Vec3::new(12.5, 20.0, -4.0), Vec3::NEG_Y);
    assert_eq!(ray_vertical_cylinder(&beside, base, 2.0, 5.0), None);
}

#[test]
fn faded_pulse_ring_is_not_pickable() {
    let mut reg = registry();
    let m = reg.by_location_id("central-library").unwrap();
    let p = reg.get(m).unwrap().position;

    // early in the cycle the expanding ring is visible and pickable
    reg.animate(0.4, None);
    let ring = reg.parts_of(m).find(|x| x.kind == PartKind::PulseRing).unwrap();
    assert!(ring.pickable());
    let hit = reg.hit_test(&straight_down(p.x + 8.5, p.z)).expect("visible pulse ring");
    assert_eq!(reg.part(hit.part).unwrap().kind, PartKind::PulseRing);
    assert_eq!(hit.marker, m);

    // near the end of the cycle it is almost transparent and wide
    reg.animate(1.936, None);
    let ring = reg.parts_of(m).find(|x| x.kind == PartKind::PulseRing).unwrap();
    assert!(ring.opacity < 0.05 && ring.spread > 2.4);
    assert!(!ring.pickable());
    assert!(reg.hit_test(&straight_down(p.x + 16.5, p.z)).is_none());
}
