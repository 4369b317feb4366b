// Procedural scene construction: determinism and placement clearance.

use map_core::config::AreaKind;
use map_core::constants::LOCATION_CLEARANCE;
use map_core::{build_scene, MapConfig};

#[test]
fn same_seed_builds_identical_scene() {
    let cfg = MapConfig::default();
    let a = build_scene(&cfg);
    let b = build_scene(&cfg);
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.trees, b.trees);
    assert_eq!(a.buildings, b.buildings);
    assert_eq!(a.mesh.vertices.len(), b.mesh.vertices.len());
}

#[test]
fn different_seed_moves_scatter() {
    let cfg = MapConfig::default();
    let other = MapConfig {
        seed: cfg.seed + 1,
        ..MapConfig::default()
    };
    assert_ne!(build_scene(&cfg).trees, build_scene(&other).trees);
}

#[test]
fn scene_has_content_and_valid_indices() {
    let scene = build_scene(&MapConfig::default());
    assert!(scene.stats.trees > 20, "trees: {}", scene.stats.trees);
    assert!(scene.stats.buildings > 10, "buildings: {}", scene.stats.buildings);
    assert_eq!(scene.stats.roads, 7);
    let n = scene.mesh.vertices.len() as u32;
    assert!(scene.mesh.indices.iter().all(|&i| i < n));
    assert_eq!(scene.mesh.indices.len() % 3, 0);
}

#[test]
fn scattered_objects_keep_clear_of_roads_pins_and_water() {
    let cfg = MapConfig::default();
    let scene = build_scene(&cfg);
    let points = scene
        .trees
        .iter()
        .copied()
        .chain(scene.buildings.iter().map(|b| b.center));
    for p in points {
        assert!(cfg.contains(p), "{p:?} outside map");
        for road in &cfg.roads {
            assert!(road.distance_to(p) > road.width * 0.5, "{p:?} on a road");
        }
        for loc in &cfg.locations {
            assert!(
                loc.ground_xz().distance(p) >= LOCATION_CLEARANCE,
                "{p:?} crowds {}",
                loc.id
            );
        }
        for area in cfg.areas.iter().filter(|a| a.kind == AreaKind::Water) {
            assert!(!area.contains(p), "{p:?} in water");
        }
    }
}

#[test]
fn buildings_do_not_overlap() {
    let scene = build_scene(&MapConfig::default());
    for (i, a) in scene.buildings.iter().enumerate() {
        for b in &scene.buildings[i + 1..] {
            assert!(a.center.distance(b.center) >= a.radius() + b.radius());
        }
    }
}
