//! One-time construction of the static map geometry.
//!
//! Ground, grid, painted areas and roads come straight from the descriptors in
//! [`MapConfig`]. Trees and buildings are scattered inside their cluster discs
//! with a seeded RNG, rejecting spots that collide with roads, water, location
//! pins, the map edge or objects already placed. Rejection is bounded per item,
//! so a crowded cluster ends up with fewer objects rather than looping.

use crate::config::{AreaKind, ClusterDescriptor, ClusterKind, MapConfig};
use crate::constants::*;
use crate::geometry::{cuboid, cylinder, plane, strip, MeshData};
use glam::{Mat4, Quat, Vec2, Vec3};
use rand::prelude::*;

const GRID_LINE_WIDTH: f32 = 0.4;
const DASH_LENGTH: f32 = 4.0;
const DASH_GAP: f32 = 4.0;
const DASH_WIDTH: f32 = 0.6;
const TREE_RADIUS: f32 = 2.0;
const BUILDING_GAP: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingFootprint {
    pub center: Vec2,
    pub size: Vec2,
    pub height: f32,
    pub rotation: f32,
}

impl BuildingFootprint {
    /// Radius of the circle enclosing the footprint.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.length() * 0.5
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub roads: usize,
    pub areas: usize,
    pub trees: usize,
    pub buildings: usize,
    pub vertices: usize,
    pub triangles: usize,
}

/// Merged static geometry plus the scatter results it was built from.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub mesh: MeshData,
    pub trees: Vec<Vec2>,
    pub buildings: Vec<BuildingFootprint>,
    pub stats: SceneStats,
}

pub fn build_scene(config: &MapConfig) -> Scene {
    let mut scene = Scene::default();
    let palette = &config.palette;
    let h = config.half_extent;

    scene
        .mesh
        .append(&plane(2.0 * h, 2.0 * h, palette.ground, true));
    add_grid(&mut scene.mesh, config);

    for area in &config.areas {
        let color = match area.kind {
            AreaKind::Park => palette.park,
            AreaKind::Plaza => palette.plaza,
            AreaKind::Water => palette.water,
        };
        scene.mesh.append_transformed(
            &plane(area.size.x, area.size.y, color, false),
            Mat4::from_translation(Vec3::new(area.center.x, AREA_Y, area.center.y)),
        );
    }

    for road in &config.roads {
        scene
            .mesh
            .append(&strip(road.from, road.to, road.width, ROAD_Y, palette.road));
        add_dashes(&mut scene.mesh, road.from, road.to, palette.road_marking);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    for cluster in &config.clusters {
        match cluster.kind {
            ClusterKind::Trees => scatter_trees(&mut scene, config, cluster, &mut rng),
            ClusterKind::Buildings => scatter_buildings(&mut scene, config, cluster, &mut rng),
        }
    }

    scene.stats = SceneStats {
        roads: config.roads.len(),
        areas: config.areas.len(),
        trees: scene.trees.len(),
        buildings: scene.buildings.len(),
        vertices: scene.mesh.vertices.len(),
        triangles: scene.mesh.triangle_count(),
    };
    log::info!(
        "[scene] built trees={} buildings={} roads={} vertices={} triangles={}",
        scene.stats.trees,
        scene.stats.buildings,
        scene.stats.roads,
        scene.stats.vertices,
        scene.stats.triangles
    );
    scene
}

fn add_grid(mesh: &mut MeshData, config: &MapConfig) {
    let h = config.half_extent;
    let n = (h / config.grid_spacing).floor() as i32;
    for k in -n..=n {
        let c = k as f32 * config.grid_spacing;
        mesh.append(&strip(
            Vec2::new(c, -h),
            Vec2::new(c, h),
            GRID_LINE_WIDTH,
            GRID_Y,
            config.palette.grid,
        ));
        mesh.append(&strip(
            Vec2::new(-h, c),
            Vec2::new(h, c),
            GRID_LINE_WIDTH,
            GRID_Y,
            config.palette.grid,
        ));
    }
}

fn add_dashes(mesh: &mut MeshData, from: Vec2, to: Vec2, color: [f32; 3]) {
    let len = from.distance(to);
    if len <= DASH_LENGTH {
        return;
    }
    let dir = (to - from) / len;
    let mut s = DASH_GAP * 0.5;
    while s + DASH_LENGTH <= len {
        let a = from + dir * s;
        let b = from + dir * (s + DASH_LENGTH);
        mesh.append(&strip(a, b, DASH_WIDTH, ROAD_MARKING_Y, color));
        s += DASH_LENGTH + DASH_GAP;
    }
}

/// Whether a round object of `radius` at `p` collides with fixed map features.
fn blocked_by_layout(config: &MapConfig, p: Vec2, radius: f32) -> bool {
    let limit = config.half_extent - EDGE_MARGIN - radius;
    if p.x.abs() > limit || p.y.abs() > limit {
        return true;
    }
    if config
        .roads
        .iter()
        .any(|r| r.distance_to(p) < r.width * 0.5 + ROAD_CLEARANCE + radius)
    {
        return true;
    }
    if config
        .locations
        .iter()
        .any(|l| l.ground_xz().distance(p) < LOCATION_CLEARANCE + radius)
    {
        return true;
    }
    config
        .areas
        .iter()
        .any(|a| a.kind == AreaKind::Water && a.contains(p))
}

fn sample_in_disc(rng: &mut StdRng, cluster: &ClusterDescriptor) -> Vec2 {
    let r = cluster.radius * rng.gen::<f32>().sqrt();
    let theta = rng.gen::<f32>() * std::f32::consts::TAU;
    cluster.center + Vec2::new(theta.cos(), theta.sin()) * r
}

fn scatter_trees(scene: &mut Scene, config: &MapConfig, cluster: &ClusterDescriptor, rng: &mut StdRng) {
    let palette = &config.palette;
    let mut placed = 0;
    let attempts = cluster.count * PLACEMENT_ATTEMPTS_PER_ITEM;
    for _ in 0..attempts {
        if placed >= cluster.count {
            break;
        }
        let p = sample_in_disc(rng, cluster);
        if blocked_by_layout(config, p, TREE_RADIUS)
            || scene.trees.iter().any(|t| t.distance(p) < TREE_MIN_SPACING)
            || scene
                .buildings
                .iter()
                .any(|b| b.center.distance(p) < b.radius() + TREE_RADIUS)
        {
            continue;
        }
        let s: f32 = rng.gen_range(0.8..1.4);
        let foliage = *palette.foliage.choose(rng).unwrap_or(&palette.park);
        let at = |y: f32| Mat4::from_translation(Vec3::new(p.x, y, p.y));
        scene
            .mesh
            .append_transformed(&cylinder(0.5 * s, 0.7 * s, 3.0 * s, 6, palette.trunk), at(0.0));
        scene
            .mesh
            .append_transformed(&cylinder(0.0, 3.0 * s, 6.0 * s, 8, foliage), at(2.5 * s));
        scene
            .mesh
            .append_transformed(&cylinder(0.0, 2.2 * s, 4.0 * s, 8, foliage), at(5.5 * s));
        scene.trees.push(p);
        placed += 1;
    }
    if placed < cluster.count {
        log::debug!(
            "[scene] tree cluster at ({:.0},{:.0}) placed {}/{}",
            cluster.center.x,
            cluster.center.y,
            placed,
            cluster.count
        );
    }
}

fn scatter_buildings(
    scene: &mut Scene,
    config: &MapConfig,
    cluster: &ClusterDescriptor,
    rng: &mut StdRng,
) {
    let palette = &config.palette;
    let mut placed = 0;
    let attempts = cluster.count * PLACEMENT_ATTEMPTS_PER_ITEM;
    for _ in 0..attempts {
        if placed >= cluster.count {
            break;
        }
        let p = sample_in_disc(rng, cluster);
        let size = Vec2::new(rng.gen_range(6.0..14.0), rng.gen_range(6.0..14.0));
        // taller toward the city center
        let centrality = 1.0 - (p.length() / config.half_extent).clamp(0.0, 1.0);
        let height = rng.gen_range(8.0..24.0) * (1.0 + 1.5 * centrality);
        let rotation = rng.gen_range(0.0..std::f32::consts::FRAC_PI_2);
        let fp = BuildingFootprint {
            center: p,
            size,
            height,
            rotation,
        };
        let r = fp.radius();
        if blocked_by_layout(config, p, r)
            || scene
                .buildings
                .iter()
                .any(|b| b.center.distance(p) < b.radius() + r + BUILDING_GAP)
            || scene.trees.iter().any(|t| t.distance(p) < r + TREE_RADIUS)
        {
            continue;
        }
        let color = *palette.buildings.choose(rng).unwrap_or(&palette.plaza);
        let place = |y: f32| {
            Mat4::from_rotation_translation(
                Quat::from_rotation_y(rotation),
                Vec3::new(p.x, y, p.y),
            )
        };
        scene.mesh.append_transformed(
            &cuboid(Vec3::new(size.x, height, size.y), color),
            place(height * 0.5),
        );
        scene.mesh.append_transformed(
            &cuboid(Vec3::new(size.x * 0.9, 0.6, size.y * 0.9), palette.roof),
            place(height + 0.3),
        );
        scene.buildings.push(fp);
        placed += 1;
    }
    if placed < cluster.count {
        log::debug!(
            "[scene] building cluster at ({:.0},{:.0}) placed {}/{}",
            cluster.center.x,
            cluster.center.y,
            placed,
            cluster.count
        );
    }
}
