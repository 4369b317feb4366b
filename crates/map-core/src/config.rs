//! Static map configuration: camera, extents, palette, layout descriptors and
//! the fixed list of locations.
//!
//! Everything here is fixed at startup. [`MapConfig::default`] describes the
//! shipped city; [`MapConfig::validate`] checks the invariants the rest of the
//! crate relies on.

use crate::constants::*;
use crate::error::MapError;
use fnv::FnvHashSet;
use glam::{Vec2, Vec3};

/// A named place shown on the map. Immutable for the whole session.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub x: f32,
    pub z: f32,
    pub image_url: &'static str,
    pub rating: &'static str,
}

impl Location {
    #[inline]
    pub fn ground_position(&self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    #[inline]
    pub fn ground_xz(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}

pub static LOCATIONS: &[Location] = &[
    Location {
        id: "central-library",
        name: "Central Library",
        category: "Culture",
        description: "Five floors of books, a rooftop reading garden and free public workshops every weekend.",
        x: -45.0,
        z: -55.0,
        image_url: "images/central-library.jpg",
        rating: "4.8",
    },
    Location {
        id: "riverside-park",
        name: "Riverside Park",
        category: "Park",
        description: "The largest green space in the city, with shaded trails, a pond and open lawns.",
        x: -150.0,
        z: -150.0,
        image_url: "images/riverside-park.jpg",
        rating: "4.7",
    },
    Location {
        id: "harbor-market",
        name: "Harbor Market",
        category: "Food",
        description: "Covered market by the lake with fresh produce, street food stalls and a Sunday flea market.",
        x: 122.0,
        z: 114.0,
        image_url: "images/harbor-market.jpg",
        rating: "4.5",
    },
    Location {
        id: "old-town-hall",
        name: "Old Town Hall",
        category: "Landmark",
        description: "Restored nineteenth-century hall with a clock tower overlooking the old quarter.",
        x: -55.0,
        z: 45.0,
        image_url: "images/old-town-hall.jpg",
        rating: "4.6",
    },
    Location {
        id: "tech-hub",
        name: "Tech Hub",
        category: "Business",
        description: "Co-working campus and startup incubator with a public demo floor.",
        x: 55.0,
        z: 55.0,
        image_url: "images/tech-hub.jpg",
        rating: "4.3",
    },
    Location {
        id: "sunset-cafe",
        name: "Sunset Café",
        category: "Food",
        description: "Small terrace café facing west, known for its pastries and evening light.",
        x: -150.0,
        z: 135.0,
        image_url: "images/sunset-cafe.jpg",
        rating: "4.9",
    },
    Location {
        id: "city-museum",
        name: "City Museum",
        category: "Culture",
        description: "Local history, a modern art wing and rotating exhibitions from around the region.",
        x: 50.0,
        z: -55.0,
        image_url: "images/city-museum.jpg",
        rating: "4.6",
    },
    Location {
        id: "arena",
        name: "City Arena",
        category: "Sports",
        description: "Multi-purpose arena hosting basketball, concerts and the winter ice rink.",
        x: 150.0,
        z: -60.0,
        image_url: "images/arena.jpg",
        rating: "4.4",
    },
];

/// Camera optics and the home viewpoint used at startup and by reset-view.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub home_position: Vec3,
    pub home_target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: CAMERA_FOV_Y_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            home_position: Vec3::from(CAMERA_HOME_POSITION),
            home_target: Vec3::from(CAMERA_HOME_TARGET),
        }
    }
}

/// Flat colors used by the scene builder and marker registry.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub ground: [f32; 3],
    pub grid: [f32; 3],
    pub road: [f32; 3],
    pub road_marking: [f32; 3],
    pub park: [f32; 3],
    pub plaza: [f32; 3],
    pub water: [f32; 3],
    pub trunk: [f32; 3],
    pub foliage: &'static [[f32; 3]],
    pub buildings: &'static [[f32; 3]],
    pub roof: [f32; 3],
    pub marker_default: [f32; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ground: [0.80, 0.78, 0.72],
            grid: [0.70, 0.68, 0.62],
            road: [0.32, 0.33, 0.36],
            road_marking: [0.95, 0.92, 0.80],
            park: [0.52, 0.72, 0.42],
            plaza: [0.86, 0.82, 0.74],
            water: [0.36, 0.62, 0.82],
            trunk: [0.42, 0.30, 0.20],
            foliage: &[[0.30, 0.58, 0.30], [0.36, 0.64, 0.28], [0.24, 0.50, 0.32]],
            buildings: &[
                [0.93, 0.90, 0.86],
                [0.82, 0.86, 0.90],
                [0.90, 0.82, 0.74],
                [0.76, 0.78, 0.82],
                [0.96, 0.94, 0.90],
            ],
            roof: [0.45, 0.45, 0.50],
            marker_default: [0.95, 0.95, 0.95],
        }
    }
}

impl Palette {
    /// Marker color by location category; unknown categories get the default.
    pub fn marker_color(&self, category: &str) -> [f32; 3] {
        match category {
            "Culture" => [1.00, 0.76, 0.20],
            "Park" => [0.30, 0.85, 0.45],
            "Food" => [1.00, 0.45, 0.25],
            "Landmark" => [0.65, 0.45, 1.00],
            "Business" => [0.25, 0.80, 1.00],
            "Sports" => [1.00, 0.35, 0.70],
            _ => self.marker_default,
        }
    }
}

/// A straight road segment on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadDescriptor {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
}

impl RoadDescriptor {
    pub const fn new(from: Vec2, to: Vec2, width: f32) -> Self {
        Self { from, to, width }
    }

    /// Distance from `p` to the road's center line.
    pub fn distance_to(&self, p: Vec2) -> f32 {
        let seg = self.to - self.from;
        let len_sq = seg.length_squared();
        if len_sq <= f32::EPSILON {
            return p.distance(self.from);
        }
        let t = ((p - self.from).dot(seg) / len_sq).clamp(0.0, 1.0);
        p.distance(self.from + seg * t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AreaKind {
    Park,
    Plaza,
    Water,
}

/// Axis-aligned ground patch painted over the base ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaDescriptor {
    pub center: Vec2,
    pub size: Vec2,
    pub kind: AreaKind,
}

impl AreaDescriptor {
    pub fn contains(&self, p: Vec2) -> bool {
        let half = self.size * 0.5;
        (p.x - self.center.x).abs() <= half.x && (p.y - self.center.y).abs() <= half.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterKind {
    Trees,
    Buildings,
}

/// A disc of scattered objects; positions are sampled at build time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterDescriptor {
    pub center: Vec2,
    pub radius: f32,
    pub count: usize,
    pub kind: ClusterKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub camera: CameraConfig,
    pub half_extent: f32,
    pub grid_spacing: f32,
    pub seed: u64,
    pub palette: Palette,
    pub roads: Vec<RoadDescriptor>,
    pub areas: Vec<AreaDescriptor>,
    pub clusters: Vec<ClusterDescriptor>,
    pub locations: Vec<Location>,
    /// Decorative ground texture; the scene renders flat-shaded without it.
    pub ground_texture_url: Option<&'static str>,
}

impl Default for MapConfig {
    fn default() -> Self {
        let h = MAP_HALF_EXTENT;
        let roads = vec![
            RoadDescriptor::new(Vec2::new(0.0, -h), Vec2::new(0.0, h), 16.0),
            RoadDescriptor::new(Vec2::new(-100.0, -h), Vec2::new(-100.0, h), 12.0),
            RoadDescriptor::new(Vec2::new(100.0, -h), Vec2::new(100.0, h), 12.0),
            RoadDescriptor::new(Vec2::new(-h, 0.0), Vec2::new(h, 0.0), 16.0),
            RoadDescriptor::new(Vec2::new(-h, -100.0), Vec2::new(h, -100.0), 12.0),
            RoadDescriptor::new(Vec2::new(-h, 100.0), Vec2::new(h, 100.0), 12.0),
            RoadDescriptor::new(Vec2::new(-h, 165.0), Vec2::new(60.0, 165.0), 10.0),
        ];
        let areas = vec![
            AreaDescriptor {
                center: Vec2::new(-150.0, -150.0),
                size: Vec2::new(84.0, 84.0),
                kind: AreaKind::Park,
            },
            AreaDescriptor {
                center: Vec2::new(50.0, -150.0),
                size: Vec2::new(84.0, 84.0),
                kind: AreaKind::Park,
            },
            AreaDescriptor {
                center: Vec2::new(150.0, 150.0),
                size: Vec2::new(70.0, 60.0),
                kind: AreaKind::Water,
            },
            AreaDescriptor {
                center: Vec2::new(0.0, 0.0),
                size: Vec2::new(36.0, 36.0),
                kind: AreaKind::Plaza,
            },
        ];
        let trees = |x: f32, z: f32, radius: f32, count: usize| ClusterDescriptor {
            center: Vec2::new(x, z),
            radius,
            count,
            kind: ClusterKind::Trees,
        };
        let buildings = |x: f32, z: f32, radius: f32, count: usize| ClusterDescriptor {
            center: Vec2::new(x, z),
            radius,
            count,
            kind: ClusterKind::Buildings,
        };
        let clusters = vec![
            trees(-150.0, -150.0, 38.0, 40),
            trees(50.0, -150.0, 36.0, 24),
            trees(-60.0, 182.0, 18.0, 12),
            trees(150.0, -150.0, 40.0, 14),
            buildings(50.0, 50.0, 40.0, 18),
            buildings(-50.0, 50.0, 40.0, 16),
            buildings(-150.0, 50.0, 40.0, 14),
            buildings(150.0, 40.0, 35.0, 12),
            buildings(-50.0, -50.0, 38.0, 14),
            buildings(50.0, -50.0, 38.0, 12),
        ];
        Self {
            camera: CameraConfig::default(),
            half_extent: MAP_HALF_EXTENT,
            grid_spacing: GRID_SPACING,
            seed: SCENE_SEED,
            palette: Palette::default(),
            roads,
            areas,
            clusters,
            locations: LOCATIONS.to_vec(),
            ground_texture_url: Some("textures/ground.jpg"),
        }
    }
}

impl MapConfig {
    pub fn validate(&self) -> Result<(), MapError> {
        if self.half_extent.is_nan() || self.half_extent <= 0.0 {
            return Err(MapError::InvalidExtent(self.half_extent));
        }
        if self.grid_spacing.is_nan() || self.grid_spacing <= 0.0 {
            return Err(MapError::InvalidGridSpacing(self.grid_spacing));
        }
        let mut seen = FnvHashSet::default();
        for loc in &self.locations {
            if !seen.insert(loc.id) {
                return Err(MapError::DuplicateLocation(loc.id.to_string()));
            }
            if loc.x.abs() > self.half_extent || loc.z.abs() > self.half_extent {
                return Err(MapError::LocationOutOfBounds {
                    id: loc.id.to_string(),
                    x: loc.x,
                    z: loc.z,
                    half_extent: self.half_extent,
                });
            }
        }
        Ok(())
    }

    pub fn location(&self, id: &str) -> Option<(usize, &Location)> {
        self.locations.iter().enumerate().find(|(_, l)| l.id == id)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.half_extent && p.y.abs() <= self.half_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(MapConfig::default().validate(), Ok(()));
    }

    #[test]
    fn road_distance_clamps_to_segment_ends() {
        let road = RoadDescriptor::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0);
        assert!((road.distance_to(Vec2::new(5.0, 3.0)) - 3.0).abs() < 1e-5);
        assert!((road.distance_to(Vec2::new(14.0, 3.0)) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn unknown_category_uses_default_marker_color() {
        let p = Palette::default();
        assert_eq!(p.marker_color("Nope"), p.marker_default);
    }
}
