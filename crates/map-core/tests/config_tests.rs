// Configuration validation and location lookup.

use map_core::config::LOCATIONS;
use map_core::{MapConfig, MapError, Session};

#[test]
fn shipped_locations_are_unique_and_on_the_map() {
    let cfg = MapConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.locations.len(), LOCATIONS.len());
    let (i, loc) = cfg.location("arena").unwrap();
    assert_eq!(cfg.locations[i].id, loc.id);
    assert!(cfg.location("missing").is_none());
}

#[test]
fn duplicate_location_is_rejected() {
    let mut cfg = MapConfig::default();
    cfg.locations.push(LOCATIONS[0].clone());
    assert_eq!(
        cfg.validate(),
        Err(MapError::DuplicateLocation(LOCATIONS[0].id.to_string()))
    );
    assert!(Session::new(cfg, 1.0).is_err());
}

#[test]
fn out_of_bounds_location_is_rejected() {
    let mut cfg = MapConfig::default();
    let mut far = LOCATIONS[0].clone();
    far.id = "far-away";
    far.x = 500.0;
    cfg.locations.push(far);
    assert!(matches!(
        cfg.validate(),
        Err(MapError::LocationOutOfBounds { ref id, .. }) if id == "far-away"
    ));
}

#[test]
fn non_positive_extents_are_rejected() {
    let cfg = MapConfig {
        half_extent: 0.0,
        ..MapConfig::default()
    };
    assert_eq!(cfg.validate(), Err(MapError::InvalidExtent(0.0)));
    let cfg = MapConfig {
        grid_spacing: f32::NAN,
        ..MapConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(MapError::InvalidGridSpacing(_))));
}

#[test]
fn errors_render_readable_messages() {
    let msg = MapError::UnknownLocation("x".into()).to_string();
    assert_eq!(msg, "unknown location id `x`");
}
