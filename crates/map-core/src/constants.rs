// Shared layout, camera and interaction tuning constants.

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.5;
pub const CAMERA_FAR: f32 = 2000.0;
pub const CAMERA_HOME_POSITION: [f32; 3] = [0.0, 220.0, 260.0];
pub const CAMERA_HOME_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

// Camera transitions
pub const FOCUS_DURATION_MS: f64 = 1200.0;
pub const RESET_DURATION_MS: f64 = 1000.0;
pub const FOCUS_OFFSET: [f32; 3] = [45.0, 50.0, 45.0]; // camera position relative to a focused marker

// Map layout
pub const MAP_HALF_EXTENT: f32 = 200.0; // map spans [-200, 200] on x and z
pub const GRID_SPACING: f32 = 20.0;
pub const SCENE_SEED: u64 = 42;

// Ground layer heights, keeps coplanar layers from z-fighting
pub const GRID_Y: f32 = 0.02;
pub const AREA_Y: f32 = 0.05;
pub const ROAD_Y: f32 = 0.08;
pub const ROAD_MARKING_Y: f32 = 0.11;

// Scatter placement
pub const PLACEMENT_ATTEMPTS_PER_ITEM: usize = 12;
pub const ROAD_CLEARANCE: f32 = 3.0; // extra gap between road edge and scattered objects
pub const LOCATION_CLEARANCE: f32 = 14.0; // keeps pins readable
pub const EDGE_MARGIN: f32 = 6.0;
pub const TREE_MIN_SPACING: f32 = 4.0;

// Marker geometry (local units, before hover scale)
pub const MARKER_BODY_RADIUS: f32 = 4.0;
pub const MARKER_BODY_HEIGHT: f32 = 14.0; // sphere center above ground
pub const MARKER_POINTER_RADIUS: f32 = 2.6;
pub const MARKER_POINTER_BASE: f32 = 2.0; // cone apex height
pub const MARKER_POINTER_HEIGHT: f32 = 9.0;
pub const MARKER_RING_INNER: f32 = 5.0;
pub const MARKER_RING_OUTER: f32 = 6.5;
pub const MARKER_PULSE_INNER: f32 = 6.0;
pub const MARKER_PULSE_OUTER: f32 = 7.0;
pub const MARKER_RING_Y: f32 = 0.15;
pub const MARKER_PULSE_Y: f32 = 0.18;

// Marker animation
pub const HOVER_SCALE: f32 = 1.15;
pub const IDLE_SCALE: f32 = 1.0;
pub const HOVER_SMOOTHING: f32 = 0.15; // fraction of the remaining distance covered per frame
pub const MARKER_BOB_AMPLITUDE: f32 = 1.2;
pub const MARKER_BOB_SPEED: f32 = 2.0; // radians per second
pub const PULSE_PERIOD_SEC: f32 = 2.0;
pub const PULSE_MAX_SCALE: f32 = 2.5;
pub const PULSE_START_OPACITY: f32 = 0.6;
pub const PULSE_PICK_MIN_OPACITY: f32 = 0.15; // fainter pulse rings are not pickable
pub const MARKER_PHASE_STEP: f32 = 0.7; // per-marker phase offset, radians

// Orbit controls
pub const ORBIT_MIN_DISTANCE: f32 = 40.0;
pub const ORBIT_MAX_DISTANCE: f32 = 600.0;
pub const ORBIT_MIN_POLAR: f32 = 0.1; // radians from straight down
pub const ORBIT_MAX_POLAR: f32 = 1.4; // keeps the camera above the ground plane
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per pixel
pub const ORBIT_ZOOM_STEP: f32 = 1.1; // distance factor per 100 wheel units
pub const ORBIT_PAN_SPEED: f32 = 0.0015; // world units per pixel per unit of distance

// Pointer
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 5.0;
