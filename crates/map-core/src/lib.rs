pub mod animator;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod markers;
pub mod orbit;
pub mod ray;
pub mod scene;
pub mod session;
pub mod theme;

pub use animator::{ease_out_cubic, focus_view, AnimatorState, CameraAnimator, Transition};
pub use camera::{ndc_from_pixels, ray_from_ndc, view_proj, CameraView, Projection};
pub use config::{Location, MapConfig, Palette, LOCATIONS};
pub use error::MapError;
pub use geometry::{MeshData, Vertex};
pub use markers::{MarkerHit, MarkerId, MarkerRegistry, PartId, PartInstance, PartKind};
pub use orbit::{OrbitControls, OrbitLimits};
pub use ray::Ray;
pub use scene::{build_scene, Scene, SceneStats};
pub use session::{ClickOutcome, PanelState, Session};
pub use theme::{Theme, ThemeController, ThemePreset};
