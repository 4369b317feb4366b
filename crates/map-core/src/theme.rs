//! Day/night presets and the controller that swaps them.

use crate::markers::MarkerRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    #[inline]
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    #[inline]
    pub fn preset(self) -> &'static ThemePreset {
        match self {
            Theme::Day => &DAY_PRESET,
            Theme::Night => &NIGHT_PRESET,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Day => "Day",
            Theme::Night => "Night",
        }
    }
}

/// Every parameter the theme toggle manages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemePreset {
    pub background: [f32; 3],
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub ambient_intensity: f32,
    pub hemisphere_intensity: f32,
    pub sun_intensity: f32,
    pub sun_color: [f32; 3],
    pub bloom_strength: f32,
    pub marker_emissive: f32,
}

pub const DAY_PRESET: ThemePreset = ThemePreset {
    background: [0.72, 0.84, 0.95],
    fog_color: [0.72, 0.84, 0.95],
    fog_near: 300.0,
    fog_far: 900.0,
    ambient_intensity: 0.55,
    hemisphere_intensity: 0.45,
    sun_intensity: 1.0,
    sun_color: [1.0, 0.97, 0.90],
    bloom_strength: 0.25,
    marker_emissive: 0.25,
};

pub const NIGHT_PRESET: ThemePreset = ThemePreset {
    background: [0.03, 0.04, 0.09],
    fog_color: [0.03, 0.04, 0.09],
    fog_near: 200.0,
    fog_far: 700.0,
    ambient_intensity: 0.18,
    hemisphere_intensity: 0.15,
    sun_intensity: 0.30,
    sun_color: [0.55, 0.62, 0.95],
    bloom_strength: 0.9,
    marker_emissive: 1.6,
};

// Lighting that does not change with the theme
pub const AMBIENT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const HEMISPHERE_SKY: [f32; 3] = [0.80, 0.88, 1.0];
pub const HEMISPHERE_GROUND: [f32; 3] = [0.45, 0.40, 0.32];
pub const SUN_DIRECTION: [f32; 3] = [-0.45, -0.80, -0.35]; // direction light travels
pub const BLOOM_THRESHOLD: f32 = 0.75;

/// Holds the active theme and the parameters currently applied to the scene.
#[derive(Clone, Debug)]
pub struct ThemeController {
    theme: Theme,
    applied: ThemePreset,
}

impl ThemeController {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            applied: *theme.preset(),
        }
    }

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Parameters the renderer should draw with.
    #[inline]
    pub fn applied(&self) -> &ThemePreset {
        &self.applied
    }

    /// Switch to the other preset, replacing every managed parameter at once,
    /// including the emissive intensity of all markers.
    pub fn toggle(&mut self, markers: &mut MarkerRegistry) -> Theme {
        self.theme = self.theme.toggled();
        self.applied = *self.theme.preset();
        markers.set_emissive_intensity(self.applied.marker_emissive);
        log::info!("[theme] switched to {}", self.theme.label());
        self.theme
    }
}

impl Default for ThemeController {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
