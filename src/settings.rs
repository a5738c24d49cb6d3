//! Stage Settings
//!
//! Every tunable constant of the demo scenes lives here, so hosts can reshape
//! an animation without touching code. All structs implement [`Default`] with
//! the values the demo scenes ship with, and deserialize with
//! `#[serde(default)]` so a settings file only needs the fields it overrides.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use myth_stage::settings::StageSettings;
//!
//! // Demo defaults
//! let settings = StageSettings::default();
//!
//! // Partial override from JSON
//! let settings = StageSettings::from_json_str(r#"{ "walk": { "walk_speed": 0.8 } }"#)?;
//! ```

use std::path::Path;

use glam::Vec3;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{Result, StageError};

// ---------------------------------------------------------------------------
// StageSettings
// ---------------------------------------------------------------------------

/// Root settings object consumed by [`Engine::from_preset`](crate::Engine::from_preset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Whether the engine starts in the running state.
    pub autostart: bool,
    pub camera: CameraSettings,
    pub walk: WalkSettings,
    /// Vertical ball bounce used by the 3D ball scene.
    pub bounce: BounceSettings,
    /// Two-axis bounce used by the 2D canvas scene. Omitted fields fall back
    /// to [`BounceSettings::canvas`], not to the vertical ball.
    #[serde(deserialize_with = "canvas_overrides")]
    pub canvas: BounceSettings,
    pub cutscene: CutsceneSettings,
    pub lamp: LampSettings,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            autostart: true,
            camera: CameraSettings::default(),
            walk: WalkSettings::default(),
            bounce: BounceSettings::default(),
            canvas: BounceSettings::canvas(),
            cutscene: CutsceneSettings::default(),
            lamp: LampSettings::default(),
        }
    }
}

impl StageSettings {
    /// Parses settings from JSON and validates them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads a JSON settings file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::info!("Loaded stage settings from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Checks every section. The first offending setting is reported.
    pub fn validate(&self) -> Result<()> {
        self.camera.validate()?;
        self.walk.validate()?;
        self.bounce.validate("bounce")?;
        self.canvas.validate("canvas")?;
        self.cutscene.validate()?;
        self.lamp.validate()
    }
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Perspective projection parameters shared by every preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraSettings {
    fn validate(&self) -> Result<()> {
        finite("camera", &[self.fov_degrees, self.aspect, self.near, self.far])?;
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(StageError::invalid(
                "camera.fov_degrees",
                format!("must be within (0, 180), got {}", self.fov_degrees),
            ));
        }
        if self.aspect <= 0.0 {
            return Err(StageError::invalid("camera.aspect", "must be positive"));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(StageError::invalid(
                "camera.near",
                format!("expected 0 < near < far, got near={} far={}", self.near, self.far),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Walk cycle
// ---------------------------------------------------------------------------

/// Constants of the mannequin walk cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkSettings {
    /// Full length of the back-and-forth path; the figure stays within ±half.
    pub walk_distance: f32,
    /// Phase speed in radians per second.
    pub walk_speed: f32,
    /// Maximum limb swing in radians before the per-limb gains.
    pub swing_amplitude: f32,
    /// Peak torso bob height.
    pub bob_height: f32,
    /// Height of the point the spotlight aims at above the figure root.
    pub light_target_height: f32,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            walk_distance: 6.0,
            walk_speed: 0.9,
            swing_amplitude: 0.6,
            bob_height: 0.12,
            light_target_height: 0.6,
        }
    }
}

impl WalkSettings {
    fn validate(&self) -> Result<()> {
        finite(
            "walk",
            &[
                self.walk_distance,
                self.walk_speed,
                self.swing_amplitude,
                self.bob_height,
                self.light_target_height,
            ],
        )?;
        if self.walk_distance < 0.0 {
            return Err(StageError::invalid("walk.walk_distance", "must not be negative"));
        }
        if self.bob_height < 0.0 {
            return Err(StageError::invalid("walk.bob_height", "must not be negative"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Bounce
// ---------------------------------------------------------------------------

/// How a bouncing prop turns its velocity into motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BounceMode {
    /// Adds `velocity` once per running frame. Bounce period depends on the
    /// host's refresh rate.
    PerFrame,
    /// Closed-form triangle wave of elapsed time, moving at
    /// `velocity * reference_fps` units per second.
    TimeScaled,
}

/// Constants of a prop bouncing inside an axis-aligned box.
///
/// An axis whose box span (after shrinking by `radius`) is zero stays pinned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceSettings {
    pub mode: BounceMode,
    pub start: Vec3,
    /// Displacement per frame.
    pub velocity: Vec3,
    pub min: Vec3,
    pub max: Vec3,
    /// Ball radius; the reachable box is `[min + radius, max - radius]`.
    pub radius: f32,
    /// Frame rate the per-frame velocity was tuned for.
    pub reference_fps: f32,
}

impl Default for BounceSettings {
    fn default() -> Self {
        Self {
            mode: BounceMode::TimeScaled,
            start: Vec3::ZERO,
            velocity: Vec3::new(0.0, 0.05, 0.0),
            min: Vec3::new(0.0, -2.0, 0.0),
            max: Vec3::new(0.0, 2.0, 0.0),
            radius: 0.0,
            reference_fps: 60.0,
        }
    }
}

impl BounceSettings {
    /// The 2D canvas ball: 500x500 pixels, radius 20, two pixels per frame
    /// on both axes.
    #[must_use]
    pub fn canvas() -> Self {
        Self {
            mode: BounceMode::PerFrame,
            start: Vec3::new(50.0, 50.0, 0.0),
            velocity: Vec3::new(2.0, 2.0, 0.0),
            min: Vec3::ZERO,
            max: Vec3::new(500.0, 500.0, 0.0),
            radius: 20.0,
            reference_fps: 60.0,
        }
    }

    /// Lower corner of the box the ball center can reach.
    #[must_use]
    pub fn inner_min(&self) -> Vec3 {
        self.min + self.shrink()
    }

    /// Upper corner of the box the ball center can reach.
    #[must_use]
    pub fn inner_max(&self) -> Vec3 {
        self.max - self.shrink()
    }

    /// Flat axes (min == max) don't shrink by the radius.
    fn shrink(&self) -> Vec3 {
        Vec3::select(self.min.cmpeq(self.max), Vec3::ZERO, Vec3::splat(self.radius))
    }

    fn validate(&self, section: &'static str) -> Result<()> {
        finite(section, &self.start.to_array())?;
        finite(section, &self.velocity.to_array())?;
        finite(section, &self.min.to_array())?;
        finite(section, &self.max.to_array())?;
        finite(section, &[self.radius, self.reference_fps])?;

        if self.radius < 0.0 {
            return Err(StageError::invalid(section, "radius must not be negative"));
        }
        if self.reference_fps <= 0.0 {
            return Err(StageError::invalid(section, "reference_fps must be positive"));
        }

        let span = self.inner_max() - self.inner_min();
        for axis in 0..3 {
            if span[axis] < 0.0 {
                return Err(StageError::invalid(
                    section,
                    format!("box is smaller than the ball on axis {axis}"),
                ));
            }
            let step = self.velocity[axis].abs();
            if step > 0.0 && span[axis] == 0.0 {
                return Err(StageError::invalid(
                    section,
                    format!("axis {axis} has a velocity but no room to move"),
                ));
            }
            if self.mode == BounceMode::PerFrame && step > span[axis] {
                return Err(StageError::invalid(
                    section,
                    format!("per-frame step {step} on axis {axis} exceeds box span {}", span[axis]),
                ));
            }
        }
        Ok(())
    }
}

/// Applies the fields present in the `canvas` section on top of
/// [`BounceSettings::canvas`].
fn canvas_overrides<'de, D>(deserializer: D) -> std::result::Result<BounceSettings, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = serde_json::Value::deserialize(deserializer)?;
    let mut merged = serde_json::to_value(BounceSettings::canvas()).map_err(D::Error::custom)?;
    match (&mut merged, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(fields)) => base.extend(fields),
        (_, other) => {
            return Err(D::Error::custom(format!("expected a canvas object, got {other}")));
        }
    }
    serde_json::from_value(merged).map_err(D::Error::custom)
}

// ---------------------------------------------------------------------------
// Cutscene
// ---------------------------------------------------------------------------

/// A fixed camera position used as an interpolation target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
}

impl Waypoint {
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Constants of the cycling camera cutscene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutsceneSettings {
    /// Running frames spent on each waypoint before cutting to the next.
    pub frames_per_shot: u32,
    /// Fraction of the remaining distance covered each frame.
    pub lerp_factor: f32,
    pub waypoints: Vec<Waypoint>,
    /// Height above the focus object's origin the camera looks at.
    pub look_at_height: f32,
}

impl Default for CutsceneSettings {
    fn default() -> Self {
        Self {
            frames_per_shot: 200,
            lerp_factor: 0.02,
            waypoints: vec![
                Waypoint::new("wide", Vec3::new(0.0, 3.0, 8.0)),
                Waypoint::new("side", Vec3::new(8.0, 1.5, 0.0)),
                Waypoint::new("overhead", Vec3::new(0.0, 10.0, 2.0)),
            ],
            look_at_height: 0.6,
        }
    }
}

impl CutsceneSettings {
    fn validate(&self) -> Result<()> {
        finite("cutscene", &[self.lerp_factor, self.look_at_height])?;
        if self.frames_per_shot == 0 {
            return Err(StageError::invalid("cutscene.frames_per_shot", "must be at least 1"));
        }
        if !(self.lerp_factor > 0.0 && self.lerp_factor <= 1.0) {
            return Err(StageError::invalid(
                "cutscene.lerp_factor",
                format!("must be within (0, 1], got {}", self.lerp_factor),
            ));
        }
        if self.waypoints.is_empty() {
            return Err(StageError::invalid(
                "cutscene.waypoints",
                "at least one waypoint is required",
            ));
        }
        for waypoint in &self.waypoints {
            finite("cutscene.waypoints", &waypoint.position.to_array())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Lamp
// ---------------------------------------------------------------------------

/// Placement and flicker of the hanging lamp in the walk scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LampSettings {
    pub position: Vec3,
    pub spot_intensity: f32,
    pub bulb_light_intensity: f32,
    pub bulb_emissive: f32,
    /// Bulb flicker frequency (radians per second) and relative depth.
    pub flicker_frequency: f32,
    pub flicker_depth: f32,
    /// Slow spotlight breathing frequency and relative depth.
    pub sway_frequency: f32,
    pub sway_depth: f32,
}

impl Default for LampSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 6.5, 0.0),
            spot_intensity: 2.6,
            bulb_light_intensity: 0.6,
            bulb_emissive: 3.0,
            flicker_frequency: 12.0,
            flicker_depth: 0.02,
            sway_frequency: 1.2,
            sway_depth: 0.05,
        }
    }
}

impl LampSettings {
    fn validate(&self) -> Result<()> {
        finite("lamp", &self.position.to_array())?;
        finite(
            "lamp",
            &[
                self.spot_intensity,
                self.bulb_light_intensity,
                self.bulb_emissive,
                self.flicker_frequency,
                self.flicker_depth,
                self.sway_frequency,
                self.sway_depth,
            ],
        )?;
        if !(0.0..=1.0).contains(&self.flicker_depth) || !(0.0..=1.0).contains(&self.sway_depth) {
            return Err(StageError::invalid(
                "lamp",
                "flicker and sway depths must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

fn finite(section: &'static str, values: &[f32]) -> Result<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(StageError::invalid(section, format!("non-finite value {v}"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        StageSettings::default().validate().unwrap();
    }

    #[test]
    fn canvas_box_shrinks_by_radius_on_plane() {
        let canvas = BounceSettings::canvas();
        assert_eq!(canvas.inner_min(), Vec3::new(20.0, 20.0, 0.0));
        assert_eq!(canvas.inner_max(), Vec3::new(480.0, 480.0, 0.0));
    }
}
