//! Engine Core Module
//!
//! This module contains [`Engine`], the per-session coordinator. It owns the
//! [`Scene`], the start/stop gated [`Clock`] and the list of animators, and
//! is driven by whatever redraw loop the host has (browser
//! `requestAnimationFrame`, a native window, a headless test).
//!
//! # Frame Flow
//!
//! 1. The host calls [`Engine::update`] (or [`Engine::frame`]) with the time
//!    since the previous refresh.
//! 2. The clock advances if running.
//! 3. Every animator runs in registration order against the scene.
//! 4. A [`FrameState`] snapshot is returned (and handed to the
//!    [`RedrawTarget`] by `frame`).
//!
//! # Example
//!
//! ```rust,ignore
//! use myth_stage::{Engine, ScenePreset, StageSettings};
//!
//! let mut engine = Engine::from_preset(ScenePreset::LampWalk, &StageSettings::default())?;
//! loop {
//!     let state = engine.update(1.0 / 60.0);
//!     // ... hand `state` to the renderer ...
//! }
//! ```

use glam::Vec3;
use serde::Serialize;

use crate::animation::{Animator, FrameContext};
use crate::errors::Result;
use crate::presets::ScenePreset;
use crate::scene::{CameraPose, LightState, ObjectKey, Scene};
use crate::settings::StageSettings;
use crate::utils::time::{Clock, PlaybackState};

/// Pose of one object in a [`FrameState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectPose {
    pub key: ObjectKey,
    pub name: String,
    /// Position relative to the parent.
    pub position: Vec3,
    /// Euler angles (XYZ) relative to the parent.
    pub rotation: Vec3,
    pub world_position: Vec3,
    pub emissive_intensity: f32,
}

/// Everything a draw target needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameState {
    pub frame: u64,
    pub elapsed: f32,
    pub playback: PlaybackState,
    pub objects: Vec<ObjectPose>,
    pub camera: CameraPose,
    pub lights: Vec<LightState>,
}

impl FrameState {
    /// Captures the current poses of `scene`.
    #[must_use]
    pub fn capture(scene: &Scene, frame: u64, elapsed: f32, playback: PlaybackState) -> Self {
        let objects = scene
            .objects()
            .map(|(key, object)| ObjectPose {
                key,
                name: object.name.to_string(),
                position: object.transform.position,
                rotation: object.transform.rotation,
                world_position: scene.world_position(key).unwrap_or(object.transform.position),
                emissive_intensity: object.emissive_intensity,
            })
            .collect();

        let lights = scene
            .lights
            .iter()
            .map(|(key, light)| LightState {
                key,
                name: light.name.to_string(),
                color: light.color,
                intensity: light.intensity,
                position: light.position,
                target: light.target(),
            })
            .collect();

        Self {
            frame,
            elapsed,
            playback,
            objects,
            camera: scene.camera.pose(),
            lights,
        }
    }

    #[must_use]
    pub fn object(&self, key: ObjectKey) -> Option<&ObjectPose> {
        self.objects.iter().find(|pose| pose.key == key)
    }

    #[must_use]
    pub fn object_by_name(&self, name: &str) -> Option<&ObjectPose> {
        self.objects.iter().find(|pose| pose.name == name)
    }
}

/// The opaque draw target on the host side.
pub trait RedrawTarget {
    fn redraw(&mut self, scene: &Scene, frame: &FrameState);
}

/// Session coordinator: scene, clock and animators.
pub struct Engine {
    pub scene: Scene,
    clock: Clock,
    animators: Vec<Box<dyn Animator>>,
    focus: Option<ObjectKey>,
    frame_count: u64,
}

impl Engine {
    /// Wraps a scene with a running clock and no animators.
    #[must_use]
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            clock: Clock::new(),
            animators: Vec::new(),
            focus: None,
            frame_count: 0,
        }
    }

    /// Validates `settings` and builds one of the demo scenes.
    pub fn from_preset(preset: ScenePreset, settings: &StageSettings) -> Result<Self> {
        settings.validate()?;
        let mut engine = preset.build(settings);
        if !settings.autostart {
            engine.clock.stop();
        }
        log::info!(
            "Built '{}' scene: {} objects, {} lights, {} animators",
            preset.name(),
            engine.scene.object_count(),
            engine.scene.lights.len(),
            engine.animators.len()
        );
        Ok(engine)
    }

    /// Appends an animator; animators run in insertion order.
    pub fn add_animator(&mut self, animator: impl Animator + 'static) {
        log::debug!("Registered animator '{}'", animator.name());
        self.animators.push(Box::new(animator));
    }

    /// Marks the object the scene revolves around (the ball, the mannequin).
    pub fn set_focus(&mut self, key: ObjectKey) {
        self.focus = Some(key);
    }

    #[must_use]
    pub fn focus(&self) -> Option<ObjectKey> {
        self.focus
    }

    // ========================================================================
    // Playback control
    // ========================================================================

    /// Resumes playback from the frozen elapsed time.
    pub fn start(&mut self) {
        if self.clock.start() {
            log::info!("Playback started at {:.3}s", self.clock.elapsed());
        } else {
            log::debug!("Start ignored: already running");
        }
    }

    /// Freezes playback.
    pub fn stop(&mut self) {
        if self.clock.stop() {
            log::info!("Playback paused at {:.3}s", self.clock.elapsed());
        } else {
            log::debug!("Stop ignored: already paused");
        }
    }

    #[inline]
    #[must_use]
    pub fn playback(&self) -> PlaybackState {
        self.clock.state()
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Number of `update` calls so far.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    // ========================================================================
    // Per-frame entry points
    // ========================================================================

    /// Advances the clock by `dt` seconds (if running), runs every animator
    /// and returns the resulting frame.
    pub fn update(&mut self, dt: f32) -> FrameState {
        let delta = self.clock.advance(dt);
        self.frame_count += 1;

        let ctx = FrameContext {
            elapsed: self.clock.elapsed(),
            delta,
            frame: self.frame_count,
            running: self.clock.is_running(),
        };

        for animator in &mut self.animators {
            animator.update(&ctx, &mut self.scene);
        }

        self.frame_state()
    }

    /// [`update`](Self::update) followed by a redraw request.
    pub fn frame<T: RedrawTarget + ?Sized>(&mut self, dt: f32, target: &mut T) -> FrameState {
        let state = self.update(dt);
        target.redraw(&self.scene, &state);
        state
    }

    /// Snapshot of the scene as of the last update.
    #[must_use]
    pub fn frame_state(&self) -> FrameState {
        FrameState::capture(&self.scene, self.frame_count, self.clock.elapsed(), self.clock.state())
    }
}
