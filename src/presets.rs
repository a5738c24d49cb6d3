//! Scene Presets
//!
//! The demo scenes, each a scene layout plus the animators that move it.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::animation::{
    Bounce, BounceAnimator, CameraCutscene, LampFlicker, LampRig, MannequinRig, WalkAnimator,
    WalkCycle,
};
use crate::engine::Engine;
use crate::errors::StageError;
use crate::scene::{Camera, Light, Scene, SceneObject, Transform};
use crate::settings::{BounceSettings, StageSettings};

/// Which demo scene to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenePreset {
    /// A ball bouncing vertically between ±2.
    BouncingBall,
    /// The 2D canvas ball bouncing inside a 500x500 box.
    CanvasBounce,
    /// The mannequin walking under a hanging lamp.
    LampWalk,
    /// The lamp walk filmed by a camera cycling through waypoints.
    Cutscene,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 4] = [
        ScenePreset::BouncingBall,
        ScenePreset::CanvasBounce,
        ScenePreset::LampWalk,
        ScenePreset::Cutscene,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::BouncingBall => "ball",
            ScenePreset::CanvasBounce => "canvas",
            ScenePreset::LampWalk => "walk",
            ScenePreset::Cutscene => "cutscene",
        }
    }

    /// Builds the scene without validating `settings`; use
    /// [`Engine::from_preset`] unless the settings are known to be valid.
    #[must_use]
    pub fn build(self, settings: &StageSettings) -> Engine {
        match self {
            ScenePreset::BouncingBall => {
                build_bounce(settings, &settings.bounce, Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO)
            }
            ScenePreset::CanvasBounce => {
                let center = (settings.canvas.min + settings.canvas.max) * 0.5;
                build_bounce(settings, &settings.canvas, center + Vec3::Z * 600.0, center)
            }
            ScenePreset::LampWalk => build_walk(settings, false),
            ScenePreset::Cutscene => build_walk(settings, true),
        }
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenePreset {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenePreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StageError::UnknownPreset(s.to_string()))
    }
}

fn build_bounce(
    settings: &StageSettings,
    bounce: &BounceSettings,
    eye: Vec3,
    target: Vec3,
) -> Engine {
    let mut camera = Camera::from_settings(&settings.camera);
    camera.place(eye, target);

    let mut scene = Scene::new(camera);
    let bounce = Bounce::new(bounce.clone());
    let ball = scene.add_object(
        SceneObject::new("ball").with_transform(Transform::from_position(bounce.position())),
    );
    scene.add_light(Light::new_ambient("ambient", Vec3::ONE, 0.4));
    scene.add_light(Light::new_point("key", Vec3::ONE, 1.0, 50.0, eye + Vec3::Y * 2.0));

    let mut engine = Engine::new(scene);
    engine.add_animator(BounceAnimator::new(bounce, ball));
    engine.set_focus(ball);
    engine
}

fn build_walk(settings: &StageSettings, cutscene: bool) -> Engine {
    let walk = &settings.walk;
    let stage_center = Vec3::new(0.0, walk.light_target_height, 0.0);

    let mut camera = Camera::from_settings(&settings.camera);
    camera.place(Vec3::new(0.0, 3.0, 8.0), stage_center);

    let mut scene = Scene::new(camera);
    scene.add_light(Light::new_ambient("ambient", Light::hex(0x0010_1010), 1.0));
    scene.add_light(Light::new_point(
        "rim",
        Light::hex(0x0040_4050),
        0.3,
        10.0,
        Vec3::new(-4.0, 3.0, 5.0),
    ));

    let lamp = LampRig::build(&mut scene, &settings.lamp, stage_center);
    let rig = MannequinRig::build(&mut scene, Vec3::new(-walk.walk_distance / 2.0, 0.0, 0.0));
    let root = rig.root;
    let spot = lamp.spot;

    let mut engine = Engine::new(scene);
    engine.add_animator(WalkAnimator::new(WalkCycle::new(walk.clone()), rig).with_spotlight(spot));
    engine.add_animator(LampFlicker::new(settings.lamp.clone(), lamp));
    if cutscene {
        engine.add_animator(CameraCutscene::new(settings.cutscene.clone(), root));
    }
    engine.set_focus(root);
    engine
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_parse_by_name() {
        for preset in ScenePreset::ALL {
            assert_eq!(preset.name().parse::<ScenePreset>().unwrap(), preset);
        }
        assert_eq!(" Walk ".parse::<ScenePreset>().unwrap(), ScenePreset::LampWalk);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let err = "disco".parse::<ScenePreset>().unwrap_err();
        assert!(matches!(err, StageError::UnknownPreset(name) if name == "disco"));
    }
}
