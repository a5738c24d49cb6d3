//! Scene rigs: bundles of arena handles built once at setup.
//!
//! A rig spawns its objects into a [`Scene`] at their rest pose and keeps the
//! returned keys, so animators address parts directly instead of searching
//! the scene by name every frame.

use std::f32::consts::{FRAC_PI_6, PI};

use glam::Vec3;

use crate::animation::walk::Limb;
use crate::scene::{Light, LightKey, ObjectKey, Scene, SceneObject, SpotLight, Transform};
use crate::settings::LampSettings;

/// Handles to every part of the procedural mannequin.
#[derive(Debug, Clone)]
pub struct MannequinRig {
    pub root: ObjectKey,
    pub torso: ObjectKey,
    pub head: ObjectKey,
    pub neck: ObjectKey,
    pub hips: ObjectKey,
    pub feet: [ObjectKey; 2],
    limbs: [ObjectKey; 8],
    /// Torso height the walk bob is added to.
    pub torso_rest_y: f32,
}

impl MannequinRig {
    /// Spawns the figure with its root at `origin`.
    pub fn build(scene: &mut Scene, origin: Vec3) -> Self {
        let root = scene.add_object(
            SceneObject::new("mannequin").with_transform(Transform::from_position(origin)),
        );

        let mut part = |name: &'static str, transform: Transform| {
            scene.add_child(root, SceneObject::new(name).with_transform(transform))
        };
        let at = |x: f32, y: f32, z: f32| Transform::from_position(Vec3::new(x, y, z));

        let torso_rest_y = 0.0;
        let torso = part("torso", at(0.0, torso_rest_y, 0.0));
        let head = part("head", at(0.0, 1.15, 0.0));
        let neck = part("neck", at(0.0, 0.9, 0.0));
        let hips = part("hips", at(0.0, -0.55, 0.0));

        // Rest tilt of the arms away from the body.
        let arm_tilt = PI / 12.0;
        let limbs = Limb::ALL.map(|limb| {
            let transform = match limb {
                Limb::LeftUpperArm => at(-0.9, 0.45, 0.0).with_rotation(0.0, 0.0, arm_tilt),
                Limb::RightUpperArm => at(0.9, 0.45, 0.0).with_rotation(0.0, 0.0, -arm_tilt),
                Limb::LeftForearm => at(-1.4, -0.05, 0.0).with_rotation(0.0, 0.0, -FRAC_PI_6),
                Limb::RightForearm => at(1.4, -0.05, 0.0).with_rotation(0.0, 0.0, FRAC_PI_6),
                Limb::LeftThigh => at(-0.28, -1.25, 0.0),
                Limb::RightThigh => at(0.28, -1.25, 0.0),
                Limb::LeftShin => at(-0.28, -2.05, 0.0),
                Limb::RightShin => at(0.28, -2.05, 0.0),
            };
            part(limb.name(), transform)
        });

        let feet = [
            part("left_foot", at(-0.28, -2.45, 0.12)),
            part("right_foot", at(0.28, -2.45, 0.12)),
        ];

        log::debug!("Built mannequin rig at {origin}");

        Self {
            root,
            torso,
            head,
            neck,
            hips,
            feet,
            limbs,
            torso_rest_y,
        }
    }

    #[inline]
    #[must_use]
    pub fn limb(&self, limb: Limb) -> ObjectKey {
        self.limbs[limb.index()]
    }
}

/// Handles to the hanging lamp: visible props plus its lights.
#[derive(Debug, Clone)]
pub struct LampRig {
    pub shade: ObjectKey,
    pub bulb: ObjectKey,
    pub glow_cone: ObjectKey,
    pub spot: LightKey,
    pub bulb_light: LightKey,
}

impl LampRig {
    /// Spawns the lamp and aims its spotlight at `initial_target`.
    pub fn build(scene: &mut Scene, settings: &LampSettings, initial_target: Vec3) -> Self {
        let lamp = settings.position;

        // Shade and glow cone are flipped to open downward.
        let hanging = |depth: f32| Transform::from_position(lamp - Vec3::Y * depth);
        let shade = scene.add_object(
            SceneObject::new("lamp_shade").with_transform(hanging(0.2).with_rotation(PI, 0.0, 0.0)),
        );
        let bulb_position = lamp - Vec3::Y * 0.42;
        let bulb = scene.add_object(
            SceneObject::new("lamp_bulb")
                .with_transform(Transform::from_position(bulb_position))
                .with_emissive(settings.bulb_emissive),
        );
        let glow_cone = scene.add_object(
            SceneObject::new("lamp_glow").with_transform(hanging(3.0).with_rotation(PI, 0.0, 0.0)),
        );

        let spot = scene.add_light(Light::new_spot(
            "lamp_spot",
            Light::hex(0x00ff_f7e6),
            settings.spot_intensity,
            SpotLight {
                range: 30.0,
                angle: FRAC_PI_6,
                penumbra: 0.4,
                target: initial_target,
            },
            lamp,
        ));
        let bulb_light = scene.add_light(Light::new_point(
            "lamp_bulb_fill",
            Light::hex(0x00ff_f3d9),
            settings.bulb_light_intensity,
            6.0,
            bulb_position,
        ));

        Self {
            shade,
            bulb,
            glow_cone,
            spot,
            bulb_light,
        }
    }
}
