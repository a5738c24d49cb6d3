use glam::Vec3;
use serde::Serialize;

use crate::animation::rig::MannequinRig;
use crate::animation::{Animator, FrameContext};
use crate::scene::{LightKey, Scene};
use crate::settings::WalkSettings;

/// The eight swinging limb segments of the mannequin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Limb {
    LeftUpperArm,
    RightUpperArm,
    LeftForearm,
    RightForearm,
    LeftThigh,
    RightThigh,
    LeftShin,
    RightShin,
}

/// How a limb follows the shared swing signal.
#[derive(Debug, Clone, Copy)]
enum Response {
    /// Follows the swing in both directions.
    Linear,
    /// Only bends on the half of the cycle where the signal is positive,
    /// like a knee that never hyper-extends.
    Flexion,
}

#[derive(Debug, Clone, Copy)]
struct LimbDrive {
    /// Rest angle about X.
    base: f32,
    /// +1 or -1; left and right limbs take opposite signs.
    sign: f32,
    gain: f32,
    response: Response,
}

impl Limb {
    pub const ALL: [Limb; 8] = [
        Limb::LeftUpperArm,
        Limb::RightUpperArm,
        Limb::LeftForearm,
        Limb::RightForearm,
        Limb::LeftThigh,
        Limb::RightThigh,
        Limb::LeftShin,
        Limb::RightShin,
    ];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Limb::LeftUpperArm => "left_upper_arm",
            Limb::RightUpperArm => "right_upper_arm",
            Limb::LeftForearm => "left_forearm",
            Limb::RightForearm => "right_forearm",
            Limb::LeftThigh => "left_thigh",
            Limb::RightThigh => "right_thigh",
            Limb::LeftShin => "left_shin",
            Limb::RightShin => "right_shin",
        }
    }

    fn drive(self) -> LimbDrive {
        use Response::{Flexion, Linear};
        let (base, sign, gain, response) = match self {
            Limb::LeftUpperArm => (0.2, 1.0, 0.5, Linear),
            Limb::RightUpperArm => (0.2, -1.0, 0.5, Linear),
            Limb::LeftForearm => (-0.4, -1.0, 0.2, Linear),
            Limb::RightForearm => (-0.4, 1.0, 0.2, Linear),
            Limb::LeftThigh => (0.2, -1.0, 0.7, Linear),
            Limb::RightThigh => (0.2, 1.0, 0.7, Linear),
            Limb::LeftShin => (-0.2, -1.0, 0.5, Flexion),
            Limb::RightShin => (-0.2, 1.0, 0.5, Flexion),
        };
        LimbDrive {
            base,
            sign,
            gain,
            response,
        }
    }

    /// Angle about X for a given swing value.
    #[must_use]
    pub fn angle(self, swing: f32) -> f32 {
        let drive = self.drive();
        let signal = swing * drive.sign;
        let signal = match drive.response {
            Response::Linear => signal,
            Response::Flexion => signal.max(0.0),
        };
        drive.base + signal * drive.gain
    }
}

/// Everything the walk cycle produces for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WalkPose {
    /// Horizontal offset of the figure root.
    pub root_x: f32,
    /// Torso lift above its rest height.
    pub torso_bob: f32,
    pub swing: f32,
    /// Limb angles indexed by [`Limb::index`].
    pub limbs: [f32; 8],
}

impl WalkPose {
    #[inline]
    #[must_use]
    pub fn limb(&self, limb: Limb) -> f32 {
        self.limbs[limb.index()]
    }
}

/// Closed-form walk cycle.
///
/// Every output is a pure function of elapsed time and the settings.
#[derive(Debug, Clone)]
pub struct WalkCycle {
    settings: WalkSettings,
}

impl WalkCycle {
    #[must_use]
    pub fn new(settings: WalkSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &WalkSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn phase(&self, elapsed: f32) -> f32 {
        elapsed * self.settings.walk_speed
    }

    /// `sin(phase) * walk_distance / 2`.
    #[must_use]
    pub fn horizontal_position(&self, elapsed: f32) -> f32 {
        self.phase(elapsed).sin() * (self.settings.walk_distance / 2.0)
    }

    /// `bob_height * |sin(2 * phase)|`: two bobs per sweep, never negative.
    #[must_use]
    pub fn torso_bob(&self, elapsed: f32) -> f32 {
        self.settings.bob_height * (self.phase(elapsed) * 2.0).sin().abs()
    }

    /// `sin(2 * phase) * swing_amplitude`.
    #[must_use]
    pub fn swing(&self, elapsed: f32) -> f32 {
        (self.phase(elapsed) * 2.0).sin() * self.settings.swing_amplitude
    }

    #[must_use]
    pub fn limb_angle(&self, limb: Limb, elapsed: f32) -> f32 {
        limb.angle(self.swing(elapsed))
    }

    #[must_use]
    pub fn pose(&self, elapsed: f32) -> WalkPose {
        let swing = self.swing(elapsed);
        WalkPose {
            root_x: self.horizontal_position(elapsed),
            torso_bob: self.torso_bob(elapsed),
            swing,
            limbs: Limb::ALL.map(|limb| limb.angle(swing)),
        }
    }
}

/// Drives a [`MannequinRig`] with a [`WalkCycle`] and keeps a spotlight
/// aimed at the figure.
pub struct WalkAnimator {
    cycle: WalkCycle,
    rig: MannequinRig,
    spot: Option<LightKey>,
}

impl WalkAnimator {
    #[must_use]
    pub fn new(cycle: WalkCycle, rig: MannequinRig) -> Self {
        Self {
            cycle,
            rig,
            spot: None,
        }
    }

    /// Makes the given spot light track the figure.
    #[must_use]
    pub fn with_spotlight(mut self, spot: LightKey) -> Self {
        self.spot = Some(spot);
        self
    }

    #[must_use]
    pub fn cycle(&self) -> &WalkCycle {
        &self.cycle
    }

    #[must_use]
    pub fn rig(&self) -> &MannequinRig {
        &self.rig
    }
}

impl Animator for WalkAnimator {
    fn name(&self) -> &'static str {
        "walk"
    }

    fn update(&mut self, ctx: &FrameContext, scene: &mut Scene) {
        let pose = self.cycle.pose(ctx.elapsed);

        let root = match scene.transform_mut(self.rig.root) {
            Some(transform) => {
                transform.position.x = pose.root_x;
                transform.position
            }
            None => return,
        };

        if let Some(torso) = scene.transform_mut(self.rig.torso) {
            torso.position.y = self.rig.torso_rest_y + pose.torso_bob;
        }

        for limb in Limb::ALL {
            if let Some(transform) = scene.transform_mut(self.rig.limb(limb)) {
                transform.rotation.x = pose.limb(limb);
            }
        }

        if let Some(spot) = self.spot.and_then(|key| scene.light_mut(key)) {
            let height = self.cycle.settings.light_target_height;
            let target = Vec3::new(root.x, root.y + height, root.z);
            spot.set_target(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limbs_oppose_each_other() {
        let swing = 0.4;
        assert!(Limb::LeftUpperArm.angle(swing) > 0.2);
        assert!(Limb::RightUpperArm.angle(swing) < 0.2);
        assert!(Limb::LeftThigh.angle(swing) < 0.2);
        assert!(Limb::RightThigh.angle(swing) > 0.2);
    }

    #[test]
    fn shins_only_bend_one_way() {
        assert!((Limb::LeftShin.angle(0.5) - -0.2).abs() < 1e-6);
        assert!((Limb::RightShin.angle(0.5) - 0.05).abs() < 1e-6);
        assert!((Limb::LeftShin.angle(-0.5) - 0.05).abs() < 1e-6);
        assert!((Limb::RightShin.angle(-0.5) - -0.2).abs() < 1e-6);
    }

    #[test]
    fn limb_indices_match_table_order() {
        for (i, limb) in Limb::ALL.iter().enumerate() {
            assert_eq!(limb.index(), i);
        }
    }
}
