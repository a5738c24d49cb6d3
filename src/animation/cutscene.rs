use glam::Vec3;

use crate::animation::{Animator, FrameContext};
use crate::scene::{Camera, ObjectKey, Scene};
use crate::settings::{CutsceneSettings, Waypoint};

/// Camera that cycles through fixed waypoints.
///
/// Every `frames_per_shot` running frames the active waypoint advances
/// (wrapping around). Each running frame the camera covers `lerp_factor` of
/// its remaining distance to the active waypoint, then turns to look at the
/// focus object. Paused frames leave the camera untouched.
pub struct CameraCutscene {
    settings: CutsceneSettings,
    focus: ObjectKey,
    active: usize,
    frames_on_shot: u32,
}

impl CameraCutscene {
    /// `settings` must hold at least one waypoint (see
    /// [`StageSettings::validate`](crate::settings::StageSettings::validate)).
    #[must_use]
    pub fn new(settings: CutsceneSettings, focus: ObjectKey) -> Self {
        Self {
            settings,
            focus,
            active: 0,
            frames_on_shot: 0,
        }
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn active_waypoint(&self) -> Option<&Waypoint> {
        self.settings.waypoints.get(self.active)
    }

    /// Running frames spent on the current waypoint so far.
    #[must_use]
    pub fn frames_on_shot(&self) -> u32 {
        self.frames_on_shot
    }

    /// One running frame: maybe cut, ease toward the waypoint, aim at
    /// `focus_point`.
    pub fn step_camera(&mut self, camera: &mut Camera, focus_point: Vec3) {
        let count = self.settings.waypoints.len();
        if count == 0 {
            return;
        }

        self.frames_on_shot += 1;
        if self.frames_on_shot >= self.settings.frames_per_shot {
            self.frames_on_shot = 0;
            self.active = (self.active + 1) % count;
            log::debug!("Cutting to waypoint '{}'", self.settings.waypoints[self.active].name);
        }

        let waypoint = self.settings.waypoints[self.active].position;
        camera.position = camera.position.lerp(waypoint, self.settings.lerp_factor);
        camera.look_at(focus_point + Vec3::Y * self.settings.look_at_height);
    }
}

impl Animator for CameraCutscene {
    fn name(&self) -> &'static str {
        "cutscene"
    }

    fn update(&mut self, ctx: &FrameContext, scene: &mut Scene) {
        if !ctx.running {
            return;
        }
        let Some(focus_point) = scene.world_position(self.focus) else {
            return;
        };
        self.step_camera(&mut scene.camera, focus_point);
    }
}
