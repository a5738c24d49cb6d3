use serde::Serialize;

use crate::animation::{Animator, FrameContext};
use crate::animation::rig::LampRig;
use crate::scene::Scene;
use crate::settings::LampSettings;

/// Light levels of the lamp at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlickerLevels {
    /// Multiplier around 1.0 shared by the bulb and its fill light.
    pub flicker: f32,
    pub bulb_emissive: f32,
    pub bulb_light: f32,
    pub spot: f32,
}

/// Small natural variation of the lamp's bulb and spotlight.
pub struct LampFlicker {
    settings: LampSettings,
    rig: LampRig,
}

impl LampFlicker {
    #[must_use]
    pub fn new(settings: LampSettings, rig: LampRig) -> Self {
        Self { settings, rig }
    }

    /// Pure function of elapsed time.
    #[must_use]
    pub fn levels(settings: &LampSettings, elapsed: f32) -> FlickerLevels {
        let flicker = 1.0 + (elapsed * settings.flicker_frequency).sin() * settings.flicker_depth;
        let sway = 1.0 - settings.sway_depth
            + (elapsed * settings.sway_frequency).sin().abs() * settings.sway_depth;
        FlickerLevels {
            flicker,
            bulb_emissive: settings.bulb_emissive * flicker,
            bulb_light: settings.bulb_light_intensity * flicker,
            spot: settings.spot_intensity * sway,
        }
    }
}

impl Animator for LampFlicker {
    fn name(&self) -> &'static str {
        "flicker"
    }

    fn update(&mut self, ctx: &FrameContext, scene: &mut Scene) {
        let levels = Self::levels(&self.settings, ctx.elapsed);

        if let Some(bulb) = scene.object_mut(self.rig.bulb) {
            bulb.emissive_intensity = levels.bulb_emissive;
        }
        if let Some(light) = scene.light_mut(self.rig.bulb_light) {
            light.intensity = levels.bulb_light;
        }
        if let Some(light) = scene.light_mut(self.rig.spot) {
            light.intensity = levels.spot;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_at_zero_match_base_intensities() {
        let settings = LampSettings::default();
        let levels = LampFlicker::levels(&settings, 0.0);
        assert!((levels.flicker - 1.0).abs() < 1e-6);
        assert!((levels.bulb_emissive - 3.0).abs() < 1e-6);
        assert!((levels.bulb_light - 0.6).abs() < 1e-6);
        assert!((levels.spot - 2.6 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn spot_stays_within_sway_band() {
        let settings = LampSettings::default();
        for i in 0..500 {
            let spot = LampFlicker::levels(&settings, i as f32 * 0.037).spot;
            assert!(spot >= 2.6 * 0.95 - 1e-5 && spot <= 2.6 + 1e-5);
        }
    }
}
