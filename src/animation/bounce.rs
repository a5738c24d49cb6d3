use glam::Vec3;

use crate::animation::{Animator, FrameContext};
use crate::scene::{ObjectKey, Scene};
use crate::settings::{BounceMode, BounceSettings};

/// A point bouncing inside an axis-aligned box.
///
/// In [`BounceMode::PerFrame`] the position is integrated one fixed step per
/// running frame; a step that would leave the box is reflected back inside
/// and the velocity on that axis flips on the same frame. In
/// [`BounceMode::TimeScaled`] the position is a closed-form triangle wave of
/// elapsed time.
#[derive(Debug, Clone)]
pub struct Bounce {
    settings: BounceSettings,
    lo: Vec3,
    hi: Vec3,
    position: Vec3,
    velocity: Vec3,
}

impl Bounce {
    #[must_use]
    pub fn new(settings: BounceSettings) -> Self {
        let lo = settings.inner_min();
        let hi = settings.inner_max();
        let position = settings.start.clamp(lo, hi);
        if position != settings.start {
            log::warn!(
                "Bounce start {} lies outside its box, clamped to {position}",
                settings.start
            );
        }
        let velocity = settings.velocity;
        Self {
            settings,
            lo,
            hi,
            position,
            velocity,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &BounceSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current per-frame velocity; its signs give the direction of travel.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Advances one frame in per-frame mode and returns the new position.
    pub fn step(&mut self) -> Vec3 {
        for axis in 0..3 {
            let (lo, hi) = (self.lo[axis], self.hi[axis]);
            let mut p = self.position[axis] + self.velocity[axis];
            if p > hi {
                p = 2.0 * hi - p;
                self.velocity[axis] = -self.velocity[axis];
            } else if p < lo {
                p = 2.0 * lo - p;
                self.velocity[axis] = -self.velocity[axis];
            }
            self.position[axis] = p.clamp(lo, hi);
        }
        self.position
    }

    /// Position and per-frame velocity at `elapsed` seconds in time-scaled
    /// mode. Pure: does not touch the integrated state.
    #[must_use]
    pub fn sample(&self, elapsed: f32) -> (Vec3, Vec3) {
        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;
        for axis in 0..3 {
            let step = self.settings.velocity[axis];
            let (p, forward) = triangle_wave(
                self.settings.start[axis].clamp(self.lo[axis], self.hi[axis]),
                step * self.settings.reference_fps,
                self.lo[axis],
                self.hi[axis],
                elapsed,
            );
            position[axis] = p;
            velocity[axis] = if forward { step } else { -step };
        }
        (position, velocity)
    }

    /// Moves the bounce forward for one frame according to its mode.
    pub fn advance(&mut self, ctx: &FrameContext) -> Vec3 {
        match self.settings.mode {
            BounceMode::PerFrame => {
                if ctx.running {
                    self.step();
                }
            }
            BounceMode::TimeScaled => {
                (self.position, self.velocity) = self.sample(ctx.elapsed);
            }
        }
        self.position
    }
}

/// Triangle wave between `lo` and `hi` starting at `start` and moving at
/// `speed` units per second. Returns the position and whether travel is
/// currently in the direction of `speed`.
fn triangle_wave(start: f32, speed: f32, lo: f32, hi: f32, t: f32) -> (f32, bool) {
    let span = hi - lo;
    if span <= 0.0 || speed == 0.0 {
        return (start, true);
    }
    let period = 2.0 * span;
    let s = (start - lo + speed * t).rem_euclid(period);
    if s <= span {
        (lo + s, true)
    } else {
        (hi - (s - span), false)
    }
}

/// Moves one scene object along a [`Bounce`].
pub struct BounceAnimator {
    bounce: Bounce,
    target: ObjectKey,
}

impl BounceAnimator {
    #[must_use]
    pub fn new(bounce: Bounce, target: ObjectKey) -> Self {
        Self { bounce, target }
    }

    #[must_use]
    pub fn bounce(&self) -> &Bounce {
        &self.bounce
    }
}

impl Animator for BounceAnimator {
    fn name(&self) -> &'static str {
        "bounce"
    }

    fn update(&mut self, ctx: &FrameContext, scene: &mut Scene) {
        let position = self.bounce.advance(ctx);
        if let Some(transform) = scene.transform_mut(self.target) {
            transform.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_wave_reflects_at_bounds() {
        // span 4, speed 1: reaches the top after 2s, back at start after 4s.
        let (p, up) = triangle_wave(0.0, 1.0, -2.0, 2.0, 1.0);
        assert!((p - 1.0).abs() < 1e-6 && up);
        let (p, up) = triangle_wave(0.0, 1.0, -2.0, 2.0, 3.0);
        assert!((p - 1.0).abs() < 1e-6 && !up);
        let (p, _) = triangle_wave(0.0, 1.0, -2.0, 2.0, 6.0);
        assert!((p - -2.0).abs() < 1e-5);
    }

    #[test]
    fn triangle_wave_handles_negative_speed() {
        let (p, forward) = triangle_wave(0.0, -1.0, -2.0, 2.0, 1.0);
        assert!((p - -1.0).abs() < 1e-6);
        assert!(forward);
        let (p, forward) = triangle_wave(0.0, -1.0, -2.0, 2.0, 3.0);
        assert!((p - -1.0).abs() < 1e-6);
        assert!(!forward);
    }

    #[test]
    fn pinned_axis_stays_put() {
        let (p, _) = triangle_wave(0.5, 3.0, 0.5, 0.5, 10.0);
        assert_eq!(p, 0.5);
    }
}
