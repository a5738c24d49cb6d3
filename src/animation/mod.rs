//! Animation Module
//!
//! Procedural animators that reposition scene objects once per frame:
//!
//! - [`WalkAnimator`]: sine-driven walk cycle of the mannequin rig
//! - [`BounceAnimator`]: a prop bouncing inside a box
//! - [`CameraCutscene`]: camera easing through fixed waypoints
//! - [`LampFlicker`]: bulb and spotlight intensity variation
//!
//! Every animator implements [`Animator`] and receives the frame's
//! [`FrameContext`] explicitly; none of them reads ambient state.

pub mod bounce;
pub mod cutscene;
pub mod flicker;
pub mod rig;
pub mod walk;

pub use bounce::{Bounce, BounceAnimator};
pub use cutscene::CameraCutscene;
pub use flicker::{FlickerLevels, LampFlicker};
pub use rig::{LampRig, MannequinRig};
pub use walk::{Limb, WalkAnimator, WalkCycle, WalkPose};

use crate::scene::Scene;

/// Per-frame input handed to every animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Clock time in seconds. Frozen while paused.
    pub elapsed: f32,
    /// Seconds the clock advanced this frame; zero while paused.
    pub delta: f32,
    /// Number of `update` calls so far, including this one.
    pub frame: u64,
    /// Whether the clock is running. Frame-stepped animators only step
    /// while this is set.
    pub running: bool,
}

impl FrameContext {
    /// A running frame at `elapsed` seconds.
    #[must_use]
    pub fn at(elapsed: f32) -> Self {
        Self {
            elapsed,
            delta: 0.0,
            frame: 0,
            running: true,
        }
    }
}

/// Something that moves scene objects once per frame.
pub trait Animator {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Writes this frame's poses into `scene`.
    fn update(&mut self, ctx: &FrameContext, scene: &mut Scene);
}
