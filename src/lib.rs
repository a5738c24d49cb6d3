#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod engine;
pub mod errors;
pub mod presets;
pub mod scene;
pub mod settings;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animation::{Animator, FrameContext};
pub use engine::{Engine, FrameState, ObjectPose, RedrawTarget};
pub use errors::{Result, StageError};
pub use presets::ScenePreset;
pub use scene::{Camera, Light, ObjectKey, Scene, SceneObject, Transform};
pub use settings::StageSettings;
pub use utils::time::{Clock, PlaybackState, Timer};
