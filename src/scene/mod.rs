//! Scene Module
//!
//! The minimal scene state the animators drive:
//! - [`SceneObject`]: a named movable object with a [`Transform`]
//! - [`Scene`]: slot-map arenas of objects and lights plus the camera
//! - [`Camera`]: perspective camera with a look-at target
//! - [`Light`]: ambient, point and spot lights

pub mod camera;
pub mod light;
pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;

pub use camera::{Camera, CameraPose};
pub use light::{Light, LightKind, LightState, PointLight, SpotLight};
pub use node::SceneObject;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct ObjectKey;
    pub struct LightKey;
}
