use std::borrow::Cow;

use crate::scene::ObjectKey;
use crate::scene::transform::Transform;

/// A movable scene object.
///
/// Only carries what the animators touch: a name for reporting, an optional
/// parent, the local [`Transform`] and an emissive scalar for glowing props.
/// Geometry and materials belong to the draw target.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: Cow<'static, str>,
    pub(crate) parent: Option<ObjectKey>,
    pub transform: Transform,
    /// Emissive strength; zero for props that don't glow.
    pub emissive_intensity: f32,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            transform: Transform::new(),
            emissive_intensity: 0.0,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_emissive(mut self, intensity: f32) -> Self {
        self.emissive_intensity = intensity;
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ObjectKey> {
        self.parent
    }
}
