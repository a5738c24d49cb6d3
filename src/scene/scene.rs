use glam::{Affine3A, Vec3};
use slotmap::SlotMap;

use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::SceneObject;
use crate::scene::transform::Transform;
use crate::scene::{LightKey, ObjectKey};

/// Scene container.
///
/// Objects and lights live in slot-map arenas; animators keep the keys
/// returned at insertion and never look anything up by name during a frame.
/// Objects may be parented once at insertion, which rules out cycles.
pub struct Scene {
    objects: SlotMap<ObjectKey, SceneObject>,
    pub lights: SlotMap<LightKey, Light>,
    pub camera: Camera,
}

impl Scene {
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            camera,
        }
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Adds a root object.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectKey {
        self.objects.insert(object)
    }

    /// Adds an object under `parent`. A stale parent key makes it a root.
    pub fn add_child(&mut self, parent: ObjectKey, mut object: SceneObject) -> ObjectKey {
        if self.objects.contains_key(parent) {
            object.parent = Some(parent);
        } else {
            log::warn!("Parent of '{}' is not in the scene, adding it as a root", object.name);
        }
        self.objects.insert(object)
    }

    #[inline]
    #[must_use]
    pub fn object(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    #[inline]
    pub fn object_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    /// Shortcut to an object's transform.
    #[inline]
    pub fn transform_mut(&mut self, key: ObjectKey) -> Option<&mut Transform> {
        self.objects.get_mut(key).map(|o| &mut o.transform)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Linear search by name. Meant for setup and tooling, not per frame.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.objects
            .iter()
            .find_map(|(key, o)| (o.name == name).then_some(key))
    }

    /// Composes the local matrices up the parent chain.
    #[must_use]
    pub fn world_matrix(&self, key: ObjectKey) -> Option<Affine3A> {
        let object = self.objects.get(key)?;
        let local = object.transform.local_matrix();
        match object.parent.and_then(|p| self.world_matrix(p)) {
            Some(parent) => Some(parent * local),
            None => Some(local),
        }
    }

    #[must_use]
    pub fn world_position(&self, key: ObjectKey) -> Option<Vec3> {
        self.world_matrix(key).map(|m| Vec3::from(m.translation))
    }

    // ========================================================================
    // Lights
    // ========================================================================

    pub fn add_light(&mut self, light: Light) -> LightKey {
        self.lights.insert(light)
    }

    #[inline]
    #[must_use]
    pub fn light(&self, key: LightKey) -> Option<&Light> {
        self.lights.get(key)
    }

    #[inline]
    pub fn light_mut(&mut self, key: LightKey) -> Option<&mut Light> {
        self.lights.get_mut(key)
    }
}
