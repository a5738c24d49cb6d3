use std::borrow::Cow;

use glam::Vec3;
use serde::Serialize;

use crate::scene::LightKey;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub range: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub range: f32,
    /// Half-angle of the cone in radians.
    pub angle: f32,
    pub penumbra: f32,
    /// World-space point the cone is aimed at.
    pub target: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Point(PointLight),
    Spot(SpotLight),
}

/// A light the animators may re-aim or dim.
#[derive(Debug, Clone)]
pub struct Light {
    pub name: Cow<'static, str>,
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub kind: LightKind,
}

/// Serializable light state reported in every frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightState {
    pub key: LightKey,
    pub name: String,
    /// RGB in `[0, 1]`.
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    /// Only spot lights have a target.
    pub target: Option<Vec3>,
}

impl Light {
    #[must_use]
    pub fn new_ambient(name: impl Into<Cow<'static, str>>, color: Vec3, intensity: f32) -> Self {
        Self {
            name: name.into(),
            color,
            intensity,
            position: Vec3::ZERO,
            kind: LightKind::Ambient,
        }
    }

    #[must_use]
    pub fn new_point(
        name: impl Into<Cow<'static, str>>,
        color: Vec3,
        intensity: f32,
        range: f32,
        position: Vec3,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            intensity,
            position,
            kind: LightKind::Point(PointLight { range }),
        }
    }

    #[must_use]
    pub fn new_spot(
        name: impl Into<Cow<'static, str>>,
        color: Vec3,
        intensity: f32,
        spot: SpotLight,
        position: Vec3,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            intensity,
            position,
            kind: LightKind::Spot(spot),
        }
    }

    /// Spot target, if this is a spot light.
    #[must_use]
    pub fn target(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Spot(spot) => Some(spot.target),
            _ => None,
        }
    }

    /// Re-aims a spot light. Returns `false` for other kinds.
    pub fn set_target(&mut self, target: Vec3) -> bool {
        match &mut self.kind {
            LightKind::Spot(spot) => {
                spot.target = target;
                true
            }
            _ => false,
        }
    }

    /// Converts a `0xRRGGBB` hex color to RGB floats in `[0, 1]`.
    #[must_use]
    pub fn hex(rgb: u32) -> Vec3 {
        let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
        let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
        let b = (rgb & 0xff) as f32 / 255.0;
        Vec3::new(r, g, b)
    }
}
