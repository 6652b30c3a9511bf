use bevy::math::primitives::InfinitePlane3d;
use bevy::prelude::*;
use serde::Deserialize;

/// Which raycasts an entity takes part in.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum CollisionLayer {
    #[default]
    Solid,
    Terrain,
    NoCollision,
}

/// Ray-surface intersection used to project the cursor onto the ground.
pub trait PlacementSurfaceProbe {
    fn cast_to_surface(&self, ray: Ray3d, max_distance: f32) -> Option<Vec3>;
}

/// Flat rectangular area items may be dropped onto. The patch lies in the
/// entity's local XZ plane.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlacementSurface {
    pub half_extents: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePatch {
    pub center: Vec3,
    pub normal: Dir3,
    pub right: Vec3,
    pub forward: Vec3,
    pub half_extents: Vec2,
}

impl SurfacePatch {
    pub fn from_transform(transform: &GlobalTransform, surface: &PlacementSurface) -> Self {
        Self {
            center: transform.translation(),
            normal: transform.up(),
            right: *transform.right(),
            forward: *transform.forward(),
            half_extents: surface.half_extents,
        }
    }

    /// Distance along the ray to this patch, if the ray crosses it.
    pub fn intersect(&self, ray: Ray3d) -> Option<f32> {
        let plane = InfinitePlane3d {
            normal: self.normal,
        };
        let distance = ray.intersect_plane(self.center, plane)?;
        let local = ray.get_point(distance) - self.center;
        let inside = local.dot(self.right).abs() <= self.half_extents.x
            && local.dot(self.forward).abs() <= self.half_extents.y;
        inside.then_some(distance)
    }
}

/// Snapshot of every terrain-layer placement surface for one frame.
#[derive(Debug, Default, Clone)]
pub struct SurfaceProbe {
    patches: Vec<SurfacePatch>,
}

impl SurfaceProbe {
    pub fn new(patches: Vec<SurfacePatch>) -> Self {
        Self { patches }
    }

    pub fn collect<'a, I>(surfaces: I) -> Self
    where
        I: IntoIterator<Item = (&'a GlobalTransform, &'a PlacementSurface, &'a CollisionLayer)>,
    {
        let patches = surfaces
            .into_iter()
            .filter(|(_, _, layer)| **layer == CollisionLayer::Terrain)
            .map(|(transform, surface, _)| SurfacePatch::from_transform(transform, surface))
            .collect();
        Self::new(patches)
    }
}

impl PlacementSurfaceProbe for SurfaceProbe {
    fn cast_to_surface(&self, ray: Ray3d, max_distance: f32) -> Option<Vec3> {
        self.patches
            .iter()
            .filter_map(|patch| patch.intersect(ray))
            .filter(|distance| *distance <= max_distance)
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| ray.get_point(distance))
    }
}
