


// Reference frames for placed scene objects. Every object of the demo
// (floor, hat, balls, camera) hangs off the world root directly, so a
// single world-from-local matrix is all a frame needs. Converting a
// point between two frames goes through world space.

use crate::prelude::*;


#[derive(Debug, Clone, Copy)]
pub struct Frame {
    world_from_local: Matrix4,
}

impl Frame {

    pub const WORLD: Self = Self {
        world_from_local: Matrix4::IDENTITY,
    };

    pub fn new_from(world_from_local: Matrix4) -> Self {
        Self {
            world_from_local,
        }
    }

    pub fn from_position(position: Vector3) -> Self {
        Self {
            world_from_local: Matrix4::from_translation(position),
        }
    }

    pub fn matrix(&self) -> Matrix4 {
        self.world_from_local
    }

    /// Translation part, i.e. 4th column of the matrix
    #[inline]
    pub fn position(&self) -> Vector3 {
        let col = self.world_from_local.w_axis;
        Vector3::new(col.x, col.y, col.z)
    }

    /// World direction the local -Z axis points at (the "forward"
    /// of a camera pose or of a freshly spawned ball).
    #[inline]
    pub fn front(&self) -> Vector3 {
        transform_dir(&self.world_from_local, &Vector3::new(0.0, 0.0, -1.0)).normalize()
    }

    /// New frame shifted `distance` along this frame's local -Z.
    pub fn translated_forward(&self, distance: Float) -> Self {
        let offset = Matrix4::from_translation(Vector3::new(0.0, 0.0, -distance));
        Self {
            world_from_local: self.world_from_local * offset,
        }
    }

    #[inline]
    pub fn to_world(&self, local_point: &Vector3) -> Vector3 {
        transform_point(&self.world_from_local, local_point)
    }

    #[inline]
    pub fn to_local(&self, world_point: &Vector3) -> Vector3 {
        // TODO: cache the inverse if per-tick conversions ever show up in a profile
        transform_point(&self.world_from_local.inverse(), world_point)
    }
}

/// Express `point`, given in `from` coordinates, in `to` coordinates.
/// This is the prerequisite step before aabb::contains, which itself
/// never converts anything.
pub fn convert_position(point: &Vector3, from: &Frame, to: &Frame) -> Vector3 {
    to.to_local(&from.to_world(point))
}
