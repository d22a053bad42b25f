use crate::error::{OperationError, Result};
use crate::geometry::Polyhedron;
use crate::math::Point3;

use super::MakePolyhedron;

/// Creates an axis-aligned box polyhedron from two corner points.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation. The six quad faces wind outward.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if `min_corner` is not below
    /// `max_corner` on every axis.
    pub fn execute(&self) -> Result<Polyhedron> {
        let (lo, hi) = (self.min_corner, self.max_corner);
        if lo.x >= hi.x || lo.y >= hi.y || lo.z >= hi.z {
            return Err(OperationError::InvalidInput(format!(
                "box corners {lo} and {hi} do not span a volume"
            ))
            .into());
        }

        let points = vec![
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
        ];
        let faces = vec![
            vec![0, 3, 2, 1], // bottom
            vec![4, 5, 6, 7], // top
            vec![0, 1, 5, 4], // front
            vec![1, 2, 6, 5], // right
            vec![2, 3, 7, 6], // back
            vec![3, 0, 4, 7], // left
        ];

        MakePolyhedron::new(points, faces).execute()
    }
}
