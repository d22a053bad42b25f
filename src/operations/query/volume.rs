use crate::geometry::PolySet;
use crate::tessellation::mesh_triangles;

/// Computes the signed volume enclosed by a closed mesh.
///
/// Uses the signed tetrahedron method: for each triangle, sums
/// `(1/6) * v0 . (v1 x v2)`. The result is positive when every face winds
/// outward and negative when every face winds inward.
pub struct Volume<'a> {
    mesh: &'a PolySet,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(mesh: &'a PolySet) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the signed volume.
    #[must_use]
    pub fn execute(&self) -> f64 {
        mesh_triangles(self.mesh)
            .map(|tri| {
                let [v0, v1, v2] = tri.vertices;
                v0.coords.dot(&v1.coords.cross(&v2.coords))
            })
            .sum::<f64>()
            / 6.0
    }
}
