use crate::error::Result;
use crate::geometry::{PolySet, Polygon2d};
use crate::math::{Point2, Point3};

use super::triangulate::triangulate_loops;

/// Tessellates the interior of a 2D polygon into triangles lying at z = 0.
///
/// Outlines are combined with the even-odd rule, so nested outlines cut
/// holes. Every output triangle is counter-clockwise seen from +z.
pub struct TessellatePolygon<'a> {
    polygon: &'a Polygon2d,
}

impl<'a> TessellatePolygon<'a> {
    /// Creates a new `TessellatePolygon` operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon2d) -> Self {
        Self { polygon }
    }

    /// Executes the tessellation.
    ///
    /// Outlines with no vertices are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if an outline has fewer than 3 vertices or outlines
    /// cross each other.
    pub fn execute(&self) -> Result<PolySet> {
        let loops: Vec<Vec<Point2>> = self
            .polygon
            .outlines()
            .iter()
            .filter(|outline| !outline.is_empty())
            .map(|outline| outline.vertices.clone())
            .collect();

        let mut mesh = PolySet::new();
        if loops.is_empty() {
            return Ok(mesh);
        }

        let flat: Vec<Point2> = loops.iter().flatten().copied().collect();
        for tri in triangulate_loops(&loops)? {
            mesh.push(
                tri.iter()
                    .map(|&i| Point3::new(flat[i].x, flat[i].y, 0.0))
                    .collect(),
            );
        }

        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Outline2d;
    use crate::math::polygon_3d::newell_normal;
    use crate::math::Vector3;

    fn outline(points: &[(f64, f64)]) -> Outline2d {
        Outline2d::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[test]
    fn triangle_produces_1_triangle() {
        let mut poly = Polygon2d::new();
        poly.add_outline(outline(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]));
        let mesh = TessellatePolygon::new(&poly).execute().unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.polygons[0].len(), 3);
    }

    #[test]
    fn normals_point_up() {
        let mut poly = Polygon2d::new();
        poly.add_outline(outline(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)]));
        let mesh = TessellatePolygon::new(&poly).execute().unwrap();
        assert_eq!(mesh.len(), 2);
        for tri in &mesh.polygons {
            let n = newell_normal(tri).unwrap();
            assert!((n - Vector3::z()).norm() < 1e-9);
            assert!(tri.iter().all(|p| p.z == 0.0));
        }
    }

    #[test]
    fn empty_outlines_are_skipped() {
        let mut poly = Polygon2d::new();
        poly.add_outline(Outline2d::default());
        poly.add_outline(outline(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]));
        poly.add_outline(Outline2d::default());
        let mesh = TessellatePolygon::new(&poly).execute().unwrap();
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn empty_polygon_produces_nothing() {
        let poly = Polygon2d::new();
        assert!(TessellatePolygon::new(&poly).execute().unwrap().is_empty());
    }
}
