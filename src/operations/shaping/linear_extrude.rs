use tracing::warn;

use crate::error::{OperationError, Result};
use crate::geometry::{Outline2d, PolySet, Polygon2d};
use crate::math::{Point3, Vector3};
use crate::tessellation::TessellatePolygon;

/// Extrudes a 2D polygon along +z into a closed prism.
///
/// The result consists of a bottom cap at z = 0 facing down, a top cap at
/// z = `height` facing up, and one quad per outline edge facing away from
/// the material. Nested outlines become holes (even-odd rule).
pub struct LinearExtrude {
    polygon: Polygon2d,
    height: f64,
}

impl LinearExtrude {
    /// Creates a new `LinearExtrude` operation.
    #[must_use]
    pub fn new(polygon: Polygon2d, height: f64) -> Self {
        Self { polygon, height }
    }

    /// Executes the extrusion.
    ///
    /// An empty polygon yields an empty mesh. A zero height yields coincident
    /// caps and zero-area walls, which are left for the triangulator to drop.
    /// A negative height extrudes below z = 0 with all faces flipped so they
    /// still face outward.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the height is not finite,
    /// or a tessellation error if outlines cross each other.
    pub fn execute(&self) -> Result<PolySet> {
        if !self.height.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "extrusion height must be finite, got {}",
                self.height
            ))
            .into());
        }

        let polygon = self.prepare();
        let mut solid = PolySet::new();
        if polygon.is_empty() {
            return Ok(solid);
        }

        let cap = TessellatePolygon::new(&polygon).execute()?;

        let mut bottom = cap.clone();
        bottom.reverse_faces();
        solid.append(&bottom);

        let mut top = cap;
        top.translate(&Vector3::new(0.0, 0.0, self.height));
        solid.append(&top);

        for outline in polygon.outlines() {
            add_walls(&mut solid, outline, self.height);
        }

        if self.height < 0.0 {
            solid.reverse_faces();
        }

        Ok(solid)
    }

    /// Drops empty and degenerate outlines and orients the rest.
    fn prepare(&self) -> Polygon2d {
        let mut prepared = Polygon2d::new();
        for (index, outline) in self.polygon.outlines().iter().enumerate() {
            if outline.is_empty() {
                continue;
            }
            let clean = outline.sanitized();
            if clean.vertices.len() < 3 {
                warn!(
                    index,
                    vertices = clean.vertices.len(),
                    "outline has fewer than 3 distinct points, skipped"
                );
                continue;
            }
            prepared.add_outline(clean);
        }
        for (first, second) in prepared.touching_outlines() {
            warn!(
                first,
                second,
                "outlines touch or share an edge, solid may not be closed"
            );
        }
        prepared.normalized()
    }
}

/// Adds one quad per edge, wound so the normal points to the right of the
/// edge direction, away from material on the left.
fn add_walls(solid: &mut PolySet, outline: &Outline2d, height: f64) {
    let n = outline.vertices.len();
    for i in 0..n {
        let a = outline.vertices[i];
        let b = outline.vertices[(i + 1) % n];
        solid.push(vec![
            Point3::new(a.x, a.y, 0.0),
            Point3::new(b.x, b.y, 0.0),
            Point3::new(b.x, b.y, height),
            Point3::new(a.x, a.y, height),
        ]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_3d::newell_normal;
    use crate::math::Point2;
    use crate::operations::query::Volume;
    use crate::tessellation::mesh_triangles;

    fn outline(points: &[(f64, f64)]) -> Outline2d {
        Outline2d::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn square(size: f64) -> Polygon2d {
        let mut poly = Polygon2d::new();
        poly.add_outline(outline(&[(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)]));
        poly
    }

    // ── Unit square ────────────────────────────────────────────

    #[test]
    fn square_prism_has_2_caps_and_4_walls() {
        let solid = LinearExtrude::new(square(1.0), 1.6).execute().unwrap();
        // 2 bottom triangles + 2 top triangles + 4 wall quads
        assert_eq!(solid.len(), 8);
        assert_eq!(mesh_triangles(&solid).count(), 12);
    }

    #[test]
    fn square_prism_faces_point_outward() {
        let solid = LinearExtrude::new(square(2.0), 1.0).execute().unwrap();
        let center = Point3::new(1.0, 1.0, 0.5);
        for face in &solid.polygons {
            let n = newell_normal(face).unwrap();
            let centroid = face.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords)
                / f64::from(u32::try_from(face.len()).unwrap());
            assert!(n.dot(&(centroid - center.coords)) > 0.0);
        }
        assert!((Volume::new(&solid).execute() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn clockwise_input_still_faces_outward() {
        let mut poly = Polygon2d::new();
        poly.add_outline(outline(&[(0.0, 0.0), (0.0, 3.0), (3.0, 3.0), (3.0, 0.0)]));
        let solid = LinearExtrude::new(poly, 2.0).execute().unwrap();
        assert!((Volume::new(&solid).execute() - 18.0).abs() < 1e-9);
    }

    // ── Holes ──────────────────────────────────────────────────

    #[test]
    fn nested_outline_cuts_a_hole() {
        let mut poly = square(10.0);
        poly.add_outline(outline(&[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]));
        let solid = LinearExtrude::new(poly, 1.0).execute().unwrap();
        assert!((Volume::new(&solid).execute() - 96.0).abs() < 1e-9);
    }

    // ── Edge cases ─────────────────────────────────────────────

    #[test]
    fn empty_polygon_gives_empty_solid() {
        let solid = LinearExtrude::new(Polygon2d::new(), 1.0).execute().unwrap();
        assert!(solid.is_empty());
    }

    #[test]
    fn repeated_closing_point_is_ignored() {
        let mut poly = Polygon2d::new();
        poly.add_outline(outline(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]));
        let solid = LinearExtrude::new(poly, 1.0).execute().unwrap();
        assert_eq!(mesh_triangles(&solid).count(), 12);
    }

    #[test]
    fn degenerate_outline_is_skipped() {
        let mut poly = square(1.0);
        poly.add_outline(outline(&[(5.0, 5.0), (6.0, 5.0)]));
        let solid = LinearExtrude::new(poly, 1.0).execute().unwrap();
        assert_eq!(solid.len(), 8);
    }

    #[test]
    fn zero_height_walls_are_degenerate() {
        let solid = LinearExtrude::new(square(1.0), 0.0).execute().unwrap();
        // Caps survive, walls collapse
        assert_eq!(mesh_triangles(&solid).count(), 4);
    }

    #[test]
    fn negative_height_stays_outward() {
        let solid = LinearExtrude::new(square(1.0), -2.0).execute().unwrap();
        assert!((Volume::new(&solid).execute() - 2.0).abs() < 1e-9);
        assert!(solid.polygons.iter().flatten().all(|p| p.z <= 0.0));
    }

    #[test]
    fn infinite_height_is_rejected() {
        assert!(LinearExtrude::new(square(1.0), f64::INFINITY).execute().is_err());
    }
}
