use crate::math::polygon_2d::{
    dedup_closed_loop, point_in_polygon_2d, point_on_loop_2d, signed_area_2d,
};
use crate::math::Point2;

/// A closed 2D loop. The closing edge from the last point back to the first
/// is implicit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline2d {
    /// The loop vertices in file order.
    pub vertices: Vec<Point2>,
}

impl Outline2d {
    /// Creates an outline from its vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    /// Returns `true` if the outline has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns a copy without consecutive duplicates or a repeated closing point.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self::new(dedup_closed_loop(&self.vertices))
    }

    /// Signed area of the loop, positive when counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    /// Returns a copy whose orientation is counter-clockwise if `ccw` is set,
    /// clockwise otherwise.
    #[must_use]
    pub fn oriented(&self, ccw: bool) -> Self {
        if (self.signed_area() > 0.0) == ccw {
            self.clone()
        } else {
            Self::new(self.vertices.iter().rev().copied().collect())
        }
    }
}

/// A set of outlines interpreted with the even-odd rule.
///
/// An outline nested inside an odd number of other outlines bounds a hole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon2d {
    outlines: Vec<Outline2d>,
}

impl Polygon2d {
    /// Creates an empty polygon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outline.
    pub fn add_outline(&mut self, outline: Outline2d) {
        self.outlines.push(outline);
    }

    /// The outlines in insertion order.
    #[must_use]
    pub fn outlines(&self) -> &[Outline2d] {
        &self.outlines
    }

    /// Returns `true` if no outline has any vertex.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outlines.iter().all(Outline2d::is_empty)
    }

    /// Number of other outlines enclosing each outline.
    ///
    /// Even depth means the outline bounds material, odd depth a hole.
    #[must_use]
    pub fn nesting_depths(&self) -> Vec<usize> {
        self.outlines
            .iter()
            .enumerate()
            .map(|(i, outline)| {
                let Some(probe) = outline.vertices.first() else {
                    return 0;
                };
                self.outlines
                    .iter()
                    .enumerate()
                    .filter(|(j, other)| *j != i && point_in_polygon_2d(probe, &other.vertices))
                    .count()
            })
            .collect()
    }

    /// Index pairs `(i, j)`, `i < j`, of outlines where a vertex of one lies
    /// on the boundary of the other.
    ///
    /// Touching outlines defeat [`Self::nesting_depths`], which probes a
    /// single vertex, and the even-odd fill, which sees a shared edge once.
    #[must_use]
    pub fn touching_outlines(&self) -> Vec<(usize, usize)> {
        let touches = |a: &Outline2d, b: &Outline2d| {
            a.vertices.iter().any(|p| point_on_loop_2d(p, &b.vertices))
        };
        let mut pairs = Vec::new();
        for (i, a) in self.outlines.iter().enumerate() {
            for (j, b) in self.outlines.iter().enumerate().skip(i + 1) {
                if touches(a, b) || touches(b, a) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Returns a copy in which every outline is oriented so that material lies
    /// on its left: counter-clockwise for boundaries, clockwise for holes.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let outlines = self
            .outlines
            .iter()
            .zip(self.nesting_depths())
            .map(|(outline, depth)| outline.oriented(depth % 2 == 0))
            .collect();
        Self { outlines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Outline2d {
        Outline2d::new(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    #[test]
    fn nested_outline_is_a_hole() {
        let mut poly = Polygon2d::new();
        poly.add_outline(rect(0.0, 0.0, 10.0, 10.0));
        poly.add_outline(rect(2.0, 2.0, 4.0, 4.0));
        poly.add_outline(rect(20.0, 0.0, 30.0, 10.0));
        assert_eq!(poly.nesting_depths(), vec![0, 1, 0]);
    }

    #[test]
    fn normalized_orients_boundaries_and_holes() {
        let mut poly = Polygon2d::new();
        poly.add_outline(rect(0.0, 0.0, 10.0, 10.0).oriented(false));
        poly.add_outline(rect(2.0, 2.0, 4.0, 4.0));
        let normalized = poly.normalized();
        assert!(normalized.outlines()[0].signed_area() > 0.0);
        assert!(normalized.outlines()[1].signed_area() < 0.0);
    }

    #[test]
    fn notch_on_board_edge_touches() {
        let mut poly = Polygon2d::new();
        poly.add_outline(rect(0.0, 0.0, 10.0, 10.0));
        poly.add_outline(rect(0.0, 4.0, 2.0, 6.0));
        poly.add_outline(rect(4.0, 4.0, 6.0, 6.0));
        poly.add_outline(rect(20.0, 0.0, 30.0, 10.0));
        assert_eq!(poly.touching_outlines(), vec![(0, 1)]);
    }

    #[test]
    fn empty_outlines_make_empty_polygon() {
        let mut poly = Polygon2d::new();
        poly.add_outline(Outline2d::default());
        assert!(poly.is_empty());
    }
}
