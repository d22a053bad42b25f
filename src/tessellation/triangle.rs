use crate::math::{Point3, Vector3, TOLERANCE};

/// A triangle ready for export, with its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Corner positions in winding order.
    pub vertices: [Point3; 3],
    /// Unit normal following the right-hand rule, or [`Triangle::default_normal`]
    /// when the corners are collinear.
    pub normal: Vector3,
}

impl Triangle {
    /// Normal assigned to collinear triangles, whose true normal is undefined.
    #[must_use]
    pub fn default_normal() -> Vector3 {
        Vector3::x()
    }

    /// Builds a triangle from three corners.
    ///
    /// Returns `None` if any two corners coincide.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Option<Self> {
        if coincident(&a, &b) || coincident(&b, &c) || coincident(&a, &c) {
            return None;
        }

        let e1 = b - a;
        let e2 = c - a;
        let cross = e1.cross(&e2);
        let normal = if cross.norm() <= TOLERANCE * e1.norm() * e2.norm() {
            Self::default_normal()
        } else {
            cross.normalize()
        };

        Some(Self {
            vertices: [a, b, c],
            normal,
        })
    }

    /// Returns `true` if the corners lie on one line.
    #[must_use]
    pub fn is_collinear(&self) -> bool {
        let [a, b, c] = self.vertices;
        let e1 = b - a;
        let e2 = c - a;
        e1.cross(&e2).norm() <= TOLERANCE * e1.norm() * e2.norm()
    }

    /// Area of the triangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        0.5 * (b - a).cross(&(c - a)).norm()
    }
}

fn coincident(a: &Point3, b: &Point3) -> bool {
    (a - b).norm() <= TOLERANCE
}
