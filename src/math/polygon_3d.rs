use super::{Point2, Point3, Vector3, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the unit normal of a planar 3D polygon using Newell's method.
///
/// The normal follows the right-hand rule applied to the vertex order.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if the polygon encloses no area.
pub fn newell_normal(points: &[Point3]) -> Result<Vector3> {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    let len = normal.norm();
    if len < TOLERANCE {
        return Err(
            GeometryError::Degenerate("polygon has no area, cannot compute normal".into()).into(),
        );
    }
    Ok(normal / len)
}

/// Returns an orthonormal `(u, v)` basis of the plane with unit normal `normal`.
///
/// The basis satisfies `u × v = normal`, so a loop that is counter-clockwise
/// in `(u, v)` coordinates has `normal` as its right-hand normal.
#[must_use]
pub fn plane_basis(normal: &Vector3) -> (Vector3, Vector3) {
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = normal.cross(&helper).normalize();
    let v = normal.cross(&u);
    (u, v)
}

/// Projects points onto the plane basis `(u, v)` anchored at `origin`.
#[must_use]
pub fn project_to_plane(points: &[Point3], origin: &Point3, u: &Vector3, v: &Vector3) -> Vec<Point2> {
    points
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(u), d.dot(v))
        })
        .collect()
}

/// Returns `true` if every corner of the loop turns the same way as `normal`.
///
/// Straight corners are allowed.
#[must_use]
pub fn is_convex(points: &[Point3], normal: &Vector3) -> bool {
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        if (b - a).cross(&(c - b)).dot(normal) < -TOLERANCE {
            return false;
        }
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn newell_normal_ccw_square_points_up() {
        let pts = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)];
        let n = newell_normal(&pts).unwrap();
        assert!((n - Vector3::z()).norm() < TOLERANCE);
    }

    #[test]
    fn newell_normal_degenerate() {
        let pts = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        assert!(newell_normal(&pts).is_err());
    }

    #[test]
    fn plane_basis_is_right_handed() {
        for normal in [Vector3::x(), Vector3::y(), -Vector3::z(), Vector3::new(1.0, 1.0, 1.0).normalize()] {
            let (u, v) = plane_basis(&normal);
            assert!(u.dot(&normal).abs() < TOLERANCE);
            assert!(v.dot(&normal).abs() < TOLERANCE);
            assert!((u.cross(&v) - normal).norm() < 1e-9);
        }
    }

    #[test]
    fn convexity() {
        let square = vec![p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 2.0, 0.0), p(0.0, 2.0, 0.0)];
        assert!(is_convex(&square, &Vector3::z()));

        let l_shape = vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 1.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(1.0, 2.0, 0.0),
            p(0.0, 2.0, 0.0),
        ];
        assert!(!is_convex(&l_shape, &Vector3::z()));
    }

    #[test]
    fn projection_keeps_orientation() {
        let pts = vec![p(0.0, 0.0, 5.0), p(1.0, 0.0, 5.0), p(0.0, 1.0, 5.0)];
        let normal = newell_normal(&pts).unwrap();
        let (u, v) = plane_basis(&normal);
        let uv = project_to_plane(&pts, &pts[0], &u, &v);
        assert!(crate::math::polygon_2d::signed_area_2d(&uv) > 0.0);
    }
}
