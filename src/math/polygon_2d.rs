use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed 2D polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Point-in-polygon test using the winding number algorithm.
///
/// Returns `true` if the winding number of `point` with respect to the
/// closed loop `polygon` is non-zero.
#[must_use]
pub fn point_in_polygon_2d(point: &Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    winding_number_2d(point, polygon) != 0
}

fn winding_number_2d(p: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];

        if a.y <= p.y {
            if b.y > p.y && cross_2d(&a, &b, p) > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && cross_2d(&a, &b, p) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Returns `true` if `point` lies on an edge of the closed loop `polygon`,
/// within [`TOLERANCE`].
#[must_use]
pub fn point_on_loop_2d(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    (0..n).any(|i| {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let ab = b - a;
        let len_sq = ab.norm_squared();
        let t = if len_sq < TOLERANCE * TOLERANCE {
            0.0
        } else {
            ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
        };
        (point - (a + ab * t)).norm() < TOLERANCE
    })
}

/// 2D cross product of `(b - a)` and `(p - a)`.
#[inline]
fn cross_2d(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Removes consecutive duplicate points, including a trailing point that
/// repeats the first one.
#[must_use]
pub fn dedup_closed_loop(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &pt in points {
        if out.last().is_some_and(|last| (pt - last).norm() < TOLERANCE) {
            continue;
        }
        out.push(pt);
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() < TOLERANCE {
        out.pop();
    }
    out
}
