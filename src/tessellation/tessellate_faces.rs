use tracing::debug;

use crate::geometry::PolySet;
use crate::math::polygon_3d::{is_convex, newell_normal, plane_basis, project_to_plane};
use crate::math::Point3;

use super::triangle::Triangle;
use super::triangulate::triangulate_loops;

/// Splits one face into corner triples that keep the face's winding.
///
/// Convex and zero-area faces are fanned from their first vertex; concave
/// faces are triangulated on their own plane. Faces with fewer than 3
/// vertices produce nothing.
#[must_use]
pub fn triangulate_face(face: &[Point3]) -> Vec<[Point3; 3]> {
    match face.len() {
        0..=2 => return Vec::new(),
        3 => return vec![[face[0], face[1], face[2]]],
        _ => {}
    }

    let Ok(normal) = newell_normal(face) else {
        return fan(face);
    };
    if is_convex(face, &normal) {
        return fan(face);
    }

    let (u, v) = plane_basis(&normal);
    let uv = project_to_plane(face, &face[0], &u, &v);
    match triangulate_loops(&[uv]) {
        Ok(tris) => tris
            .into_iter()
            .map(|[a, b, c]| [face[a], face[b], face[c]])
            .collect(),
        Err(err) => {
            debug!(%err, vertices = face.len(), "concave face fell back to a fan");
            fan(face)
        }
    }
}

fn fan(face: &[Point3]) -> Vec<[Point3; 3]> {
    (1..face.len() - 1)
        .map(|i| [face[0], face[i], face[i + 1]])
        .collect()
}

/// Streams the exportable triangles of a mesh, one face at a time.
///
/// Triangles with coincident corners are dropped.
pub fn mesh_triangles(mesh: &PolySet) -> impl Iterator<Item = Triangle> + '_ {
    mesh.polygons
        .iter()
        .map(Vec::as_slice)
        .flat_map(triangulate_face)
        .filter_map(|[a, b, c]| Triangle::new(a, b, c))
}
