use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use crate::error::{Result, TessellationError};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates the region enclosed by a set of closed loops under the
/// even-odd rule.
///
/// Returns counter-clockwise index triples into the loops' points taken in
/// order, as if all loops were concatenated.
///
/// # Errors
///
/// Returns [`TessellationError::Failed`] if a loop has fewer than 3 points,
/// a coordinate cannot be inserted, or two loop edges cross.
pub(crate) fn triangulate_loops(loops: &[Vec<Point2>]) -> Result<Vec<[usize; 3]>> {
    let mut cdt = Cdt::new();
    let mut flat_index: HashMap<usize, usize> = HashMap::new();
    let mut positions = Vec::new();

    for points in loops {
        let offset = positions.len();
        positions.extend_from_slice(points);
        insert_constraint_loop(&mut cdt, points, offset, &mut flat_index)?;
    }

    let interior_faces = classify_interior_faces(&cdt);

    let mut triangles = Vec::with_capacity(interior_faces.len());
    for face in cdt.inner_faces() {
        if !interior_faces.contains(&face.fix().index()) {
            continue;
        }
        let mut tri = [0usize; 3];
        for (slot, vh) in tri.iter_mut().zip(face.vertices()) {
            *slot = flat_index
                .get(&vh.fix().index())
                .copied()
                .ok_or_else(|| TessellationError::Failed("CDT created an unknown vertex".into()))?;
        }
        let corners = [positions[tri[0]], positions[tri[1]], positions[tri[2]]];
        if signed_area_2d(&corners) < 0.0 {
            tri.swap(1, 2);
        }
        triangles.push(tri);
    }

    Ok(triangles)
}

/// Inserts a closed loop as constraint edges into the CDT.
fn insert_constraint_loop(
    cdt: &mut Cdt,
    points: &[Point2],
    offset: usize,
    flat_index: &mut HashMap<usize, usize>,
) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles: Vec<FixedVertexHandle> = Vec::with_capacity(points.len());
    for (i, pt) in points.iter().enumerate() {
        let h = cdt
            .insert(SpadePoint2::new(pt.x, pt.y))
            .map_err(|e| TessellationError::Failed(format!("CDT insert: {e}")))?;
        flat_index.entry(h.index()).or_insert(offset + i);
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed("outline edges intersect".into()).into());
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Classifies which inner faces of the CDT are inside the loops using flood-fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0. Each time
/// a constraint edge is crossed, depth increments. Odd depth = interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let n_idx = neighbor.fix().index();
            if depth_map.contains_key(&n_idx) {
                continue;
            }
            let new_depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(n_idx, new_depth);
            if new_depth % 2 == 1 {
                interior.insert(n_idx);
            }
            queue.push_back((neighbor.fix(), new_depth));
        }
    }

    interior
}
