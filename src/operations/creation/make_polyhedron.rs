use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::geometry::Polyhedron;
use crate::math::Point3;
use crate::topology::{
    EdgeData, EdgeId, FaceData, OrientedEdge, ShellData, SolidData, TopologyStore, VertexData,
    VertexId, WireData,
};

/// Creates a polyhedral solid from a point list and faces given as index
/// loops into it.
///
/// Faces sharing a pair of points share one edge, so the result carries the
/// connectivity needed for manifold checks.
pub struct MakePolyhedron {
    points: Vec<Point3>,
    faces: Vec<Vec<usize>>,
}

impl MakePolyhedron {
    /// Creates a new `MakePolyhedron` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, faces: Vec<Vec<usize>>) -> Self {
        Self { points, faces }
    }

    /// Executes the operation, returning the new solid with its own store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if a face has fewer than 3
    /// indices or refers to a point that does not exist.
    pub fn execute(&self) -> Result<Polyhedron> {
        for (i, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(OperationError::InvalidInput(format!(
                    "face {i} has {} indices, needs at least 3",
                    face.len()
                ))
                .into());
            }
            if let Some(&bad) = face.iter().find(|&&idx| idx >= self.points.len()) {
                return Err(OperationError::InvalidInput(format!(
                    "face {i} refers to point {bad}, only {} points given",
                    self.points.len()
                ))
                .into());
            }
        }

        let mut store = TopologyStore::new();
        let vertices: Vec<VertexId> = self
            .points
            .iter()
            .map(|&point| store.add_vertex(VertexData { point }))
            .collect();

        let mut edges: HashMap<(usize, usize), EdgeId> = HashMap::new();
        let mut shell = ShellData::default();

        for face in &self.faces {
            let mut wire = WireData::default();
            for (k, &from) in face.iter().enumerate() {
                let to = face[(k + 1) % face.len()];
                let key = (from.min(to), from.max(to));
                let edge = *edges.entry(key).or_insert_with(|| {
                    store.add_edge(EdgeData {
                        start: vertices[key.0],
                        end: vertices[key.1],
                    })
                });
                wire.edges.push(OrientedEdge::new(edge, from <= to));
            }
            let wire = store.add_wire(wire);
            shell.faces.push(store.add_face(FaceData { wire }));
        }

        let outer_shell = store.add_shell(shell);
        let solid = store.add_solid(SolidData {
            outer_shell,
            inner_shells: Vec::new(),
        });

        Ok(Polyhedron::new(store, solid))
    }
}
