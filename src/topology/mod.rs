mod entity;

pub use entity::{
    EdgeData, EdgeId, FaceData, FaceId, OrientedEdge, ShellData, ShellId, SolidData, SolidId,
    VertexData, VertexId, WireData, WireId,
};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all topological entities of polyhedral solids.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures.
#[derive(Debug, Clone, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

macro_rules! entity_access {
    ($field:ident, $add:ident, $get:ident, $id:ty, $data:ty, $name:literal) => {
        #[doc = concat!("Inserts a ", $name, " and returns its ID.")]
        pub fn $add(&mut self, data: $data) -> $id {
            self.$field.insert(data)
        }

        #[doc = concat!("Returns the ", $name, " data.")]
        ///
        /// # Errors
        ///
        /// Returns [`TopologyError::EntityNotFound`] if the ID is stale.
        pub fn $get(&self, id: $id) -> Result<&$data, TopologyError> {
            self.$field
                .get(id)
                .ok_or_else(|| TopologyError::EntityNotFound($name.into()))
        }
    };
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    entity_access!(vertices, add_vertex, vertex, VertexId, VertexData, "vertex");
    entity_access!(edges, add_edge, edge, EdgeId, EdgeData, "edge");
    entity_access!(wires, add_wire, wire, WireId, WireData, "wire");
    entity_access!(faces, add_face, face, FaceId, FaceData, "face");
    entity_access!(shells, add_shell, shell, ShellId, ShellData, "shell");
    entity_access!(solids, add_solid, solid, SolidId, SolidData, "solid");

    /// Returns the wire's vertices in traversal order.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] for dangling references and
    /// [`TopologyError::WireNotClosed`] if consecutive edges do not connect or
    /// the last edge does not return to the first vertex.
    pub fn wire_vertices(&self, id: WireId) -> Result<Vec<VertexId>, TopologyError> {
        let wire = self.wire(id)?;
        let mut ends = Vec::with_capacity(wire.edges.len());
        for oe in &wire.edges {
            let edge = self.edge(oe.edge)?;
            ends.push(if oe.forward {
                (edge.start, edge.end)
            } else {
                (edge.end, edge.start)
            });
        }

        for (i, &(_, to)) in ends.iter().enumerate() {
            let (next_from, _) = ends[(i + 1) % ends.len()];
            if to != next_from {
                return Err(TopologyError::WireNotClosed);
            }
        }

        Ok(ends.into_iter().map(|(from, _)| from).collect())
    }
}
