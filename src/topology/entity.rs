use crate::math::Point3;

slotmap::new_key_type! {
    /// Handle to a vertex in a [`super::TopologyStore`].
    pub struct VertexId;
    /// Handle to an edge in a [`super::TopologyStore`].
    pub struct EdgeId;
    /// Handle to a wire in a [`super::TopologyStore`].
    pub struct WireId;
    /// Handle to a face in a [`super::TopologyStore`].
    pub struct FaceId;
    /// Handle to a shell in a [`super::TopologyStore`].
    pub struct ShellId;
    /// Handle to a solid in a [`super::TopologyStore`].
    pub struct SolidId;
}

/// A point shared by the edges that meet there.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub point: Point3,
}

/// A straight edge between two vertices.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexId,
    pub end: VertexId,
}

/// An edge used by a wire, possibly against its natural direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedEdge {
    pub edge: EdgeId,
    /// `true` when the wire runs start → end.
    pub forward: bool,
}

impl OrientedEdge {
    #[must_use]
    pub fn new(edge: EdgeId, forward: bool) -> Self {
        Self { edge, forward }
    }
}

/// A closed chain of oriented edges bounding a face.
#[derive(Debug, Clone, Default)]
pub struct WireData {
    pub edges: Vec<OrientedEdge>,
}

/// A planar face bounded by one wire. The wire's direction gives the
/// outward normal by the right-hand rule.
#[derive(Debug, Clone)]
pub struct FaceData {
    pub wire: WireId,
}

/// A connected set of faces.
#[derive(Debug, Clone, Default)]
pub struct ShellData {
    pub faces: Vec<FaceId>,
}

/// A volume bounded by an outer shell and optional void shells.
#[derive(Debug, Clone)]
pub struct SolidData {
    pub outer_shell: ShellId,
    pub inner_shells: Vec<ShellId>,
}

impl SolidData {
    /// All shells, outer first.
    pub fn shells(&self) -> impl Iterator<Item = ShellId> + '_ {
        std::iter::once(self.outer_shell).chain(self.inner_shells.iter().copied())
    }
}
