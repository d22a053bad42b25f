use crate::math::{Point3, Vector3};

/// A single face: an ordered loop of 3D positions.
pub type Polygon = Vec<Point3>;

/// A polygon mesh stored as independent faces.
///
/// Each face's vertex order encodes its outward side through the right-hand
/// rule. Faces may have any number of vertices; [`crate::tessellation`]
/// reduces them to triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolySet {
    /// The faces of the mesh.
    pub polygons: Vec<Polygon>,
}

impl PolySet {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the mesh has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Number of faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Appends a face.
    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Appends all faces of `other`.
    pub fn append(&mut self, other: &PolySet) {
        self.polygons.extend(other.polygons.iter().cloned());
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: &Vector3) {
        for point in self.polygons.iter_mut().flatten() {
            *point += offset;
        }
    }

    /// Reverses the vertex order of every face, flipping its orientation.
    pub fn reverse_faces(&mut self) {
        for polygon in &mut self.polygons {
            polygon.reverse();
        }
    }
}
