use crate::error::{ConversionError, TopologyError};
use crate::geometry::PolySet;
use crate::math::Point3;
use crate::topology::{SolidId, TopologyStore};

/// Flattens a polyhedral solid into a plain polygon mesh.
///
/// Faces keep the winding of their boundary wires. Faces of void shells are
/// included as they are.
pub struct PolyhedronToPolySet {
    solid: SolidId,
}

impl PolyhedronToPolySet {
    /// Creates a new `PolyhedronToPolySet` operation.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the conversion.
    ///
    /// Nothing partial is returned: any bad face fails the whole solid.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] describing the first face whose boundary
    /// cannot be followed, or a dangling entity reference.
    pub fn execute(&self, store: &TopologyStore) -> Result<PolySet, ConversionError> {
        let solid = store.solid(self.solid)?;
        let mut mesh = PolySet::new();

        for shell_id in solid.shells() {
            for &face_id in &store.shell(shell_id)?.faces {
                let face = mesh.len();
                let wire = store.face(face_id)?.wire;
                let vertices = match store.wire_vertices(wire) {
                    Ok(vertices) => vertices,
                    Err(TopologyError::WireNotClosed) => {
                        return Err(ConversionError::BrokenLoop { face })
                    }
                    Err(err) => return Err(err.into()),
                };
                if vertices.len() < 3 {
                    return Err(ConversionError::TooFewVertices {
                        face,
                        vertices: vertices.len(),
                    });
                }
                let polygon = vertices
                    .into_iter()
                    .map(|id| store.vertex(id).map(|v| v.point))
                    .collect::<Result<Vec<Point3>, TopologyError>>()?;
                mesh.push(polygon);
            }
        }

        Ok(mesh)
    }
}
