use std::collections::HashMap;

use crate::error::{Result, TopologyError};
use crate::topology::{EdgeId, SolidId, TopologyStore};

/// Checks whether a polyhedral solid is a simple closed 2-manifold.
///
/// Every face boundary must be a closed loop, and every edge must be used
/// exactly twice, once in each direction.
pub struct IsManifold {
    solid: SolidId,
}

impl IsManifold {
    /// Creates a new `IsManifold` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid refers to entities missing from `store`.
    pub fn execute(&self, store: &TopologyStore) -> Result<bool> {
        let solid = store.solid(self.solid)?;
        // (forward uses, reverse uses)
        let mut uses: HashMap<EdgeId, (u32, u32)> = HashMap::new();

        for shell_id in solid.shells() {
            for &face_id in &store.shell(shell_id)?.faces {
                let wire_id = store.face(face_id)?.wire;
                match store.wire_vertices(wire_id) {
                    Ok(_) => {}
                    Err(TopologyError::WireNotClosed) => return Ok(false),
                    Err(err) => return Err(err.into()),
                }
                for oe in &store.wire(wire_id)?.edges {
                    let count = uses.entry(oe.edge).or_default();
                    if oe.forward {
                        count.0 += 1;
                    } else {
                        count.1 += 1;
                    }
                }
            }
        }

        Ok(uses.values().all(|&(fwd, rev)| fwd == 1 && rev == 1))
    }
}
