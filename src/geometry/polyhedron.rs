use crate::topology::{SolidId, TopologyStore};

/// A polyhedral solid held as a boundary representation.
///
/// Owns the [`TopologyStore`] its solid lives in. Build one with
/// [`crate::operations::creation::MakePolyhedron`].
#[derive(Debug, Clone)]
pub struct Polyhedron {
    store: TopologyStore,
    solid: SolidId,
}

impl Polyhedron {
    /// Wraps a solid already present in `store`.
    #[must_use]
    pub fn new(store: TopologyStore, solid: SolidId) -> Self {
        Self { store, solid }
    }

    /// The arena holding the solid's entities.
    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    /// The solid's ID within [`Self::store`].
    #[must_use]
    pub fn solid(&self) -> SolidId {
        self.solid
    }

    /// Returns `true` if every shell of the solid is known to have no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Ok(solid) = self.store.solid(self.solid) else {
            return false;
        };
        solid
            .shells()
            .all(|id| self.store.shell(id).is_ok_and(|shell| shell.faces.is_empty()))
    }
}
