pub mod outline;
pub mod polyhedron;
pub mod polyset;

pub use outline::{Outline2d, Polygon2d};
pub use polyhedron::Polyhedron;
pub use polyset::PolySet;

/// A geometric model handed to the exporters.
///
/// Composite models nest through [`Geometry::List`]; every other variant is
/// a leaf.
#[derive(Debug, Clone)]
pub enum Geometry {
    /// An ordered collection of child geometries.
    List(Vec<Geometry>),
    /// A polyhedral boundary representation.
    Polyhedron(Polyhedron),
    /// A plain polygon mesh.
    Mesh(PolySet),
    /// A flat 2D polygon set.
    Polygon(Polygon2d),
}

impl Geometry {
    /// Returns a short name for the variant, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::List(_) => "geometry list",
            Self::Polyhedron(_) => "polyhedron",
            Self::Mesh(_) => "mesh",
            Self::Polygon(_) => "2D polygon",
        }
    }

    /// Returns `true` if the geometry contains no faces or outlines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(children) => children.iter().all(Geometry::is_empty),
            Self::Polyhedron(poly) => poly.is_empty(),
            Self::Mesh(mesh) => mesh.is_empty(),
            Self::Polygon(polygon) => polygon.is_empty(),
        }
    }
}

impl From<PolySet> for Geometry {
    fn from(mesh: PolySet) -> Self {
        Self::Mesh(mesh)
    }
}

impl From<Polyhedron> for Geometry {
    fn from(poly: Polyhedron) -> Self {
        Self::Polyhedron(poly)
    }
}

impl From<Polygon2d> for Geometry {
    fn from(polygon: Polygon2d) -> Self {
        Self::Polygon(polygon)
    }
}
