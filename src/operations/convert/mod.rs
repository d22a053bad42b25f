mod polyhedron_to_polyset;

pub use polyhedron_to_polyset::PolyhedronToPolySet;
