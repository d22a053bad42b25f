mod tessellate_faces;
mod tessellate_polygon;
mod triangle;
mod triangulate;

pub use tessellate_faces::{mesh_triangles, triangulate_face};
pub use tessellate_polygon::TessellatePolygon;
pub use triangle::Triangle;
