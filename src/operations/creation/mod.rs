mod make_box;
mod make_polyhedron;

pub use make_box::MakeBox;
pub use make_polyhedron::MakePolyhedron;
