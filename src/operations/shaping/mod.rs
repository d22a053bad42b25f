mod linear_extrude;

pub use linear_extrude::LinearExtrude;
