//! Board file input and mesh file output.

pub mod idf;
pub mod stl;

pub use idf::IdfData;
pub use stl::{export_stl, export_stl_with, StlOptions};
