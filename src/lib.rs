pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use error::{BoardsolidError, Result};
