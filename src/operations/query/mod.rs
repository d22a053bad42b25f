mod is_manifold;
mod volume;

pub use is_manifold::IsManifold;
pub use volume::Volume;
