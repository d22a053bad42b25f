pub mod convert;
pub mod creation;
pub mod query;
pub mod shaping;
