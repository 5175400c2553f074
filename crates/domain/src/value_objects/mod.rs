//! Value objects shared by several entities.

mod money;

pub use money::Cost;
