mod boundaries;
mod collisions_2d;

pub use boundaries::*;
pub use collisions_2d::*;
