mod forces_2d;
mod energy;

pub use forces_2d::*;
pub use energy::*;
