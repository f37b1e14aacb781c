mod bh_simulation;
mod scenario;

pub use bh_simulation::*;
pub use scenario::*;
