mod verlet;

pub use verlet::*;

#[cfg(test)]
mod verlet_tests;
