//! A 2D N-body simulation core built around an arena-backed Barnes-Hut quadtree.
//!
//! Bodies live in a caller-owned array. Every tick a quadtree of body
//! indices is rebuilt in a bump [`arena::Arena`], then walked to integrate,
//! keep bodies inside the domain, resolve collisions between nearby circles,
//! and accumulate gravity.
pub mod utils;
pub mod errors;
pub mod models;
pub mod arena;
pub mod tree;
pub mod forces;
pub mod interactions;
pub mod integrator;
pub mod simulation;

/// ### General helper function
/// - Asserts that two floating point numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
/// # Panics
///
/// Panics when `|a - b| >= epsilon`, or when either value is NaN.
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64, optional_message: Option<&str>) {
    let close = (a - b).abs() < epsilon;
    match optional_message {
        Some(message) => assert!(close, "{}: {} is not within {} of {}", message, a, epsilon, b),
        None => assert!(close, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}
