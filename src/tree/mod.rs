mod bh_node;
mod bh_tree;
mod traversal;

pub use bh_node::*;
pub use bh_tree::*;
pub use traversal::*;

#[cfg(test)]
mod bh_tree_tests;
#[cfg(test)]
mod traversal_tests;
