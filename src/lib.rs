//! Graphlet and orbit counting through decision trees.

pub mod data;
pub mod equation;
pub mod executor;
pub mod pattern;
pub mod task;
pub mod tree;

pub(crate) mod tools;
