//! Medley Extract
//!
//! Depth-first traversal over workflow step trees and extraction of the
//! downstream resources a set of definitions depends on: SIMPLE task
//! definition names and HUMAN form template references.

mod deps;
mod walk;

pub use deps::Dependencies;
pub use walk::{Walk, walk};
