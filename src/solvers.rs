//! Solvers for Batches

use crate::{batch::BatchDescriptor, solution::Solution};

pub mod backtracking;

/// Trait for resolving the finish of every color in a batch
pub trait Solver {
    /// Resolve the batch to its cheapest satisfying assignment.
    ///
    /// Never fails: a batch nobody can be satisfied in resolves to
    /// [`Solution::NoSolution`].
    fn resolve(batch: &BatchDescriptor) -> Solution;
}
