//! Search Observer

use crate::{preferences::Preference, solution::Assignment};

/// Observer trait for following the backtracking search as it runs.
///
/// Callbacks fire at each decision point of the search, in exploration
/// order, so an observer can reconstruct the search tree, count nodes, or
/// trace why a batch turned out to be unsatisfiable. Observers are purely
/// passive: nothing they do can change the result.
///
/// When no observer is needed the solver uses [`NoopObserver`].
pub trait SearchObserver {
    /// Called when a customer is skipped because the partial assignment
    /// already satisfies them. No branching happens for that customer.
    ///
    /// # Parameters
    ///
    /// - `customer`: Index of the customer in the batch
    fn on_customer_satisfied(&mut self, _customer: usize) {}

    /// Called when a preference is tentatively pinned.
    ///
    /// # Parameters
    ///
    /// - `customer`: Index of the customer being satisfied
    /// - `preference`: The pinned preference
    /// - `depth`: Number of tentative pins on the current path, this one included
    fn on_pin(&mut self, customer: usize, preference: Preference, depth: usize);

    /// Called when a preference cannot be tried because its color is already
    /// pinned to the other finish.
    fn on_conflict(&mut self, _customer: usize, _preference: Preference) {}

    /// Called when a tentative pin is undone.
    fn on_retract(&mut self, _customer: usize, _preference: Preference) {}

    /// Called when every branch for an unsatisfied customer has been tried
    /// and none of them led to a satisfying assignment.
    fn on_dead_end(&mut self, _customer: usize) {}

    /// Called when the path reaches past the last customer.
    ///
    /// # Parameters
    ///
    /// - `assignment`: The satisfying partial assignment
    /// - `improved`: Whether it replaced the best assignment so far
    fn on_candidate(&mut self, assignment: &Assignment, improved: bool);
}

/// No-op observer for unobserved searches.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_pin(&mut self, _: usize, _: Preference, _: usize) {}

    fn on_candidate(&mut self, _: &Assignment, _: bool) {}
}

/// Counters collected over one search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Customers skipped because they were already satisfied.
    pub satisfied_skips: u64,

    /// Tentative pins made.
    pub pins: u64,

    /// Preferences skipped because their color held the other finish.
    pub conflicts: u64,

    /// Unsatisfied customers whose every branch failed.
    pub dead_ends: u64,

    /// Satisfying assignments reached.
    pub candidates: u64,

    /// Candidates that became the new best assignment.
    pub improvements: u64,

    /// Deepest path, in tentative pins.
    pub max_depth: usize,
}

impl SearchObserver for SearchStats {
    fn on_customer_satisfied(&mut self, _: usize) {
        self.satisfied_skips = self.satisfied_skips.saturating_add(1);
    }

    fn on_pin(&mut self, _: usize, _: Preference, depth: usize) {
        self.pins = self.pins.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    fn on_conflict(&mut self, _: usize, _: Preference) {
        self.conflicts = self.conflicts.saturating_add(1);
    }

    fn on_dead_end(&mut self, _: usize) {
        self.dead_ends = self.dead_ends.saturating_add(1);
    }

    fn on_candidate(&mut self, _: &Assignment, improved: bool) {
        self.candidates = self.candidates.saturating_add(1);

        if improved {
            self.improvements = self.improvements.saturating_add(1);
        }
    }
}
