//! Paint Shop prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    batch::{BatchDescriptor, BatchError},
    finishes::{ColorFinish, FinishError},
    fixtures::{Fixture, FixtureBatch, FixtureError},
    input::{InputError, parse_batches},
    preferences::{CustomerRequest, Preference, PreferenceError},
    report::{CaseReport, IMPOSSIBLE, Report, ReportError, solution_line},
    solution::{Assignment, FoundSolution, Solution},
    solvers::{
        Solver,
        backtracking::{BacktrackingSolver, NoopObserver, SearchObserver, SearchStats},
    },
};
