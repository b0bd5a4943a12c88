//! Report
//!
//! Case-numbered rendering of batch solutions. Each batch becomes one line,
//! `Case #N: <finish codes>` with the finish of every color in color order,
//! or `Case #N: IMPOSSIBLE` when the batch has no solution. Cases are
//! numbered from 1 in the order they were resolved.

use std::{fmt, io};

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::solution::Solution;

/// Literal reported for a batch with no solution.
pub const IMPOSSIBLE: &str = "IMPOSSIBLE";

/// Errors writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// The finish codes of a solution, space separated, or [`IMPOSSIBLE`].
pub fn solution_line(solution: &Solution) -> String {
    match solution.found() {
        Some(found) => found
            .finishes()
            .map(|(_, finish)| finish.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        None => IMPOSSIBLE.to_string(),
    }
}

/// One numbered case of a report.
#[derive(Debug, Clone, Copy)]
pub struct CaseReport<'a> {
    case: usize,
    solution: &'a Solution,
}

impl<'a> CaseReport<'a> {
    /// Create a report line for case number `case` (1-based).
    pub fn new(case: usize, solution: &'a Solution) -> Self {
        Self { case, solution }
    }

    /// The 1-based case number.
    pub fn case(&self) -> usize {
        self.case
    }

    /// The reported solution.
    pub fn solution(&self) -> &'a Solution {
        self.solution
    }
}

impl fmt::Display for CaseReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Case #{}: {}", self.case, solution_line(self.solution))
    }
}

/// Solutions of a run, reported in the order they were pushed.
#[derive(Debug, Clone, Default)]
pub struct Report {
    solutions: Vec<Solution>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next case.
    pub fn push(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether the report has no cases.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Cases, numbered from 1.
    pub fn cases(&self) -> impl Iterator<Item = CaseReport<'_>> {
        self.solutions
            .iter()
            .enumerate()
            .map(|(index, solution)| CaseReport::new(index + 1, solution))
    }

    /// Write one `Case #N: ...` line per case.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        for case in self.cases() {
            writeln!(out, "{case}")?;
        }

        Ok(())
    }

    /// Write the cases as a table with the matte count of each solution.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if writing fails.
    pub fn write_table(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["Case", "Finishes", "Matte"]);

        for case in self.cases() {
            let matte = case
                .solution()
                .matte_count()
                .map_or_else(|| "-".to_string(), |matte| matte.to_string());

            builder.push_record([
                format!("#{}", case.case()),
                solution_line(case.solution()),
                matte,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::last(), Alignment::right());

        writeln!(out, "{table}")?;

        Ok(())
    }
}

impl FromIterator<Solution> for Report {
    fn from_iter<I: IntoIterator<Item = Solution>>(iter: I) -> Self {
        Self {
            solutions: iter.into_iter().collect(),
        }
    }
}
