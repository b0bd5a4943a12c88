//! Solutions
//!
//! [`Assignment`] is the partial color -> finish mapping the resolution
//! engine grows and shrinks while it searches. [`Solution`] is what the
//! engine hands back, and is everything a report needs: whether the batch
//! can be satisfied and, if so, the finish of every color in the batch.

use rustc_hash::FxHashMap;

use crate::{finishes::ColorFinish, preferences::Preference};

/// Partial mapping from color number to finish.
///
/// A color holds at most one finish at a time: [`Assignment::pin`] never
/// overwrites, a pinned color has to be [`retract`](Assignment::retract)ed
/// first. The matte cost is maintained incrementally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    finishes: FxHashMap<usize, ColorFinish>,
    matte: usize,
}

impl Assignment {
    /// Create an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the preference's color to its finish.
    ///
    /// Returns `false` and leaves the assignment untouched when the color is
    /// already pinned, whatever finish it holds.
    pub fn pin(&mut self, preference: Preference) -> bool {
        if self.finishes.contains_key(&preference.color()) {
            return false;
        }

        self.finishes.insert(preference.color(), preference.finish());
        self.matte += preference.finish().matte_cost();

        true
    }

    /// Remove a pinned color, returning the finish it held.
    pub fn retract(&mut self, color: usize) -> Option<ColorFinish> {
        let finish = self.finishes.remove(&color)?;

        self.matte -= finish.matte_cost();

        Some(finish)
    }

    /// The finish pinned for `color`, if any.
    pub fn get(&self, color: usize) -> Option<ColorFinish> {
        self.finishes.get(&color).copied()
    }

    /// Whether `color` is pinned.
    pub fn contains(&self, color: usize) -> bool {
        self.finishes.contains_key(&color)
    }

    /// Whether this assignment holds exactly the preferred pair.
    pub fn satisfies(&self, preference: &Preference) -> bool {
        self.get(preference.color()) == Some(preference.finish())
    }

    /// The finish of `color`, defaulting to glossy when it is not pinned.
    pub fn finish(&self, color: usize) -> ColorFinish {
        self.get(color).unwrap_or_default()
    }

    /// Number of pinned colors that are matte.
    pub fn matte_cost(&self) -> usize {
        self.matte
    }

    /// Number of pinned colors.
    pub fn len(&self) -> usize {
        self.finishes.len()
    }

    /// Whether no color is pinned.
    pub fn is_empty(&self) -> bool {
        self.finishes.is_empty()
    }

    /// Pinned `(color, finish)` pairs, in ascending color order.
    pub fn pinned(&self) -> Vec<(usize, ColorFinish)> {
        let mut pinned: Vec<_> = self
            .finishes
            .iter()
            .map(|(color, finish)| (*color, *finish))
            .collect();

        pinned.sort_unstable_by_key(|(color, _)| *color);

        pinned
    }
}

/// Satisfying assignment for a batch of `color_count` colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundSolution {
    color_count: usize,
    assignment: Assignment,
}

impl FoundSolution {
    /// Wrap a satisfying assignment.
    pub fn new(color_count: usize, assignment: Assignment) -> Self {
        Self {
            color_count,
            assignment,
        }
    }

    /// Number of colors in the batch.
    pub fn color_count(&self) -> usize {
        self.color_count
    }

    /// Finish of `color`. Colors the search never pinned are glossy.
    pub fn finish(&self, color: usize) -> ColorFinish {
        self.assignment.finish(color)
    }

    /// `(color, finish)` for every color `1..=color_count`, in order.
    pub fn finishes(&self) -> impl Iterator<Item = (usize, ColorFinish)> + '_ {
        (1..=self.color_count).map(|color| (color, self.finish(color)))
    }

    /// Number of matte colors.
    pub fn matte_count(&self) -> usize {
        self.assignment.matte_cost()
    }

    /// The colors the search actually pinned.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }
}

/// Outcome of resolving a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Solution {
    /// No assignment satisfies every customer.
    NoSolution,

    /// The cheapest satisfying assignment found.
    Found(FoundSolution),
}

impl Solution {
    /// Whether a satisfying assignment exists.
    pub fn is_found(&self) -> bool {
        matches!(self, Solution::Found(_))
    }

    /// The satisfying assignment, if any.
    pub fn found(&self) -> Option<&FoundSolution> {
        match self {
            Solution::Found(found) => Some(found),
            Solution::NoSolution => None,
        }
    }

    /// Number of matte colors, if a solution exists.
    pub fn matte_count(&self) -> Option<usize> {
        self.found().map(FoundSolution::matte_count)
    }

    /// Finish of `color`, if a solution exists.
    pub fn finish(&self, color: usize) -> Option<ColorFinish> {
        self.found().map(|found| found.finish(color))
    }
}
