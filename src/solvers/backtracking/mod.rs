//! Backtracking Solver

use tracing::{debug, trace};

use crate::{
    batch::BatchDescriptor,
    preferences::{CustomerRequest, Preference},
    solution::{Assignment, FoundSolution, Solution},
    solvers::Solver,
};

pub mod observer;

pub use observer::{NoopObserver, SearchObserver, SearchStats};

/// Depth-first search over customers, minimising the number of matte colors.
///
/// Customers are visited in batch order. A customer the partial assignment
/// already satisfies is passed straight through; otherwise each of their
/// preferences whose color is still free is pinned in turn, the remaining
/// customers are searched, and the pin is undone. Every path that gets past
/// the last customer is a candidate, and a candidate replaces the best one
/// so far only when it has strictly fewer matte colors. The search never
/// stops early, so the first cheapest candidate in exploration order wins.
#[derive(Debug)]
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    /// Resolve a batch while reporting each search step to `observer`.
    ///
    /// The result is identical to [`Solver::resolve`].
    #[tracing::instrument(
        name = "backtracking.resolve",
        skip_all,
        fields(
            colors = batch.color_count(),
            customers = batch.customers().len()
        )
    )]
    pub fn resolve_with_observer(
        batch: &BatchDescriptor,
        observer: &mut dyn SearchObserver,
    ) -> Solution {
        debug!("resolving batch");

        let search = Search::new(batch.customers(), observer);

        let solution = match search.run() {
            Some(best) => Solution::Found(FoundSolution::new(batch.color_count(), best)),
            None => Solution::NoSolution,
        };

        debug!(
            found = solution.is_found(),
            matte = solution.matte_count(),
            "batch resolved"
        );

        solution
    }
}

impl Solver for BacktrackingSolver {
    fn resolve(batch: &BatchDescriptor) -> Solution {
        let mut observer = NoopObserver;

        Self::resolve_with_observer(batch, &mut observer)
    }
}

/// An unsatisfied customer the search is branching on.
#[derive(Debug)]
struct Frame {
    /// Index of the customer in the batch
    customer: usize,

    /// Next preference to try
    cursor: usize,

    /// Preference pinned by the branch currently being explored
    pinned: Option<Preference>,

    /// Candidates reached before this frame was entered
    candidates_at_entry: u64,
}

/// State of one in-flight search.
///
/// Frames live on an explicit stack rather than the call stack, so a batch
/// with very many customers cannot overflow the thread's stack.
struct Search<'b, 'o> {
    customers: &'b [CustomerRequest],
    assignment: Assignment,
    best: Option<Assignment>,
    candidates: u64,
    frames: Vec<Frame>,
    observer: &'o mut dyn SearchObserver,
}

impl<'b, 'o> Search<'b, 'o> {
    fn new(customers: &'b [CustomerRequest], observer: &'o mut dyn SearchObserver) -> Self {
        Self {
            customers,
            assignment: Assignment::new(),
            best: None,
            candidates: 0,
            frames: Vec::with_capacity(customers.len()),
            observer,
        }
    }

    fn run(mut self) -> Option<Assignment> {
        self.enter(0);

        while let Some(frame) = self.frames.last_mut() {
            let customer = frame.customer;

            if let Some(previous) = frame.pinned.take() {
                self.assignment.retract(previous.color());
                self.observer.on_retract(customer, previous);
            }

            let preferences = self
                .customers
                .get(customer)
                .map_or(&[][..], CustomerRequest::preferences);

            let mut next = None;

            for (offset, preference) in preferences.iter().enumerate().skip(frame.cursor) {
                if self.assignment.contains(preference.color()) {
                    self.observer.on_conflict(customer, *preference);
                } else {
                    next = Some((offset, *preference));
                    break;
                }
            }

            if let Some((offset, preference)) = next {
                frame.cursor = offset + 1;
                frame.pinned = Some(preference);

                self.assignment.pin(preference);
                self.observer.on_pin(customer, preference, self.frames.len());

                self.enter(customer + 1);
            } else {
                let exhausted = frame.candidates_at_entry == self.candidates;

                if exhausted {
                    self.observer.on_dead_end(customer);
                }

                self.frames.pop();
            }
        }

        self.best
    }

    /// Move to customer `index`, passing over every customer the partial
    /// assignment already satisfies. Records a candidate when that runs
    /// past the last customer, otherwise opens a frame to branch on.
    fn enter(&mut self, mut index: usize) {
        loop {
            match self.customers.get(index) {
                None => {
                    self.record_candidate();
                    return;
                }
                Some(customer) if customer.is_satisfied_by(&self.assignment) => {
                    self.observer.on_customer_satisfied(index);
                    index += 1;
                }
                Some(_) => {
                    self.frames.push(Frame {
                        customer: index,
                        cursor: 0,
                        pinned: None,
                        candidates_at_entry: self.candidates,
                    });
                    return;
                }
            }
        }
    }

    fn record_candidate(&mut self) {
        self.candidates = self.candidates.saturating_add(1);

        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| self.assignment.matte_cost() < best.matte_cost());

        if improved {
            trace!(
                matte = self.assignment.matte_cost(),
                pinned = self.assignment.len(),
                "new best assignment"
            );

            self.best = Some(self.assignment.clone());
        }

        self.observer.on_candidate(&self.assignment, improved);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        finishes::ColorFinish::{self, Glossy, Matte},
        preferences::PreferenceError,
    };

    use super::*;

    fn batch(
        color_count: usize,
        customers: &[&[Preference]],
    ) -> Result<BatchDescriptor, PreferenceError> {
        let customers = customers
            .iter()
            .map(|preferences| CustomerRequest::new(preferences.iter().copied()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BatchDescriptor::new(color_count, customers))
    }

    fn finishes(solution: &Solution) -> Option<Vec<ColorFinish>> {
        solution
            .found()
            .map(|found| found.finishes().map(|(_, finish)| finish).collect())
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Satisfied(usize),
        Pin(usize, Preference),
        Conflict(usize, Preference),
        Retract(usize, Preference),
        DeadEnd(usize),
        Candidate(usize, bool),
    }

    #[derive(Debug, Default)]
    struct Recorder(Vec<Event>);

    impl SearchObserver for Recorder {
        fn on_customer_satisfied(&mut self, customer: usize) {
            self.0.push(Event::Satisfied(customer));
        }

        fn on_pin(&mut self, customer: usize, preference: Preference, _: usize) {
            self.0.push(Event::Pin(customer, preference));
        }

        fn on_conflict(&mut self, customer: usize, preference: Preference) {
            self.0.push(Event::Conflict(customer, preference));
        }

        fn on_retract(&mut self, customer: usize, preference: Preference) {
            self.0.push(Event::Retract(customer, preference));
        }

        fn on_dead_end(&mut self, customer: usize) {
            self.0.push(Event::DeadEnd(customer));
        }

        fn on_candidate(&mut self, assignment: &Assignment, improved: bool) {
            self.0.push(Event::Candidate(assignment.matte_cost(), improved));
        }
    }

    #[test]
    fn single_matte_request_with_glossy_default() -> TestResult {
        let batch = batch(
            5,
            &[
                &[Preference::matte(1)],
                &[Preference::glossy(1), Preference::glossy(2)],
                &[Preference::glossy(5)],
            ],
        )?;

        let solution = BacktrackingSolver::resolve(&batch);

        assert_eq!(
            finishes(&solution),
            Some(vec![Matte, Glossy, Glossy, Glossy, Glossy])
        );
        assert_eq!(solution.matte_count(), Some(1));

        Ok(())
    }

    #[test]
    fn contradictory_customers_have_no_solution() -> TestResult {
        let batch = batch(2, &[&[Preference::matte(1)], &[Preference::glossy(1)]])?;

        assert_eq!(BacktrackingSolver::resolve(&batch), Solution::NoSolution);

        Ok(())
    }

    #[test]
    fn already_satisfied_customer_is_not_branched_on() -> TestResult {
        let batch = batch(
            2,
            &[
                &[Preference::matte(1)],
                &[Preference::matte(1), Preference::matte(2)],
            ],
        )?;

        let mut stats = SearchStats::default();
        let solution = BacktrackingSolver::resolve_with_observer(&batch, &mut stats);

        assert_eq!(finishes(&solution), Some(vec![Matte, Glossy]));
        assert_eq!(solution.matte_count(), Some(1));
        assert_eq!(stats.pins, 1, "only the first customer should branch");
        assert_eq!(stats.satisfied_skips, 1);
        assert_eq!(stats.candidates, 1);

        Ok(())
    }

    #[test]
    fn later_cheaper_branch_replaces_first_candidate() -> TestResult {
        let batch = batch(
            3,
            &[
                &[Preference::glossy(1), Preference::glossy(3)],
                &[Preference::matte(2), Preference::matte(1)],
                &[Preference::matte(3), Preference::glossy(2)],
            ],
        )?;

        let mut stats = SearchStats::default();
        let solution = BacktrackingSolver::resolve_with_observer(&batch, &mut stats);

        assert_eq!(finishes(&solution), Some(vec![Matte, Glossy, Glossy]));
        assert_eq!(solution.matte_count(), Some(1));
        assert_eq!(stats.candidates, 2);
        assert_eq!(stats.improvements, 2);
        assert_eq!(stats.dead_ends, 1);

        Ok(())
    }

    #[test]
    fn cheaper_alternative_in_last_customer_wins() -> TestResult {
        let batch = batch(
            5,
            &[
                &[Preference::matte(1)],
                &[Preference::glossy(1), Preference::glossy(2)],
                &[Preference::matte(5), Preference::glossy(4)],
            ],
        )?;

        let solution = BacktrackingSolver::resolve(&batch);

        assert_eq!(
            finishes(&solution),
            Some(vec![Matte, Glossy, Glossy, Glossy, Glossy])
        );

        Ok(())
    }

    #[test]
    fn equal_cost_keeps_first_candidate() -> TestResult {
        let batch = batch(
            5,
            &[
                &[Preference::matte(1)],
                &[Preference::glossy(1), Preference::glossy(2)],
                &[Preference::matte(5), Preference::matte(4)],
            ],
        )?;

        let mut recorder = Recorder::default();
        let solution = BacktrackingSolver::resolve_with_observer(&batch, &mut recorder);

        assert_eq!(
            finishes(&solution),
            Some(vec![Matte, Glossy, Glossy, Glossy, Matte])
        );

        let candidates: Vec<_> = recorder
            .0
            .iter()
            .filter(|event| matches!(event, Event::Candidate(..)))
            .collect();

        assert_eq!(
            candidates,
            vec![&Event::Candidate(2, true), &Event::Candidate(2, false)]
        );

        Ok(())
    }

    #[test]
    fn explores_in_preference_order() -> TestResult {
        let batch = batch(
            5,
            &[
                &[Preference::matte(1)],
                &[Preference::glossy(1), Preference::glossy(2)],
                &[Preference::glossy(5)],
            ],
        )?;

        let mut recorder = Recorder::default();
        BacktrackingSolver::resolve_with_observer(&batch, &mut recorder);

        assert_eq!(
            recorder.0,
            vec![
                Event::Pin(0, Preference::matte(1)),
                Event::Conflict(1, Preference::glossy(1)),
                Event::Pin(1, Preference::glossy(2)),
                Event::Pin(2, Preference::glossy(5)),
                Event::Candidate(1, true),
                Event::Retract(2, Preference::glossy(5)),
                Event::Retract(1, Preference::glossy(2)),
                Event::Retract(0, Preference::matte(1)),
            ]
        );

        Ok(())
    }

    #[test]
    fn unsatisfiable_batch_reports_dead_ends() -> TestResult {
        let batch = batch(
            2,
            &[
                &[Preference::matte(1)],
                &[Preference::matte(1), Preference::glossy(2)],
                &[Preference::glossy(1)],
            ],
        )?;

        let mut recorder = Recorder::default();
        let solution = BacktrackingSolver::resolve_with_observer(&batch, &mut recorder);

        assert_eq!(solution, Solution::NoSolution);
        assert_eq!(
            recorder.0,
            vec![
                Event::Pin(0, Preference::matte(1)),
                Event::Satisfied(1),
                Event::Conflict(2, Preference::glossy(1)),
                Event::DeadEnd(2),
                Event::Retract(0, Preference::matte(1)),
                Event::DeadEnd(0),
            ]
        );

        Ok(())
    }

    #[test]
    fn no_customers_resolves_to_all_glossy() {
        let batch = BatchDescriptor::new(3, Vec::new());

        let solution = BacktrackingSolver::resolve(&batch);

        assert_eq!(finishes(&solution), Some(vec![Glossy, Glossy, Glossy]));
        assert_eq!(solution.matte_count(), Some(0));
    }

    #[test]
    fn long_customer_lists_do_not_exhaust_the_stack() -> TestResult {
        let customers = (1..=100_000)
            .map(|color| CustomerRequest::new([Preference::glossy(color)]))
            .collect::<Result<Vec<_>, _>>()?;

        let batch = BatchDescriptor::new(100_000, customers);

        let mut stats = SearchStats::default();
        let solution = BacktrackingSolver::resolve_with_observer(&batch, &mut stats);

        assert_eq!(solution.matte_count(), Some(0));
        assert_eq!(stats.max_depth, 100_000);

        Ok(())
    }

    #[test]
    fn repeated_resolution_is_identical() -> TestResult {
        let batch = batch(
            4,
            &[
                &[Preference::matte(2), Preference::glossy(3)],
                &[Preference::matte(3), Preference::glossy(4)],
                &[Preference::matte(4), Preference::glossy(1)],
                &[Preference::matte(1), Preference::glossy(2)],
            ],
        )?;

        let first = BacktrackingSolver::resolve(&batch);

        for _ in 0..10 {
            assert_eq!(BacktrackingSolver::resolve(&batch), first);
        }

        Ok(())
    }
}
