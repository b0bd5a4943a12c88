//! Preferences

use smallvec::SmallVec;
use thiserror::Error;

use crate::{finishes::ColorFinish, solution::Assignment};

/// Errors constructing customer requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreferenceError {
    /// A customer must ask for at least one (color, finish) pair.
    #[error("a customer must have at least one color preference")]
    Empty,
}

/// A (color, finish) pair a customer is happy to receive.
///
/// Color numbers are 1-based. Range checks against a batch's color count
/// belong to whoever builds the batch, see
/// [`BatchDescriptor::try_new`](crate::batch::BatchDescriptor::try_new).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Preference {
    color: usize,
    finish: ColorFinish,
}

impl Preference {
    /// Create a new preference for `color` in `finish`.
    pub const fn new(color: usize, finish: ColorFinish) -> Self {
        Self { color, finish }
    }

    /// Shorthand for a glossy preference.
    pub const fn glossy(color: usize) -> Self {
        Self::new(color, ColorFinish::Glossy)
    }

    /// Shorthand for a matte preference.
    pub const fn matte(color: usize) -> Self {
        Self::new(color, ColorFinish::Matte)
    }

    /// The 1-based color number.
    pub const fn color(&self) -> usize {
        self.color
    }

    /// The requested finish.
    pub const fn finish(&self) -> ColorFinish {
        self.finish
    }
}

/// Ordered, non-empty list of preferences belonging to one customer.
///
/// The order is the order the resolution engine branches in, so it decides
/// which of several equally cheap assignments wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerRequest {
    preferences: SmallVec<[Preference; 4]>,
}

impl CustomerRequest {
    /// Create a customer request from its preferences.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Empty`] if no preferences were given.
    pub fn new(preferences: impl IntoIterator<Item = Preference>) -> Result<Self, PreferenceError> {
        let preferences: SmallVec<[Preference; 4]> = preferences.into_iter().collect();

        if preferences.is_empty() {
            return Err(PreferenceError::Empty);
        }

        Ok(Self { preferences })
    }

    /// The preferences, in the order the customer gave them.
    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    /// Iterate over the preferences in order.
    pub fn iter(&self) -> impl Iterator<Item = &Preference> {
        self.preferences.iter()
    }

    /// Number of preferences.
    pub fn len(&self) -> usize {
        self.preferences.len()
    }

    /// Whether there are no preferences. Never true once constructed.
    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty()
    }

    /// Whether `assignment` already holds one of this customer's pairs.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.preferences
            .iter()
            .any(|preference| assignment.satisfies(preference))
    }
}

impl<'a> IntoIterator for &'a CustomerRequest {
    type Item = &'a Preference;
    type IntoIter = std::slice::Iter<'a, Preference>;

    fn into_iter(self) -> Self::IntoIter {
        self.preferences.iter()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn preferences_compare_structurally() {
        assert_eq!(Preference::matte(1), Preference::new(1, ColorFinish::Matte));
        assert_ne!(Preference::matte(1), Preference::glossy(1));
        assert_ne!(Preference::matte(1), Preference::matte(2));
    }

    #[test]
    fn empty_customer_is_rejected() {
        assert_eq!(
            CustomerRequest::new([]),
            Err(PreferenceError::Empty),
            "a customer without preferences must never reach the solver"
        );
    }

    #[test]
    fn keeps_preference_order() -> TestResult {
        let customer = CustomerRequest::new([Preference::matte(2), Preference::glossy(5)])?;

        assert_eq!(customer.len(), 2);
        assert_eq!(
            customer.preferences(),
            &[Preference::matte(2), Preference::glossy(5)]
        );

        Ok(())
    }

    #[test]
    fn satisfied_only_by_matching_pair() -> TestResult {
        let customer = CustomerRequest::new([Preference::glossy(1), Preference::matte(3)])?;
        let mut assignment = Assignment::new();

        assert!(!customer.is_satisfied_by(&assignment));

        assignment.pin(Preference::matte(1));
        assert!(!customer.is_satisfied_by(&assignment));

        assignment.pin(Preference::matte(3));
        assert!(customer.is_satisfied_by(&assignment));

        Ok(())
    }
}
