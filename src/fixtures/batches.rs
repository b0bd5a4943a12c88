//! Batch Fixtures

use serde::Deserialize;

use crate::{
    batch::BatchDescriptor,
    finishes::ColorFinish,
    fixtures::FixtureError,
    preferences::{CustomerRequest, Preference},
};

/// Wrapper for batches in YAML
#[derive(Debug, Deserialize)]
pub struct BatchesFixture {
    /// Batches, in case order
    pub batches: Vec<BatchFixture>,
}

/// Batch fixture from YAML
#[derive(Debug, Deserialize)]
pub struct BatchFixture {
    /// Optional human-readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Number of colors in the batch
    pub colors: usize,

    /// One list of preferences per customer
    pub customers: Vec<Vec<PreferenceFixture>>,

    /// Expected report line for the batch, e.g. `"1 0 0"` or `"IMPOSSIBLE"`
    #[serde(default)]
    pub expected: Option<String>,
}

/// Preference fixture from YAML
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PreferenceFixture {
    /// 1-based color number
    pub color: usize,

    /// Requested finish (`glossy` or `matte`)
    pub finish: ColorFinish,
}

impl From<PreferenceFixture> for Preference {
    fn from(fixture: PreferenceFixture) -> Self {
        Preference::new(fixture.color, fixture.finish)
    }
}

impl BatchFixture {
    /// Convert to a checked [`BatchDescriptor`].
    ///
    /// `index` is the batch's position in the fixture file and only used for
    /// error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if a customer has no preferences or the batch is invalid.
    pub fn try_into_batch(self, index: usize) -> Result<BatchDescriptor, FixtureError> {
        let customers = self
            .customers
            .into_iter()
            .enumerate()
            .map(|(customer, preferences)| {
                CustomerRequest::new(preferences.into_iter().map(Preference::from)).map_err(
                    |source| FixtureError::Preference {
                        batch: index,
                        customer,
                        source,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        BatchDescriptor::try_new(self.colors, customers).map_err(|source| FixtureError::Batch {
            batch: index,
            source,
        })
    }
}
