//! Batches

use thiserror::Error;

use crate::preferences::CustomerRequest;

/// Errors building a batch through [`BatchDescriptor::try_new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// The batch declares no colors.
    #[error("the number of colors must be at least one")]
    NoColors,

    /// The batch has no customers.
    #[error("at least one customer is required in each batch")]
    NoCustomers,

    /// A customer refers to a color outside `1..=color_count`.
    #[error("customer {customer} refers to color {color}, colors must be between 1 and {color_count}")]
    ColorOutOfRange {
        /// Zero-based index of the offending customer
        customer: usize,

        /// The color number found
        color: usize,

        /// The batch's color count
        color_count: usize,
    },
}

/// One independent instance of the finish assignment problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchDescriptor {
    color_count: usize,
    customers: Vec<CustomerRequest>,
}

impl BatchDescriptor {
    /// Create a batch without checking it.
    ///
    /// The caller guarantees `color_count >= 1`, at least one customer, and
    /// that every preferred color lies in `1..=color_count`.
    pub fn new(color_count: usize, customers: impl Into<Vec<CustomerRequest>>) -> Self {
        Self {
            color_count,
            customers: customers.into(),
        }
    }

    /// Create a batch, checking the color count, customer count and color ranges.
    ///
    /// # Errors
    ///
    /// - [`BatchError::NoColors`]: `color_count` is zero.
    /// - [`BatchError::NoCustomers`]: `customers` is empty.
    /// - [`BatchError::ColorOutOfRange`]: a preference names color 0 or a color above `color_count`.
    pub fn try_new(
        color_count: usize,
        customers: impl Into<Vec<CustomerRequest>>,
    ) -> Result<Self, BatchError> {
        let customers = customers.into();

        if color_count == 0 {
            return Err(BatchError::NoColors);
        }

        if customers.is_empty() {
            return Err(BatchError::NoCustomers);
        }

        customers
            .iter()
            .enumerate()
            .try_for_each(|(customer, request)| {
                match request
                    .iter()
                    .find(|preference| !(1..=color_count).contains(&preference.color()))
                {
                    Some(preference) => Err(BatchError::ColorOutOfRange {
                        customer,
                        color: preference.color(),
                        color_count,
                    }),
                    None => Ok(()),
                }
            })?;

        Ok(Self {
            color_count,
            customers,
        })
    }

    /// Number of colors in the batch.
    pub fn color_count(&self) -> usize {
        self.color_count
    }

    /// Customers, in resolution order.
    pub fn customers(&self) -> &[CustomerRequest] {
        &self.customers
    }

    /// Sorted, de-duplicated colors mentioned by at least one customer.
    pub fn referenced_colors(&self) -> Vec<usize> {
        let mut colors: Vec<usize> = self
            .customers
            .iter()
            .flat_map(|customer| customer.iter().map(|preference| preference.color()))
            .collect();

        colors.sort_unstable();
        colors.dedup();

        colors
    }
}
