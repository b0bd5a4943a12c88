//! Input
//!
//! Parser for the plain text batch format:
//!
//! ```text
//! 2           number of batches
//! 5           color count of batch 1
//! 3           customer count of batch 1
//! 1 1 1       one line per customer: k, then k (color, finish) pairs
//! 2 1 0 2 0
//! 1 5 0
//! 1           color count of batch 2
//! 2
//! 1 1 0
//! 1 1 1
//! ```
//!
//! Finishes are `0` for glossy and `1` for matte. Blank lines are ignored.

use std::num::ParseIntError;

use thiserror::Error;

use crate::{
    batch::{BatchDescriptor, BatchError},
    finishes::{ColorFinish, FinishError},
    preferences::{CustomerRequest, Preference, PreferenceError},
};

/// Input parsing errors. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum InputError {
    /// Input ended where a count was expected.
    #[error("expected an integer, reached the end of the input")]
    UnexpectedEnd,

    /// A count line is not a non-negative integer.
    #[error("line {line}: expected an integer, found {found:?}")]
    ExpectedInteger {
        /// Line number
        line: usize,

        /// Offending line contents
        found: String,

        /// Underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A batch declares zero colors.
    #[error("line {line}: the number of colors must be at least one")]
    NoColors {
        /// Line number
        line: usize,
    },

    /// A batch declares zero customers.
    #[error("line {line}: at least one customer is required in each batch")]
    NoCustomers {
        /// Line number
        line: usize,
    },

    /// Input ended before every declared customer was read.
    #[error("expected {expected} customers but found {found}")]
    MissingCustomers {
        /// Declared customer count
        expected: usize,

        /// Customer lines actually present
        found: usize,
    },

    /// A customer declares zero preferences.
    #[error("line {line}: the number of colors must be greater than zero for each customer")]
    EmptyCustomer {
        /// Line number
        line: usize,
    },

    /// A customer line contains a token that is not a non-negative integer.
    #[error("line {line}: invalid token {token:?} in customer preferences")]
    InvalidToken {
        /// Line number
        line: usize,

        /// Offending token
        token: String,

        /// Underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A customer line ends with a color that has no finish.
    #[error("line {line}: color without a finish in customer preferences")]
    MalformedCustomer {
        /// Line number
        line: usize,
    },

    /// The number of pairs differs from the declared preference count.
    #[error("line {line}: expected {expected} colors in customer preferences but found {found}")]
    PreferenceCountMismatch {
        /// Line number
        line: usize,

        /// Declared preference count
        expected: usize,

        /// Pairs actually present
        found: usize,
    },

    /// A customer refers to color 0.
    #[error("line {line}: color number must be greater than 0")]
    InvalidColorNumber {
        /// Line number
        line: usize,
    },

    /// A finish code is neither 0 nor 1.
    #[error("line {line}: {source}")]
    InvalidFinish {
        /// Line number
        line: usize,

        /// Underlying finish error
        #[source]
        source: FinishError,
    },

    /// A customer refers to a color above the batch's color count.
    #[error("line {line}: color numbers must be between 1 and {color_count} but found {color}")]
    ColorOutOfRange {
        /// Line number
        line: usize,

        /// The color number found
        color: usize,

        /// The batch's color count
        color_count: usize,
    },

    /// Wrapped preference error
    #[error(transparent)]
    Preference(#[from] PreferenceError),

    /// Wrapped batch error
    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// Parse every batch in `input`.
///
/// # Errors
///
/// Returns an [`InputError`] describing the first malformed or inconsistent line.
pub fn parse_batches(input: &str) -> Result<Vec<BatchDescriptor>, InputError> {
    let mut lines = LineReader::new(input);

    let (_, batch_count) = lines.read_count()?;

    (0..batch_count)
        .map(|_| parse_batch(&mut lines))
        .collect()
}

fn parse_batch(lines: &mut LineReader<'_>) -> Result<BatchDescriptor, InputError> {
    let (colors_line, color_count) = lines.read_count()?;

    if color_count == 0 {
        return Err(InputError::NoColors { line: colors_line });
    }

    let (customers_line, customer_count) = lines.read_count()?;

    if customer_count == 0 {
        return Err(InputError::NoCustomers {
            line: customers_line,
        });
    }

    let mut customers = Vec::new();

    for found in 0..customer_count {
        let (line, contents) = lines.next().ok_or(InputError::MissingCustomers {
            expected: customer_count,
            found,
        })?;

        customers.push(parse_customer(line, contents, color_count)?);
    }

    Ok(BatchDescriptor::try_new(color_count, customers)?)
}

/// Parse one `k c1 f1 ... ck fk` customer line.
fn parse_customer(
    line: usize,
    contents: &str,
    color_count: usize,
) -> Result<CustomerRequest, InputError> {
    let numbers = contents
        .split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|source| InputError::InvalidToken {
                    line,
                    token: token.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some((&expected, pairs)) = numbers.split_first() else {
        return Err(InputError::EmptyCustomer { line });
    };

    if expected == 0 {
        return Err(InputError::EmptyCustomer { line });
    }

    let chunks = pairs.chunks_exact(2);

    if !chunks.remainder().is_empty() {
        return Err(InputError::MalformedCustomer { line });
    }

    let preferences = chunks
        .map(|pair| match *pair {
            [color, code] => parse_preference(line, color, code, color_count),
            _ => Err(InputError::MalformedCustomer { line }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if preferences.len() != expected {
        return Err(InputError::PreferenceCountMismatch {
            line,
            expected,
            found: preferences.len(),
        });
    }

    Ok(CustomerRequest::new(preferences)?)
}

fn parse_preference(
    line: usize,
    color: usize,
    code: usize,
    color_count: usize,
) -> Result<Preference, InputError> {
    if color == 0 {
        return Err(InputError::InvalidColorNumber { line });
    }

    let finish = ColorFinish::try_from(code)
        .map_err(|source| InputError::InvalidFinish { line, source })?;

    if color > color_count {
        return Err(InputError::ColorOutOfRange {
            line,
            color,
            color_count,
        });
    }

    Ok(Preference::new(color, finish))
}

/// Non-blank lines paired with their 1-based line numbers.
#[derive(Debug)]
struct LineReader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> LineReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate(),
        }
    }

    /// Read a line holding a single count.
    fn read_count(&mut self) -> Result<(usize, usize), InputError> {
        let (line, contents) = self.next().ok_or(InputError::UnexpectedEnd)?;

        let count = contents
            .parse::<usize>()
            .map_err(|source| InputError::ExpectedInteger {
                line,
                found: contents.to_string(),
                source,
            })?;

        Ok((line, count))
    }
}

impl<'a> Iterator for LineReader<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .by_ref()
            .map(|(index, contents)| (index + 1, contents.trim()))
            .find(|(_, contents)| !contents.is_empty())
    }
}
