//! Paint Shop
//!
//! Paint Shop decides, batch by batch, whether each color is made glossy or
//! matte so that every customer gets at least one (color, finish) pair they
//! asked for, while making as few colors matte as possible. Batches that
//! cannot satisfy every customer are reported as impossible.
//!
//! The resolution engine lives in [`solvers::backtracking`]; [`input`],
//! [`fixtures`] and [`report`] turn text or YAML into batches and solutions
//! back into case-numbered lines.

pub mod batch;
pub mod config;
pub mod finishes;
pub mod fixtures;
pub mod input;
pub mod logging;
pub mod preferences;
pub mod prelude;
pub mod report;
pub mod solution;
pub mod solvers;
