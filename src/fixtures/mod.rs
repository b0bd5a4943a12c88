//! Fixtures
//!
//! YAML batch sets, used by the tests and by the binary's `--format yaml`
//! input mode.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    batch::{BatchDescriptor, BatchError},
    fixtures::batches::BatchesFixture,
    preferences::PreferenceError,
};

pub mod batches;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A customer in the fixture has no preferences
    #[error("Invalid customer {customer} in batch {batch}: {source}")]
    Preference {
        /// Zero-based batch index
        batch: usize,

        /// Zero-based customer index
        customer: usize,

        /// Underlying preference error
        #[source]
        source: PreferenceError,
    },

    /// A batch in the fixture is invalid
    #[error("Invalid batch {batch}: {source}")]
    Batch {
        /// Zero-based batch index
        batch: usize,

        /// Underlying batch error
        #[source]
        source: BatchError,
    },

    /// Named batch not found
    #[error("Batch not found: {0}")]
    BatchNotFound(String),
}

/// A batch loaded from a fixture, with its optional name and expectation.
#[derive(Debug, Clone)]
pub struct FixtureBatch {
    /// Optional human-readable name
    pub name: Option<String>,

    /// The checked batch
    pub batch: BatchDescriptor,

    /// Expected report line, if the fixture states one
    pub expected: Option<String>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Batches loaded so far, in file order
    batches: Vec<FixtureBatch>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            batches: Vec::new(),
        }
    }

    /// Load batches from `<base>/batches/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a batch is invalid.
    pub fn load_batches(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("batches").join(format!("{name}.yml"));

        self.load_path(&file_path)
    }

    /// Load batches from an explicit YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a batch is invalid.
    pub fn load_path(&mut self, path: &Path) -> Result<&mut Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        self.load_str(&contents)
    }

    /// Load batches from YAML source
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or if a batch is invalid.
    pub fn load_str(&mut self, contents: &str) -> Result<&mut Self, FixtureError> {
        let fixture: BatchesFixture = serde_norway::from_str(contents)?;
        let offset = self.batches.len();

        for (index, batch_fixture) in fixture.batches.into_iter().enumerate() {
            let name = batch_fixture.name.clone();
            let expected = batch_fixture.expected.clone();
            let batch = batch_fixture.try_into_batch(offset + index)?;

            self.batches.push(FixtureBatch {
                name,
                batch,
                expected,
            });
        }

        Ok(self)
    }

    /// Load a named fixture set from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_batches(name)?;

        Ok(fixture)
    }

    /// Load a fixture from an explicit YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_path(path)?;

        Ok(fixture)
    }

    /// Get a batch by its name
    ///
    /// # Errors
    ///
    /// Returns an error if no batch has that name.
    pub fn batch(&self, name: &str) -> Result<&FixtureBatch, FixtureError> {
        self.batches
            .iter()
            .find(|batch| batch.name.as_deref() == Some(name))
            .ok_or_else(|| FixtureError::BatchNotFound(name.to_string()))
    }

    /// Get all loaded batches
    pub fn batches(&self) -> &[FixtureBatch] {
        &self.batches
    }

    /// Consume the fixture, keeping only the batch descriptors
    pub fn into_descriptors(self) -> Vec<BatchDescriptor> {
        self.batches.into_iter().map(|batch| batch.batch).collect()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
