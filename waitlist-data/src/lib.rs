//! Patient dataset access for the waitlist ranking engine.
//!
//! The crate provides [`JsonPatientStore`], a [`PatientStore`] backed by a
//! JSON document on disk. The dataset is read and validated eagerly at
//! construction, so request-time reads never touch the filesystem and a
//! malformed dataset fails the process at startup rather than mid-request.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use waitlist_core::{Patient, PatientStore};

/// Errors raised while loading a patient dataset from disk.
#[derive(Debug, Error)]
pub enum JsonStoreError {
    /// Opening the dataset file failed.
    #[error("failed to read patient dataset at {path}")]
    ReadFile {
        /// Requested dataset path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The dataset was not valid JSON or did not match the record shape.
    #[error("failed to parse patient dataset at {path}")]
    Parse {
        /// Requested dataset path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// `PatientStore` backed by a JSON array of patient records.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use waitlist_core::PatientStore;
/// use waitlist_data::JsonPatientStore;
///
/// let store = JsonPatientStore::open(Utf8Path::new("data/patients.json"))?;
/// let population = store.get_patients();
/// # Ok::<(), waitlist_data::JsonStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonPatientStore {
    patients: Vec<Patient>,
}

impl JsonPatientStore {
    /// Read and deserialize the dataset at `path`.
    ///
    /// # Errors
    /// Returns [`JsonStoreError::ReadFile`] when the file cannot be opened
    /// and [`JsonStoreError::Parse`] when its contents do not deserialize
    /// into patient records.
    pub fn open(path: &Utf8Path) -> Result<Self, JsonStoreError> {
        let file = File::open(path.as_std_path()).map_err(|source| JsonStoreError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let patients: Vec<Patient> =
            serde_json::from_reader(reader).map_err(|source| JsonStoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        log::info!("loaded {count} patient records from {path}", count = patients.len());
        Ok(Self { patients })
    }

    /// Number of records in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// Report whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

impl PatientStore for JsonPatientStore {
    fn get_patients(&self) -> Vec<Patient> {
        self.patients.clone()
    }
}
