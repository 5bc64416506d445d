//! Data access trait for patient records.
//!
//! The `PatientStore` trait defines a read-only interface for retrieving the
//! [`Patient`] population a ranking pass operates on. Implementations own the
//! loading strategy; callers treat the returned records as immutable for the
//! duration of the pass.

use crate::Patient;

/// Read-only source of the patient population.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so a shared store
/// can serve concurrent requests without locking; the population itself is
/// never mutated.
pub trait PatientStore: Send + Sync {
    /// Return the full patient population.
    fn get_patients(&self) -> Vec<Patient>;
}
