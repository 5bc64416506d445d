//! Test-only, in-memory `PatientStore` implementation used by unit and
//! behaviour tests.

use crate::{Patient, PatientStore};

/// In-memory `PatientStore` implementation used in tests.
///
/// The store clones its records on every read and is intended only for small
/// fixture populations.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    patients: Vec<Patient>,
}

impl MemoryStore {
    /// Create a store containing a single patient.
    #[must_use]
    pub fn with_patient(patient: Patient) -> Self {
        Self::with_patients(std::iter::once(patient))
    }

    /// Create a store from a collection of patients.
    pub fn with_patients<I>(patients: I) -> Self
    where
        I: IntoIterator<Item = Patient>,
    {
        Self {
            patients: patients.into_iter().collect(),
        }
    }
}

impl PatientStore for MemoryStore {
    fn get_patients(&self) -> Vec<Patient> {
        self.patients.clone()
    }
}

#[cfg(test)]
mod tests {
    use geo::Coord;

    use super::*;

    fn population_of(store: &dyn PatientStore) -> usize {
        store.get_patients().len()
    }

    #[test]
    fn defaults_to_an_empty_population() {
        assert!(MemoryStore::default().get_patients().is_empty());
    }

    #[test]
    fn serves_its_records_through_the_store_trait() {
        let store = MemoryStore::with_patients(vec![
            Patient::new("p-1", "One", Coord { x: 0.0, y: 0.0 }),
            Patient::new("p-2", "Two", Coord { x: 1.0, y: 1.0 }),
        ]);
        assert_eq!(population_of(&store), 2);
    }

    #[test]
    fn reads_do_not_drain_the_store() {
        let store = MemoryStore::with_patient(Patient::new("p-1", "One", Coord { x: 0.0, y: 0.0 }));
        assert_eq!(store.get_patients(), store.get_patients());
    }
}
