use crate::{FieldSet, FieldSnapshot, FieldSpec, FieldValue};

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory form: the field layout plus current values.
#[derive(Debug, Default)]
pub struct FormState {
    specs: Vec<FieldSpec>,
    values: Mutex<BTreeMap<String, FieldValue>>,
}

impl FormState {
    /// Creates a form with every field at its empty value.
    pub fn new(specs: Vec<FieldSpec>) -> Self {
        let values = specs
            .iter()
            .map(|spec| (spec.id.clone(), spec.kind.empty_value()))
            .collect();

        Self {
            specs,
            values: Mutex::new(values),
        }
    }

    /// Current values of every field.
    pub fn values(&self) -> FieldSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, FieldValue>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FieldSet for FormState {
    fn specs(&self) -> Vec<FieldSpec> {
        self.specs.clone()
    }

    fn value(&self, id: &str) -> Option<FieldValue> {
        self.lock().get(id).cloned()
    }

    fn apply(&self, id: &str, value: FieldValue) -> bool {
        let Some(spec) = self.specs.iter().find(|spec| spec.id == id) else {
            return false;
        };
        let coerced = spec.kind.coerce(&value);
        self.lock().insert(spec.id.clone(), coerced);
        true
    }
}
