use crate::{FieldSpec, FieldValue};

/// A set of labeled inputs the codec reads from and writes into.
///
/// Methods take `&self`: implementors are UI handles shared between the
/// controller and the embedding page, so they manage their own interior
/// mutability.
pub trait FieldSet: Send + Sync {
    /// Every field on the page, in display order.
    fn specs(&self) -> Vec<FieldSpec>;

    /// Current value of a field, `None` if the page has no such field.
    fn value(&self, id: &str) -> Option<FieldValue>;

    /// Sets a field. Returns false if the page has no such field.
    fn apply(&self, id: &str, value: FieldValue) -> bool;

    /// Resets every field: checkboxes unchecked, everything else emptied.
    fn clear(&self) {
        for spec in self.specs() {
            self.apply(&spec.id, spec.kind.empty_value());
        }
    }
}
