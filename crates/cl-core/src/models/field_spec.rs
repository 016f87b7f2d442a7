use crate::FieldKind;

use serde::{Deserialize, Serialize};

/// A labeled input on a campaign page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Text)
    }

    pub fn number(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Number)
    }

    pub fn checkbox(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Checkbox)
    }

    pub fn text_area(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::TextArea)
    }
}
