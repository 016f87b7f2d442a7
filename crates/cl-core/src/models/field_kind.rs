use crate::{CoreError, FieldValue, Result as CoreErrorResult};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text input
    #[default]
    Text,
    /// Numeric input, stored as its textual value
    Number,
    /// Checkbox, stored as a boolean
    Checkbox,
    /// Multi-line free text
    TextArea,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::TextArea => "text_area",
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Checkbox)
    }

    /// Value of a freshly reset field of this kind.
    pub fn empty_value(&self) -> FieldValue {
        if self.is_flag() {
            FieldValue::Flag(false)
        } else {
            FieldValue::Text(String::new())
        }
    }

    /// Converts a stored value into the representation this kind holds.
    pub fn coerce(&self, value: &FieldValue) -> FieldValue {
        if self.is_flag() {
            FieldValue::Flag(value.as_flag())
        } else {
            FieldValue::Text(value.as_text())
        }
    }
}

impl FromStr for FieldKind {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "checkbox" => Ok(Self::Checkbox),
            "text_area" | "textarea" => Ok(Self::TextArea),
            _ => Err(CoreError::validation(format!("unknown field kind '{s}'"))),
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
