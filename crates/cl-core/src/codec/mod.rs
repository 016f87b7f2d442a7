pub mod field_set;
pub mod form_codec;
pub mod form_state;
