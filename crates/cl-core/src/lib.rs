pub mod codec;
pub mod error;
pub mod models;

pub use codec::field_set::FieldSet;
pub use codec::form_codec::{SCHEMA_VERSION, decode, encode, encode_at, snapshot};
pub use codec::form_state::FormState;
pub use error::{CoreError, Result};
pub use models::campaign_id::CampaignId;
pub use models::campaign_record::CampaignRecord;
pub use models::field_kind::FieldKind;
pub use models::field_spec::FieldSpec;
pub use models::field_value::{FieldSnapshot, FieldValue};
pub use models::key_prefix::{DEFAULT_KEY_PREFIX, KeyPrefix};
pub use models::provider_kind::ProviderKind;
pub use models::record_metadata::RecordMetadata;
pub use models::storage_key::StorageKey;
pub use models::user_identity::UserIdentity;

#[cfg(test)]
mod tests;

/// Separator between the parts of a storage key. Never valid inside a
/// prefix or campaign id.
pub const KEY_SEPARATOR: char = ':';
