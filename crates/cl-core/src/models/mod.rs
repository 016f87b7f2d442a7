pub mod campaign_id;
pub mod campaign_record;
pub mod field_kind;
pub mod field_spec;
pub mod field_value;
pub mod key_prefix;
pub mod provider_kind;
pub mod record_metadata;
pub mod storage_key;
pub mod user_identity;
