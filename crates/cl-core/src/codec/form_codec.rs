//! Conversion between a page's fields and a persisted campaign record.

use crate::{CampaignRecord, FieldSet, FieldSnapshot, RecordMetadata, UserIdentity};

use chrono::{DateTime, Utc};

/// Version stamped into every record this codec produces.
pub const SCHEMA_VERSION: &str = "2.0";

/// Collects the current value of every field on the page.
///
/// Fields the page reports without a value are captured at their empty value.
pub fn snapshot<F: FieldSet + ?Sized>(form: &F) -> FieldSnapshot {
    form.specs()
        .into_iter()
        .map(|spec| {
            let value = form
                .value(&spec.id)
                .map(|value| spec.kind.coerce(&value))
                .unwrap_or_else(|| spec.kind.empty_value());
            (spec.id, value)
        })
        .collect()
}

/// Builds a record stamped with the current time.
pub fn encode(fields: &FieldSnapshot, identity: &UserIdentity) -> CampaignRecord {
    encode_at(fields, identity, Utc::now())
}

/// Builds a record with an explicit modification time.
pub fn encode_at(
    fields: &FieldSnapshot,
    identity: &UserIdentity,
    at: DateTime<Utc>,
) -> CampaignRecord {
    CampaignRecord {
        fields: fields.clone(),
        metadata: RecordMetadata {
            user_id: identity.id.clone(),
            user_name: identity.display_name.clone(),
            user_email: identity.email.clone(),
            last_modified: at,
            schema_version: String::from(SCHEMA_VERSION),
        },
    }
}

/// Applies stored values to the fields present in both the record and the
/// page. Fields missing from the record are left untouched.
///
/// Returns how many fields were applied.
pub fn decode<F: FieldSet + ?Sized>(record: &CampaignRecord, form: &F) -> usize {
    let mut applied = 0;

    for spec in form.specs() {
        if let Some(stored) = record.fields.get(&spec.id)
            && form.apply(&spec.id, spec.kind.coerce(stored))
        {
            applied += 1;
        }
    }

    log::debug!(
        "Applied {applied} of {} stored fields for {}",
        record.fields.len(),
        record.metadata.user_id
    );

    applied
}
