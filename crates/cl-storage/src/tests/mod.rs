
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, TimeZone, Utc};
use cl_auth::IdentitySource;
use cl_core::{
    CampaignId, CampaignRecord, FieldSnapshot, FieldValue, KeyPrefix, UserIdentity, encode_at,
};

/// Identity that tests can swap or sign out.
pub(crate) struct SwitchableIdentity(Mutex<Option<UserIdentity>>);

impl SwitchableIdentity {
    pub(crate) fn signed_in(identity: UserIdentity) -> Self {
        Self(Mutex::new(Some(identity)))
    }

    pub(crate) fn signed_out() -> Self {
        Self(Mutex::new(None))
    }

    pub(crate) fn switch_to(&self, identity: Option<UserIdentity>) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = identity;
    }
}

impl IdentitySource for SwitchableIdentity {
    fn resolve(&self) -> Option<UserIdentity> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

pub(crate) fn user(id: &str) -> UserIdentity {
    UserIdentity::new(id, format!("User {id}"))
}

pub(crate) fn prefix() -> KeyPrefix {
    KeyPrefix::new("test_log").unwrap()
}

pub(crate) fn campaign() -> CampaignId {
    "mutantGenesis".parse().unwrap()
}

pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub(crate) fn record_for(identity: &UserIdentity, hp: &str, when: DateTime<Utc>) -> CampaignRecord {
    let mut fields = FieldSnapshot::new();
    fields.insert("hp".to_string(), FieldValue::from(hp));
    fields.insert("done".to_string(), FieldValue::from(true));
    encode_at(&fields, identity, when)
}
