mod campaign_id;

use crate::{FieldSpec, UserIdentity};

pub(crate) fn test_identity() -> UserIdentity {
    UserIdentity::new("u1", "Test User").with_email("u1@example.com")
}

pub(crate) fn campaign_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("hp"),
        FieldSpec::checkbox("done"),
        FieldSpec::text("hero"),
        FieldSpec::text_area("notes"),
    ]
}
