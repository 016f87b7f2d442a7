use crate::ProviderStatus;

use cl_storage::StorageError;
use googletest::prelude::*;

#[test]
fn given_successful_init_when_converted_then_ready() {
    let init: Result<(), StorageError> = Ok(());

    let status = ProviderStatus::from(&init);

    assert_that!(status, eq(&ProviderStatus::Ready));
    assert!(status.is_ready());
}

#[test]
fn given_failed_init_when_converted_then_unavailable_with_reason() {
    let init: Result<(), StorageError> = Err(StorageError::provider_unavailable("timed out"));

    let status = ProviderStatus::from(&init);

    let ProviderStatus::Unavailable { reason } = status else {
        panic!("expected unavailable");
    };
    assert!(reason.contains("timed out"));
}

#[test]
fn given_new_status_when_default_then_pending() {
    assert_that!(ProviderStatus::default(), eq(&ProviderStatus::Pending));
}
