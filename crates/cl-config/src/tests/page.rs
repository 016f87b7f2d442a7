use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_dismiss_below_min_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _dismiss = EnvGuard::set("CL_PAGE_STATUS_DISMISS_MS", "100");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_dismiss_over_max_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _dismiss = EnvGuard::set("CL_PAGE_STATUS_DISMISS_MS", "60000");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_default_dismiss_when_status_dismiss_then_three_seconds() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
    assert_that!(config.page.status_dismiss(), eq(Duration::from_secs(3)));
}
