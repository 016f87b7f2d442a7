use crate::{CampaignId, CoreError, KeyPrefix};

use googletest::prelude::*;

#[test]
fn given_plain_name_when_new_then_ok() {
    let id = CampaignId::new("mutantGenesis").unwrap();

    assert_that!(id.as_str(), eq("mutantGenesis"));
    assert_that!(id.to_string(), eq("mutantGenesis"));
}

#[test]
fn given_filename_style_id_when_new_then_ok() {
    let result = CampaignId::new("marvelChampions_madTitansShadow.json");

    assert_that!(result, ok(anything()));
}

#[test]
fn given_empty_id_when_new_then_error() {
    let result = CampaignId::new("");

    assert!(matches!(result, Err(CoreError::InvalidCampaignId { .. })));
}

#[test]
fn given_separator_in_id_when_new_then_error() {
    let result = CampaignId::new("mutant:genesis");

    assert!(matches!(result, Err(CoreError::InvalidCampaignId { .. })));
}

#[test]
fn given_control_character_when_new_then_error() {
    let result = CampaignId::new("mutant\ngenesis");

    assert_that!(result, err(anything()));
}

#[test]
fn given_overlong_id_when_new_then_error() {
    let result = CampaignId::new("x".repeat(129));

    assert_that!(result, err(anything()));
}

#[test]
fn given_json_string_when_deserialize_then_validates() {
    let ok_id: std::result::Result<CampaignId, _> = serde_json::from_str(r#""mutantGenesis""#);
    let bad_id: std::result::Result<CampaignId, _> = serde_json::from_str(r#""a:b""#);

    assert_that!(ok_id, ok(anything()));
    assert_that!(bad_id, err(anything()));
}

#[test]
fn given_separator_in_prefix_when_new_then_error() {
    assert_that!(KeyPrefix::new("campaign:log"), err(anything()));
    assert_that!(KeyPrefix::new(""), err(anything()));
    assert_that!(KeyPrefix::new("campaign_log"), ok(anything()));
}
