//! Remote provider against a mock file API

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use cl_auth::{IdentitySource, StaticTokenSource, TokenBroker, TokenSource};
use cl_core::{CampaignId, CampaignRecord, FieldSnapshot, FieldValue, UserIdentity, encode_at};
use cl_storage::{
    DriveClient, RemoteProvider, RemoteSettings, SaveAction, StorageErrorKind, StorageProvider,
};
use googletest::prelude::*;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

const TOKEN: &str = "test-token";
const FILE_NAME: &str = "CampaignLog_mutantGenesis_u1.json";

struct FixedIdentity(Option<UserIdentity>);

impl IdentitySource for FixedIdentity {
    fn resolve(&self) -> Option<UserIdentity> {
        self.0.clone()
    }
}

fn u1() -> UserIdentity {
    UserIdentity::new("u1", "Test User").with_email("u1@example.com")
}

fn campaign() -> CampaignId {
    "mutantGenesis".parse().unwrap()
}

fn settings() -> RemoteSettings {
    RemoteSettings {
        file_prefix: "CampaignLog".to_string(),
        scope: "https://www.googleapis.com/auth/drive.file".to_string(),
        auth_timeout: Duration::from_millis(100),
    }
}

fn provider_with(
    server: &MockServer,
    tokens: Arc<dyn TokenSource>,
    identity: Option<UserIdentity>,
) -> RemoteProvider {
    RemoteProvider::new(
        DriveClient::new(&server.uri()),
        tokens,
        Arc::new(FixedIdentity(identity)),
        settings(),
    )
}

async fn ready_provider(server: &MockServer) -> RemoteProvider {
    let provider = provider_with(server, Arc::new(StaticTokenSource::new(TOKEN)), Some(u1()));
    provider.init().await.unwrap();
    provider
}

fn record(owner: &UserIdentity) -> CampaignRecord {
    let mut fields = FieldSnapshot::new();
    fields.insert("hp".to_string(), FieldValue::from("10"));
    fields.insert("done".to_string(), FieldValue::from(true));
    encode_at(
        &fields,
        owner,
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    )
}

async fn mount_lookup(server: &MockServer, files: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param(
            "q",
            format!("name='{FILE_NAME}' and trashed=false"),
        ))
        .and(query_param("spaces", "drive"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": files })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn given_static_token_when_init_then_available() {
    let server = MockServer::start().await;

    let provider = ready_provider(&server).await;

    assert!(provider.is_available());
    assert!(provider.has_permission());
}

#[tokio::test]
async fn given_signed_out_when_init_then_not_signed_in() {
    let server = MockServer::start().await;
    let provider = provider_with(&server, Arc::new(StaticTokenSource::new(TOKEN)), None);

    let err = provider.init().await.unwrap_err();

    assert_that!(err.kind(), eq(StorageErrorKind::NotSignedIn));
    assert!(!provider.is_available());
}

#[tokio::test]
async fn given_unanswered_authorization_when_init_then_times_out_unavailable() {
    let server = MockServer::start().await;
    let (broker, _grant) = TokenBroker::new();
    let provider = provider_with(&server, Arc::new(broker), Some(u1()));

    let err = provider.init().await.unwrap_err();

    assert_that!(err.kind(), eq(StorageErrorKind::ProviderUnavailable));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn given_denied_authorization_when_permission_requested_then_false() {
    let server = MockServer::start().await;
    let (broker, grant) = TokenBroker::new();
    grant.deny("access_denied");
    let provider = provider_with(&server, Arc::new(broker), Some(u1()));

    assert!(!provider.request_permission().await);

    grant.deliver(TOKEN);
    assert!(provider.request_permission().await);
    assert!(provider.is_available());
}

#[tokio::test]
async fn given_not_initialized_when_save_then_unavailable() {
    let server = MockServer::start().await;
    let provider = provider_with(&server, Arc::new(StaticTokenSource::new(TOKEN)), Some(u1()));

    let err = provider.save(&campaign(), &record(&u1())).await.unwrap_err();

    assert_that!(err.kind(), eq(StorageErrorKind::ProviderUnavailable));
}

#[tokio::test]
async fn given_no_existing_file_when_save_then_creates_with_multipart_upload() {
    let server = MockServer::start().await;
    mount_lookup(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/upload/drive/v3/files"))
        .and(query_param("uploadType", "multipart"))
        .and(body_string_contains(FILE_NAME))
        .and(body_string_contains("\"userId\": \"u1\""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "f1", "name": FILE_NAME })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let provider = ready_provider(&server).await;

    let outcome = provider.save(&campaign(), &record(&u1())).await.unwrap();

    assert_that!(outcome.action, eq(SaveAction::Created));
    assert_that!(outcome.location.as_str(), eq("f1"));
}

#[tokio::test]
async fn given_existing_file_when_save_then_updates_in_place() {
    let server = MockServer::start().await;
    mount_lookup(&server, json!([{ "id": "f1", "name": FILE_NAME }])).await;
    Mock::given(method("PATCH"))
        .and(path("/upload/drive/v3/files/f1"))
        .and(query_param("uploadType", "media"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "f1", "name": FILE_NAME })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let provider = ready_provider(&server).await;

    let outcome = provider.save(&campaign(), &record(&u1())).await.unwrap();

    assert_that!(outcome.action, eq(SaveAction::Updated));
}

#[tokio::test]
async fn given_record_of_other_user_when_save_then_ownership_mismatch() {
    let server = MockServer::start().await;
    let provider = ready_provider(&server).await;
    let other = UserIdentity::new("u2", "Other");

    let err = provider.save(&campaign(), &record(&other)).await.unwrap_err();

    assert_that!(err.kind(), eq(StorageErrorKind::RecordOwnershipMismatch));
}

#[tokio::test]
async fn given_stored_file_when_load_then_returns_same_record() {
    let server = MockServer::start().await;
    let stored = record(&u1());
    mount_lookup(&server, json!([{ "id": "f1", "name": FILE_NAME }])).await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/f1"))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(200).set_body_string(stored.to_json_pretty().unwrap()))
        .mount(&server)
        .await;
    let provider = ready_provider(&server).await;

    let loaded = provider.load(&campaign()).await.unwrap();

    assert_that!(loaded, some(eq(&stored)));
}

#[tokio::test]
async fn given_no_file_when_load_then_none() {
    let server = MockServer::start().await;
    mount_lookup(&server, json!([])).await;
    let provider = ready_provider(&server).await;

    assert_that!(provider.load(&campaign()).await.unwrap(), none());
}

#[tokio::test]
async fn given_corrupt_file_when_load_then_none_and_file_deleted() {
    let server = MockServer::start().await;
    mount_lookup(&server, json!([{ "id": "f1", "name": FILE_NAME }])).await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/drive/v3/files/f1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let provider = ready_provider(&server).await;

    assert_that!(provider.load(&campaign()).await.unwrap(), none());
}

#[tokio::test]
async fn given_file_owned_by_other_user_when_load_then_none() {
    let server = MockServer::start().await;
    let foreign = record(&UserIdentity::new("u2", "Other"));
    mount_lookup(&server, json!([{ "id": "f1", "name": FILE_NAME }])).await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(foreign.to_json().unwrap()))
        .mount(&server)
        .await;
    let provider = ready_provider(&server).await;

    assert_that!(provider.load(&campaign()).await.unwrap(), none());
}

#[tokio::test]
async fn given_existing_file_when_delete_then_true() {
    let server = MockServer::start().await;
    mount_lookup(&server, json!([{ "id": "f1", "name": FILE_NAME }])).await;
    Mock::given(method("DELETE"))
        .and(path("/drive/v3/files/f1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let provider = ready_provider(&server).await;

    assert!(provider.delete(&campaign()).await.unwrap());
}

#[tokio::test]
async fn given_server_error_when_load_then_unavailable_with_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "Backend Error" }
        })))
        .mount(&server)
        .await;
    let provider = ready_provider(&server).await;

    let err = provider.load(&campaign()).await.unwrap_err();

    assert_that!(err.kind(), eq(StorageErrorKind::ProviderUnavailable));
    assert!(err.to_string().contains("Backend Error"));
}
