//! Workflow tests against a mock GitHub API.

use serde_json::{Value, json};
use splashtop_release_publisher::cli::OutputManager;
use splashtop_release_publisher::error::{CredentialError, GitHubError};
use splashtop_release_publisher::{EnvConfig, PublishConfig, PublishError, Publisher};
use std::path::Path;
use wiremock::matchers::{any, body_bytes, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RELEASES_PATH: &str = "/repos/TG-orlando/splashtop-deployment/releases";
const DMG_NAME: &str = "Splashtop_Streamer_Mac_DEPLOY_INSTALLER_20240101.dmg";
const DMG_BYTES: &[u8] = b"fake dmg payload";

fn release_json(server: &MockServer, id: u64, tag: &str) -> Value {
    json!({
        "id": id,
        "tag_name": tag,
        "name": "Splashtop Streamer Deployment",
        "html_url": format!("https://github.com/TG-orlando/splashtop-deployment/releases/tag/{tag}"),
        "assets_url": format!("{}{}/{}/assets", server.uri(), RELEASES_PATH, id),
        "upload_url": format!("{}/uploads{}/{}/assets{{?name,label}}", server.uri(), RELEASES_PATH, id),
        "draft": false,
        "prerelease": false
    })
}

fn uploaded_asset_json(id: u64) -> Value {
    json!({
        "id": id,
        "name": "SplashtopStreamer.dmg",
        "size": DMG_BYTES.len(),
        "browser_download_url": "https://github.com/TG-orlando/splashtop-deployment/releases/download/v1.0.0/SplashtopStreamer.dmg"
    })
}

fn config_for(server: &MockServer, dir: &Path) -> PublishConfig {
    PublishConfig {
        downloads_dir: Some(dir.to_path_buf()),
        api_base: server.uri(),
        ..Default::default()
    }
}

fn env_with_token() -> EnvConfig {
    EnvConfig::from_pairs([("GITHUB_TOKEN", "test-token")])
}

fn downloads_with_dmg() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DMG_NAME), DMG_BYTES).unwrap();
    dir
}

async fn mount_upload(server: &MockServer, release_id: u64, response: Value) {
    Mock::given(method("POST"))
        .and(path(format!("/uploads{}/{}/assets", RELEASES_PATH, release_id)))
        .and(query_param("name", "SplashtopStreamer.dmg"))
        .and(header("content-type", "application/octet-stream"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_bytes(DMG_BYTES))
        .respond_with(ResponseTemplate::new(201).set_body_json(response))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn existing_release_replaces_only_the_named_asset() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    Mock::given(method("GET"))
        .and(path(RELEASES_PATH))
        .and(header("accept", "application/vnd.github+json"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            release_json(&server, 3, "v0.9.0"),
            release_json(&server, 7, "v1.0.0"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(RELEASES_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{}/7/assets", RELEASES_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "name": "SplashtopStreamer.dmg", "size": 10},
            {"id": 12, "name": "README.txt", "size": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/assets/11", RELEASES_PATH)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/assets/12", RELEASES_PATH)))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    mount_upload(&server, 7, uploaded_asset_json(21)).await;

    let config = config_for(&server, dir.path());
    let output = OutputManager::default();
    let result = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap();

    assert_eq!(result.release_id, Some(7));
    assert!(!result.release_created);
    assert_eq!(result.assets_deleted, 1);
    assert_eq!(result.artifact.file_name(), DMG_NAME);
}

#[tokio::test]
async fn missing_release_is_created_once() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    Mock::given(method("GET"))
        .and(path(RELEASES_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([release_json(&server, 3, "v0.9.0")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(RELEASES_PATH))
        .and(body_partial_json(json!({
            "tag_name": "v1.0.0",
            "name": "Splashtop Streamer Deployment",
            "body": "Splashtop Streamer deployment package for MDM distribution.",
            "draft": false,
            "prerelease": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(release_json(&server, 9, "v1.0.0")))
        .expect(1)
        .mount(&server)
        .await;

    // A fresh release has no assets to replace.
    Mock::given(method("GET"))
        .and(path(format!("{}/9/assets", RELEASES_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    mount_upload(&server, 9, uploaded_asset_json(30)).await;

    let config = config_for(&server, dir.path());
    let output = OutputManager::default();
    let result = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap();

    assert_eq!(result.release_id, Some(9));
    assert!(result.release_created);
    assert_eq!(result.assets_deleted, 0);
    assert_eq!(
        result.download_url,
        "https://github.com/TG-orlando/splashtop-deployment/releases/download/v1.0.0/SplashtopStreamer.dmg"
    );
}

#[tokio::test]
async fn upload_response_without_url_still_succeeds() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    Mock::given(method("GET"))
        .and(path(RELEASES_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([release_json(&server, 5, "v1.0.0")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/5/assets", RELEASES_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    mount_upload(&server, 5, json!({"id": 40, "name": "SplashtopStreamer.dmg"})).await;

    let config = config_for(&server, dir.path());
    let output = OutputManager::default();
    let result = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap();

    assert!(result.uploaded_url.is_none());
    assert_eq!(result.assets_deleted, 0);
}

#[tokio::test]
async fn http_failure_aborts_before_upload() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    Mock::given(method("GET"))
        .and(path(RELEASES_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server, dir.path());
    let output = OutputManager::default();
    let err = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap_err();

    match err {
        PublishError::GitHub(GitHubError::Status { status, body, .. }) => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "Bad credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_release_list_is_fatal() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    Mock::given(method("GET"))
        .and(path(RELEASES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let config = config_for(&server, dir.path());
    let output = OutputManager::default();
    let err = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PublishError::GitHub(GitHubError::MalformedResponse { .. })
    ));
}

#[tokio::test]
async fn missing_token_makes_no_requests() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server, dir.path());
    let output = OutputManager::default();
    let err = Publisher::new(&config, &output)
        .publish(&EnvConfig::from_pairs([("GITHUB_TOKEN", "")]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PublishError::Credential(CredentialError::Missing { .. })
    ));
}

#[tokio::test]
async fn dry_run_makes_no_requests() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = PublishConfig {
        dry_run: true,
        ..config_for(&server, dir.path())
    };
    let output = OutputManager::default();
    let result = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap();

    assert!(result.release_id.is_none());
    assert_eq!(result.artifact.size, DMG_BYTES.len() as u64);
}

async fn mount_existing_release(server: &MockServer, assets: Value) {
    Mock::given(method("GET"))
        .and(path(RELEASES_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([release_json(server, 7, "v1.0.0")])),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/7/assets", RELEASES_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(assets))
        .mount(server)
        .await;
}

async fn mount_delete(server: &MockServer, asset_id: u64, status: u16, times: u64) {
    Mock::given(method("DELETE"))
        .and(path(format!("{}/assets/{}", RELEASES_PATH, asset_id)))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn every_asset_with_the_target_name_is_deleted() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    mount_existing_release(
        &server,
        json!([
            {"id": 11, "name": "SplashtopStreamer.dmg"},
            {"id": 12, "name": "SplashtopStreamer.dmg"},
            {"id": 13, "name": "notes.txt"}
        ]),
    )
    .await;
    mount_delete(&server, 11, 204, 1).await;
    mount_delete(&server, 12, 204, 1).await;
    mount_delete(&server, 13, 204, 0).await;
    mount_upload(&server, 7, uploaded_asset_json(21)).await;

    let config = config_for(&server, dir.path());
    let output = OutputManager::default();
    let result = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap();

    assert_eq!(result.assets_deleted, 2);
}

#[tokio::test]
async fn failed_delete_stops_before_upload() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    mount_existing_release(
        &server,
        json!([
            {"id": 11, "name": "SplashtopStreamer.dmg"},
            {"id": 12, "name": "SplashtopStreamer.dmg"}
        ]),
    )
    .await;
    mount_delete(&server, 11, 204, 1).await;
    mount_delete(&server, 12, 500, 1).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server, dir.path());
    let output = OutputManager::default();
    let err = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap_err();

    match err {
        PublishError::GitHub(GitHubError::Status {
            operation, status, ..
        }) => {
            assert_eq!(operation, "delete release asset");
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failed_upload_is_fatal() {
    let server = MockServer::start().await;
    let dir = downloads_with_dmg();

    mount_existing_release(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path(format!("/uploads{}/7/assets", RELEASES_PATH)))
        .respond_with(ResponseTemplate::new(422).set_body_string("already_exists"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, dir.path());
    let output = OutputManager::default();
    let err = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap_err();

    match err {
        PublishError::GitHub(GitHubError::Status {
            operation, status, ..
        }) => {
            assert_eq!(operation, "upload release asset");
            assert_eq!(status.as_u16(), 422);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    let dir = downloads_with_dmg();

    // Bind then release a port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = PublishConfig {
        downloads_dir: Some(dir.path().to_path_buf()),
        api_base: format!("http://127.0.0.1:{port}"),
        ..Default::default()
    };
    let output = OutputManager::default();
    let err = Publisher::new(&config, &output)
        .publish(&env_with_token())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PublishError::GitHub(GitHubError::Transport {
            operation: "list releases",
            ..
        })
    ));
}
