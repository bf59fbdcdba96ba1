//! Runner integration: configuration file → context → pass against a mocked
//! tenant.

use std::io::Write;

use chrono::{Duration, SecondsFormat, Utc};
use presencesync_cli::{run, Args};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(dir: &tempfile::TempDir, server: &MockServer) -> std::path::PathBuf {
    let path = dir.path().join("presencesync.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"
[tenant]
tenant_id = "contoso"
app_id = "app-123"
app_secret = "s3cret"

[graph]
base_url = "{uri}/v1.0"
authority_url = "{uri}"
page_delay_seconds = 0

[window]
marker_subject = "Focus"
"#,
        uri = server.uri()
    )
    .unwrap();
    path
}

async fn mount_tenant(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/contoso/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "tok"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "u1", "displayName": "Ada"}]
        })))
        .mount(server)
        .await;

    let start = Utc::now() + Duration::minutes(2);
    let end = start + Duration::minutes(25);
    Mock::given(method("GET"))
        .and(path("/v1.0/users/u1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "id": "evt-1",
                "subject": "Focus",
                "start": {
                    "dateTime": start.naive_utc().format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
                    "timeZone": "UTC"
                },
                "end": {
                    "dateTime": end.to_rfc3339_opts(SecondsFormat::Secs, true),
                    "timeZone": "UTC"
                },
                "originalStartTimeZone": "Tokyo Standard Time"
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn live_run_sets_presence() {
    let server = MockServer::start().await;
    mount_tenant(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1.0/users/u1/presence/setPresence"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let args = Args { config: Some(write_config(&dir, &server)), dry_run: false, json_logs: false };

    let report = run(&args).await.unwrap();
    assert_eq!(report.dispatched, 1);
    assert!(report.is_clean());
}

#[tokio::test]
async fn dry_run_never_posts_presence() {
    let server = MockServer::start().await;
    mount_tenant(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1.0/users/u1/presence/setPresence"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let args = Args { config: Some(write_config(&dir, &server)), dry_run: true, json_logs: false };

    let report = run(&args).await.unwrap();
    assert_eq!(report.dry_run_actions, 1);
    assert_eq!(report.dispatched, 0);
}

#[tokio::test]
async fn refused_token_fails_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/contoso/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"})))
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let args = Args { config: Some(write_config(&dir, &server)), dry_run: false, json_logs: false };

    let err = run(&args).await.unwrap_err();
    assert!(format!("{err:#}").contains("invalid_client"));
}
