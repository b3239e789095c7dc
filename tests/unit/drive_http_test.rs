//! Unit tests for the Google Drive transport against a local mock server.
//!
//! Covers the endpoints and query parameters of every transport call and the
//! mapping of HTTP statuses onto `DriveError`.

use bookmark_saga::drive::http::render_query;
use bookmark_saga::drive::{DriveTransport, GoogleDriveClient};
use bookmark_saga::types::drive::{AppProperties, FileQuery, NewFile, APP_DATA_FOLDER};
use bookmark_saga::types::errors::DriveError;
use bookmark_saga::types::settings::DriveSettings;
use mockito::{Matcher, Server, ServerGuard};
use rstest::rstest;
use serde_json::json;

const TOKEN: &str = "test-token";

fn client_for(server: &ServerGuard) -> GoogleDriveClient {
    let settings = DriveSettings {
        api_base_url: server.url(),
        upload_base_url: format!("{}/upload/", server.url()),
        ..DriveSettings::default()
    };
    GoogleDriveClient::new(TOKEN, &settings).unwrap()
}

fn saga_properties() -> AppProperties {
    let mut props = AppProperties::new();
    props.insert("app".to_string(), "bookmark-saga".to_string());
    props
}

fn kind(err: &DriveError) -> &'static str {
    match err {
        DriveError::NetworkError(_) => "network",
        DriveError::AuthFailed(_) => "auth",
        DriveError::NotFound(_) => "not-found",
        DriveError::ApiError(_) => "api",
    }
}

// ─── list_files ───

#[tokio::test]
async fn test_list_files_sends_app_data_query() {
    let mut server = Server::new_async().await;
    let query = FileQuery::in_app_data(100)
        .named("bookmark-saga-settings.json")
        .with_app_properties(&saga_properties());

    let mock = server
        .mock("GET", "/files")
        .match_header("authorization", "Bearer test-token")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("spaces".into(), APP_DATA_FOLDER.into()),
            Matcher::UrlEncoded("q".into(), render_query(&query)),
            Matcher::UrlEncoded(
                "fields".into(),
                "files(id,name,mimeType,size,modifiedTime,appProperties)".into(),
            ),
            Matcher::UrlEncoded("pageSize".into(), "100".into()),
            Matcher::UrlEncoded("orderBy".into(), "modifiedTime desc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"files": [{
                "id": "f1",
                "name": "bookmark-saga-settings.json",
                "size": "2",
                "appProperties": {"app": "bookmark-saga"}
            }]})
            .to_string(),
        )
        .create_async()
        .await;

    let files = client_for(&server).list_files(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].id, "f1");
    assert_eq!(files[0].size.as_deref(), Some("2"));
    assert_eq!(files[0].app_properties, Some(saga_properties()));
}

#[tokio::test]
async fn test_list_files_without_files_field_is_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/files")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let files = client_for(&server)
        .list_files(&FileQuery::in_app_data(10))
        .await
        .unwrap();
    assert!(files.is_empty());
}

// ─── create_file ───

#[tokio::test]
async fn test_create_file_uploads_multipart() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/upload/files")
        .match_header("authorization", "Bearer test-token")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/related; boundary=bookmark-saga-".to_string()),
        )
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("uploadType".into(), "multipart".into()),
            Matcher::UrlEncoded("fields".into(), "id".into()),
        ]))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""appProperties":\{"app":"bookmark-saga"\}"#.to_string()),
            Matcher::Regex(r#""parents":\["appDataFolder"\]"#.to_string()),
            Matcher::Regex(r"\r\n\[\]\r\n".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"id":"new-1"}"#)
        .create_async()
        .await;

    let id = client_for(&server)
        .create_file(NewFile {
            name: "bookmark-saga-settings.json".to_string(),
            parent: APP_DATA_FOLDER.to_string(),
            mime_type: "application/json".to_string(),
            app_properties: saga_properties(),
            body: b"[]".to_vec(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(id, "new-1");
}

// ─── update_file ───

#[tokio::test]
async fn test_update_file_patches_body_and_properties_separately() {
    let mut server = Server::new_async().await;
    let media = server
        .mock("PATCH", "/upload/files/f1")
        .match_header("authorization", "Bearer test-token")
        .match_query(Matcher::UrlEncoded("uploadType".into(), "media".into()))
        .match_body("[]")
        .with_status(200)
        .with_body(r#"{"id":"f1"}"#)
        .create_async()
        .await;
    let metadata = server
        .mock("PATCH", "/files/f1")
        .match_header("authorization", "Bearer test-token")
        .match_query(Matcher::UrlEncoded("fields".into(), "id".into()))
        .match_body(Matcher::Json(json!({"appProperties": {"app": "bookmark-saga"}})))
        .with_status(200)
        .with_body(r#"{"id":"f1"}"#)
        .create_async()
        .await;

    client_for(&server)
        .update_file("f1", Some(b"[]".to_vec()), Some(saga_properties()))
        .await
        .unwrap();

    media.assert_async().await;
    metadata.assert_async().await;
}

#[tokio::test]
async fn test_update_body_only_leaves_properties_alone() {
    let mut server = Server::new_async().await;
    let media = server
        .mock("PATCH", "/upload/files/f1")
        .match_query(Matcher::Any)
        .with_status(200)
        .create_async()
        .await;
    let metadata = server
        .mock("PATCH", "/files/f1")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    client_for(&server)
        .update_file("f1", Some(b"[]".to_vec()), None)
        .await
        .unwrap();

    media.assert_async().await;
    metadata.assert_async().await;
}

// ─── get_file_content ───

#[tokio::test]
async fn test_get_file_content_downloads_media() {
    let mut server = Server::new_async().await;
    let body = r#"[{"id":"1","title":"T","url":"https://t.dev","savedAt":"2024-01-01T00:00:00.000Z"}]"#;
    let mock = server
        .mock("GET", "/files/f1")
        .match_header("authorization", "Bearer test-token")
        .match_query(Matcher::UrlEncoded("alt".into(), "media".into()))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let content = client_for(&server).get_file_content("f1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(content, body.as_bytes());
}

// ─── Status mapping ───

#[rstest]
#[case(401, "auth")]
#[case(403, "auth")]
#[case(404, "not-found")]
#[case(429, "api")]
#[case(500, "api")]
#[tokio::test]
async fn test_http_status_maps_to_drive_error(#[case] status: usize, #[case] expected: &str) {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/files/f1")
        .match_query(Matcher::Any)
        .with_status(status)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let err = client_for(&server).get_file_content("f1").await.unwrap_err();
    assert_eq!(kind(&err), expected, "status {} gave {}", status, err);
}

#[tokio::test]
async fn test_not_found_names_the_file_and_api_error_keeps_detail() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/files/gone")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("PATCH", "/files/f1")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("backend unavailable")
        .create_async()
        .await;
    let client = client_for(&server);

    let err = client.get_file_content("gone").await.unwrap_err();
    assert_eq!(err, DriveError::NotFound("gone".to_string()));

    let err = client
        .update_file("f1", None, Some(saga_properties()))
        .await
        .unwrap_err();
    assert!(matches!(&err, DriveError::ApiError(msg) if msg.contains("backend unavailable")));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = DriveSettings {
        api_base_url: format!("http://{}", addr),
        upload_base_url: format!("http://{}/upload", addr),
        ..DriveSettings::default()
    };
    let client = GoogleDriveClient::new(TOKEN, &settings).unwrap();

    let err = client.list_files(&FileQuery::in_app_data(1)).await.unwrap_err();
    assert!(matches!(err, DriveError::NetworkError(_)));
}
