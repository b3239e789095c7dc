//! Google Drive v3 transport over reqwest.
//!
//! Authenticates every request with a caller-supplied OAuth access token.
//! Acquiring and refreshing that token happens elsewhere.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::drive::transport::DriveTransport;
use crate::types::drive::{AppProperties, FileMetadata, FileQuery, NewFile, APP_DATA_FOLDER};
use crate::types::errors::DriveError;
use crate::types::settings::DriveSettings;

const LIST_FIELDS: &str = "files(id,name,mimeType,size,modifiedTime,appProperties)";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileMetadata>,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

/// Drive transport talking to the Google Drive REST API.
pub struct GoogleDriveClient {
    client: Client,
    access_token: String,
    api_base_url: String,
    upload_base_url: String,
}

impl GoogleDriveClient {
    pub fn new(access_token: &str, settings: &DriveSettings) -> Result<Self, DriveError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(network_error)?;
        Ok(Self {
            client,
            access_token: access_token.to_string(),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            upload_base_url: settings.upload_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn file_url(&self, file_id: &str) -> String {
        format!("{}/files/{}", self.api_base_url, file_id)
    }

    fn upload_url(&self, file_id: Option<&str>) -> String {
        match file_id {
            Some(id) => format!("{}/files/{}", self.upload_base_url, id),
            None => format!("{}/files", self.upload_base_url),
        }
    }
}

#[async_trait]
impl DriveTransport for GoogleDriveClient {
    async fn list_files(&self, query: &FileQuery) -> Result<Vec<FileMetadata>, DriveError> {
        let q = render_query(query);
        let spaces = if query.parent == APP_DATA_FOLDER { APP_DATA_FOLDER } else { "drive" };
        let page_size = query.page_size.to_string();
        debug!(q = %q, "listing drive files");

        let response = self
            .client
            .get(format!("{}/files", self.api_base_url))
            .bearer_auth(&self.access_token)
            .query(&[
                ("spaces", spaces),
                ("q", q.as_str()),
                ("fields", LIST_FIELDS),
                ("pageSize", page_size.as_str()),
                ("orderBy", "modifiedTime desc"),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let list: FileList = check_status(response, "file list")
            .await?
            .json()
            .await
            .map_err(|e| DriveError::ApiError(format!("file list: {}", e)))?;
        Ok(list.files)
    }

    async fn create_file(&self, file: NewFile) -> Result<String, DriveError> {
        let metadata = json!({
            "name": file.name,
            "parents": [file.parent],
            "mimeType": file.mime_type,
            "appProperties": file.app_properties,
        });
        let (content_type, body) = multipart_related(&metadata, &file.mime_type, &file.body);

        let response = self
            .client
            .post(self.upload_url(None))
            .bearer_auth(&self.access_token)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(network_error)?;

        let created: CreatedFile = check_status(response, "file create")
            .await?
            .json()
            .await
            .map_err(|e| DriveError::ApiError(format!("file create: {}", e)))?;
        Ok(created.id)
    }

    async fn update_file(
        &self,
        file_id: &str,
        body: Option<Vec<u8>>,
        app_properties: Option<AppProperties>,
    ) -> Result<(), DriveError> {
        if let Some(body) = body {
            let response = self
                .client
                .patch(self.upload_url(Some(file_id)))
                .bearer_auth(&self.access_token)
                .query(&[("uploadType", "media")])
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .map_err(network_error)?;
            check_status(response, file_id).await?;
        }

        if let Some(props) = app_properties {
            let response = self
                .client
                .patch(self.file_url(file_id))
                .bearer_auth(&self.access_token)
                .query(&[("fields", "id")])
                .json(&json!({ "appProperties": props }))
                .send()
                .await
                .map_err(network_error)?;
            check_status(response, file_id).await?;
        }
        Ok(())
    }

    async fn get_file_content(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        let response = self
            .client
            .get(self.file_url(file_id))
            .bearer_auth(&self.access_token)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(network_error)?;

        let mut response = check_status(response, file_id).await?;
        let mut content = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(network_error)? {
            content.extend_from_slice(&chunk);
        }
        Ok(content)
    }
}

/// Renders a [`FileQuery`] as a Drive `q` search expression.
pub fn render_query(query: &FileQuery) -> String {
    let mut clauses = Vec::new();
    if let Some(name) = &query.name {
        clauses.push(format!("name='{}'", escape_literal(name)));
    }
    clauses.push(format!("'{}' in parents", escape_literal(&query.parent)));
    for (key, value) in &query.app_properties {
        clauses.push(format!(
            "appProperties has {{ key='{}' and value='{}' }}",
            escape_literal(key),
            escape_literal(value)
        ));
    }
    if !query.include_trashed {
        clauses.push("trashed = false".to_string());
    }
    clauses.join(" and ")
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn multipart_related(metadata: &serde_json::Value, mime_type: &str, body: &[u8]) -> (String, Vec<u8>) {
    let boundary = format!("bookmark-saga-{}", Uuid::new_v4().simple());
    let mut out = format!(
        "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{meta}\r\n--{b}\r\nContent-Type: {mime}\r\n\r\n",
        b = boundary,
        meta = metadata,
        mime = mime_type,
    )
    .into_bytes();
    out.extend_from_slice(body);
    out.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (format!("multipart/related; boundary={}", boundary), out)
}

async fn check_status(response: Response, subject: &str) -> Result<Response, DriveError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            DriveError::AuthFailed(format!("{}: HTTP {}", subject, status))
        }
        StatusCode::NOT_FOUND => DriveError::NotFound(subject.to_string()),
        _ => DriveError::ApiError(format!("{}: HTTP {}: {}", subject, status, detail)),
    })
}

fn network_error(err: reqwest::Error) -> DriveError {
    DriveError::NetworkError(err.to_string())
}
