//! Drive v3 REST transport using reqwest.
//!
//! Each method performs a single request; there is no retry layer here.
//! Unauthenticated responses are translated to `AuthenticationFailed` at the
//! point of the call; every other non-success response surfaces as an API
//! error carrying the status and the server's message where one is present.

use std::time::Duration;

use chrono::DateTime;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{DriveApiConfig, DriveObject, Scope, StorageError};
use crate::ports::{CreateObject, DriveTransport, ObjectPage};

/// Sentinel mime type marking a Drive object as a folder.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
const TEXT_MIME_TYPE: &str = "text/plain";
const MULTIPART_BOUNDARY: &str = "cloudfs_meta_media";

const FILE_FIELDS: &str = "id,mimeType,name,parents,size,createdTime,modifiedTime";
const LIST_FIELDS: &str =
    "files(id,mimeType,name,parents,size,createdTime,modifiedTime),nextPageToken";

/// HTTP transport for the Google Drive v3 API.
#[derive(Clone)]
pub struct HttpDriveTransport {
    client: Client,
    api_url: Url,
    upload_url: Url,
}

impl std::fmt::Debug for HttpDriveTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDriveTransport").field("api_url", &self.api_url).finish()
    }
}

impl HttpDriveTransport {
    /// Create a transport with the given endpoint configuration.
    pub fn new(config: &DriveApiConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StorageError::Api {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(HttpDriveTransport {
            client,
            api_url: config.api_url.clone(),
            upload_url: config.upload_url.clone(),
        })
    }

    fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, StorageError> {
        let mut url = base.clone();
        {
            let mut parts = url.path_segments_mut().map_err(|_| StorageError::Api {
                message: format!("Endpoint URL cannot hold a path: {base}"),
                status: None,
            })?;
            parts.pop_if_empty();
            for segment in segments {
                parts.push(segment);
            }
        }
        Ok(url)
    }

    fn check(response: Response) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(api_error(status.as_u16(), &body))
    }

    fn send_error(error: reqwest::Error) -> StorageError {
        StorageError::Api { message: format!("HTTP request failed: {}", error), status: None }
    }

    fn parse_error(error: reqwest::Error) -> StorageError {
        StorageError::Api { message: format!("Failed to parse response: {}", error), status: None }
    }
}

/// Map a non-success Drive response to a storage error.
///
/// Drive reports credential problems both as HTTP 401 and as an error body
/// whose `error.status` is `UNAUTHENTICATED`; either marker wins over the
/// generic classification.
fn api_error(status: u16, body: &str) -> StorageError {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));
    let api_status = error.and_then(|e| e.get("status")).and_then(|s| s.as_str());
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| format!("Request failed with status {status}"));

    if status == 401 || api_status == Some("UNAUTHENTICATED") {
        return StorageError::AuthenticationFailed(message);
    }

    StorageError::Api { message, status: Some(status) }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileResource {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    parents: Vec<String>,
    #[serde(default)]
    size: Option<SizeField>,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    modified_time: Option<String>,
}

/// Drive serializes int64 fields as JSON strings; accept both forms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SizeField {
    Number(u64),
    Text(String),
}

impl SizeField {
    fn as_u64(&self) -> u64 {
        match self {
            SizeField::Number(value) => *value,
            SizeField::Text(value) => value.parse().unwrap_or(0),
        }
    }
}

fn rfc3339_ms(value: Option<String>) -> i64 {
    value
        .as_deref()
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

impl From<FileResource> for DriveObject {
    fn from(resource: FileResource) -> Self {
        DriveObject {
            is_folder: resource.mime_type == FOLDER_MIME_TYPE,
            size_bytes: resource.size.map(|s| s.as_u64()).unwrap_or(0),
            created_at_ms: rfc3339_ms(resource.created_time),
            modified_at_ms: rfc3339_ms(resource.modified_time),
            parent_id: resource.parents.into_iter().next(),
            id: resource.id,
            name: resource.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    files: Vec<FileResource>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMetadata<'a> {
    name: &'a str,
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parents: Option<Vec<&'a str>>,
}

impl<'a> CreateMetadata<'a> {
    fn for_request(request: &'a CreateObject) -> Self {
        CreateMetadata {
            name: &request.name,
            mime_type: if request.folder { FOLDER_MIME_TYPE } else { TEXT_MIME_TYPE },
            parents: request.parent.as_deref().map(|p| vec![p]),
        }
    }
}

fn multipart_body(metadata_json: &str, content: &str) -> String {
    format!(
        "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata_json}\r\n\
         --{boundary}\r\nContent-Type: {TEXT_MIME_TYPE}\r\n\r\n{content}\r\n\
         --{boundary}--",
        boundary = MULTIPART_BOUNDARY
    )
}

impl DriveTransport for HttpDriveTransport {
    fn list_objects(
        &self,
        token: &str,
        scope: Scope,
        page_token: Option<&str>,
    ) -> Result<ObjectPage, StorageError> {
        let mut url = Self::endpoint(&self.api_url, &["files"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("fields", LIST_FIELDS);
            query.append_pair("spaces", scope.space());
            if let Some(page_token) = page_token {
                query.append_pair("pageToken", page_token);
            }
        }

        let response =
            self.client.get(url).bearer_auth(token).send().map_err(Self::send_error)?;
        let list: ListResponse = Self::check(response)?.json().map_err(Self::parse_error)?;

        Ok(ObjectPage {
            objects: list.files.into_iter().map(DriveObject::from).collect(),
            next_page_token: list.next_page_token,
        })
    }

    fn get_object(&self, token: &str, id: &str) -> Result<DriveObject, StorageError> {
        let mut url = Self::endpoint(&self.api_url, &["files", id])?;
        url.query_pairs_mut().append_pair("fields", FILE_FIELDS);

        let response =
            self.client.get(url).bearer_auth(token).send().map_err(Self::send_error)?;
        let resource: FileResource = Self::check(response)?.json().map_err(Self::parse_error)?;
        Ok(resource.into())
    }

    fn get_object_content(&self, token: &str, id: &str) -> Result<String, StorageError> {
        let mut url = Self::endpoint(&self.api_url, &["files", id])?;
        url.query_pairs_mut().append_pair("alt", "media");

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, TEXT_MIME_TYPE)
            .send()
            .map_err(Self::send_error)?;
        Self::check(response)?.text().map_err(Self::parse_error)
    }

    fn create_object(
        &self,
        token: &str,
        request: &CreateObject,
        content: Option<&str>,
    ) -> Result<DriveObject, StorageError> {
        let metadata = CreateMetadata::for_request(request);

        let response = match content {
            Some(content) => {
                // Metadata and content travel in one multipart upload call.
                let metadata_json =
                    serde_json::to_string(&metadata).map_err(|e| StorageError::Api {
                        message: format!("Failed to serialize metadata: {}", e),
                        status: None,
                    })?;
                let payload = multipart_body(&metadata_json, content);

                let mut url = Self::endpoint(&self.upload_url, &["files"])?;
                url.query_pairs_mut().append_pair("uploadType", "multipart");

                self.client
                    .post(url)
                    .bearer_auth(token)
                    .header(
                        CONTENT_TYPE,
                        format!("multipart/related; boundary={MULTIPART_BOUNDARY}"),
                    )
                    .body(payload)
                    .send()
                    .map_err(Self::send_error)?
            }
            None => {
                let url = Self::endpoint(&self.api_url, &["files"])?;
                self.client
                    .post(url)
                    .bearer_auth(token)
                    .json(&metadata)
                    .send()
                    .map_err(Self::send_error)?
            }
        };

        let resource: FileResource = Self::check(response)?.json().map_err(Self::parse_error)?;
        Ok(resource.into())
    }

    fn update_object_content(
        &self,
        token: &str,
        id: &str,
        content: &str,
    ) -> Result<(), StorageError> {
        let mut url = Self::endpoint(&self.upload_url, &["files", id])?;
        url.query_pairs_mut().append_pair("uploadType", "media");

        let response = self
            .client
            .patch(url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, TEXT_MIME_TYPE)
            .body(content.to_string())
            .send()
            .map_err(Self::send_error)?;
        Self::check(response)?;
        Ok(())
    }

    fn delete_object(&self, token: &str, id: &str) -> Result<(), StorageError> {
        let url = Self::endpoint(&self.api_url, &["files", id])?;
        let response =
            self.client.delete(url).bearer_auth(token).send().map_err(Self::send_error)?;
        Self::check(response)?;
        Ok(())
    }
}
