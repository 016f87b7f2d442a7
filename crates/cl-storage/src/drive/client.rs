use crate::drive::drive_file::FileList;
use crate::{ClientError, DriveFile, DriveResult};

use cl_auth::AccessToken;
use log::debug;
use reqwest::{Client as ReqwestClient, Method, Response, StatusCode, Url};
use serde_json::{Value, json};

const FILES_PATH: &str = "/drive/v3/files";
const UPLOAD_PATH: &str = "/upload/drive/v3/files";
const LIST_FIELDS: &str = "files(id,name,modifiedTime)";
const MULTIPART_BOUNDARY: &str = "campaign_log_part";

/// HTTP client for a Drive-v3-compatible file API
pub struct DriveClient {
    pub base_url: String,
    client: ReqwestClient,
}

impl DriveClient {
    /// # Arguments
    /// * `base_url` - API origin (e.g., "https://www.googleapis.com")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    fn url(&self, path: &str) -> DriveResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ClientError::invalid_url(raw, e.to_string()))
    }

    fn request(&self, method: Method, url: Url, token: &AccessToken) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(token.secret())
    }

    /// Send and turn non-success statuses into `ClientError::Api`
    async fn execute(&self, req: reqwest::RequestBuilder) -> DriveResult<Response> {
        let response = req.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        Err(ClientError::api_error(status.as_u16(), message))
    }

    // =========================================================================
    // File Operations
    // =========================================================================

    /// First non-trashed file with exactly this name
    pub async fn find_file(&self, token: &AccessToken, name: &str) -> DriveResult<Option<DriveFile>> {
        let mut url = self.url(FILES_PATH)?;
        url.query_pairs_mut()
            .append_pair("q", &name_query(name))
            .append_pair("spaces", "drive")
            .append_pair("fields", LIST_FIELDS);

        let response = self.execute(self.request(Method::GET, url, token)).await?;
        let list: FileList = serde_json::from_str(&response.text().await?)?;
        debug!("Lookup of {name} matched {} file(s)", list.files.len());

        Ok(list.files.into_iter().next())
    }

    /// Create a file with JSON content in one multipart upload
    pub async fn create_file(
        &self,
        token: &AccessToken,
        name: &str,
        content: &str,
    ) -> DriveResult<DriveFile> {
        let mut url = self.url(UPLOAD_PATH)?;
        url.query_pairs_mut().append_pair("uploadType", "multipart");

        let metadata = json!({ "name": name, "mimeType": "application/json" });
        let body = multipart_related(&metadata.to_string(), content);

        let req = self
            .request(Method::POST, url, token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(body);
        let response = self.execute(req).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Replace the content of an existing file
    pub async fn update_file(
        &self,
        token: &AccessToken,
        id: &str,
        content: &str,
    ) -> DriveResult<DriveFile> {
        let mut url = self.url(&format!("{UPLOAD_PATH}/{id}"))?;
        url.query_pairs_mut().append_pair("uploadType", "media");

        let req = self
            .request(Method::PATCH, url, token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(content.to_string());
        let response = self.execute(req).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// File content, or `None` if the file no longer exists
    pub async fn download_file(&self, token: &AccessToken, id: &str) -> DriveResult<Option<String>> {
        let mut url = self.url(&format!("{FILES_PATH}/{id}"))?;
        url.query_pairs_mut().append_pair("alt", "media");

        match self.execute(self.request(Method::GET, url, token)).await {
            Ok(response) => Ok(Some(response.text().await?)),
            Err(ClientError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Returns whether a file was deleted
    pub async fn delete_file(&self, token: &AccessToken, id: &str) -> DriveResult<bool> {
        let url = self.url(&format!("{FILES_PATH}/{id}"))?;

        match self.execute(self.request(Method::DELETE, url, token)).await {
            Ok(_) => Ok(true),
            Err(ClientError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

/// Search expression matching one file name, with quotes escaped.
pub(crate) fn name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name='{escaped}' and trashed=false")
}

pub(crate) fn multipart_related(metadata: &str, content: &str) -> String {
    format!(
        "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n\
         --{b}\r\nContent-Type: application/json\r\n\r\n{content}\r\n\
         --{b}--",
        b = MULTIPART_BOUNDARY
    )
}
