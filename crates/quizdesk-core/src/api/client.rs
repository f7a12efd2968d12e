//! API client for communicating with the quiz platform REST API.
//!
//! `ApiClient` owns the two interceptors every backend call passes through:
//! the request side reads the token store and attaches a bearer credential,
//! the response side detects a dead session and fires the injected
//! `AuthFailureHandler` before handing the error back to the caller.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, multipart, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::TokenStore;

use super::{ApiError, ApiResult};

// ============================================================================
// Constants
// ============================================================================

/// Versioned prefix shared by every backend endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// HTTP request timeout in seconds.
/// Uploads of chapter videos go through the same client, so this is generous.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Side effect run by the response interceptor when the backend rejects the
/// session (401, or an error payload carrying the invalid-token marker).
///
/// Runs once per rejected response, before the error is returned.
pub trait AuthFailureHandler: Send + Sync {
    fn session_rejected(&self);
}

/// Folder under `/uploads` where the backend serves each kind of file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Video,
    Document,
    Image,
}

impl UploadKind {
    fn folder(&self) -> &'static str {
        match self {
            UploadKind::Video => "videos",
            UploadKind::Document => "documents",
            UploadKind::Image => "images",
        }
    }
}

/// API client for the quiz platform backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
    tokens: Arc<dyn TokenStore>,
    on_auth_failure: Arc<dyn AuthFailureHandler>,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url` (scheme + host, no path).
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        on_auth_failure: Arc<dyn AuthFailureHandler>,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            tokens,
            on_auth_failure,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL of an uploaded file stored by the backend.
    pub fn upload_url(&self, kind: UploadKind, file: &str) -> String {
        format!("{}/uploads/{}/{}", self.base_url, kind.folder(), file)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    // ===== Interceptors =====

    /// Request interceptor: attach the stored token, if any.
    fn auth_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.tokens.get() {
            match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored token is not a valid header value, sending request without it"),
            }
        }
        headers
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, url = %url, "Sending request");
        self.client.request(method, url).headers(self.auth_headers())
    }

    /// Response interceptor: pass success through, otherwise build the error,
    /// run the auth-failure side effect when the session is dead, and return
    /// the error either way.
    async fn intercept(&self, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status, &body);

        if error.is_auth_failure() {
            warn!(%status, "Session invalid or expired, logging out");
            self.on_auth_failure.session_rejected();
        } else {
            debug!(%status, error = %error, "Request failed");
        }

        Err(error)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        self.intercept(response).await
    }

    async fn read_json(response: Response) -> ApiResult<serde_json::Value> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Malformed JSON: {}", e)))
    }

    /// Pull the payload out of a `{ "data": ... }` envelope, falling back to
    /// the whole body for endpoints that answer with a bare payload.
    pub(crate) fn unwrap_data<T: DeserializeOwned>(value: serde_json::Value) -> ApiResult<T> {
        let payload = match value {
            serde_json::Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or(serde_json::Value::Null)
            }
            other => other,
        };
        serde_json::from_value(payload)
            .map_err(|e| ApiError::InvalidResponse(format!("Unexpected payload: {}", e)))
    }

    // ===== Verbs =====

    pub(crate) async fn get_value(&self, path: &str) -> ApiResult<serde_json::Value> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::read_json(response).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        Self::unwrap_data(self.get_value(path).await?)
    }

    pub(crate) async fn post_value<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<serde_json::Value> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::read_json(response).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send(self.request(Method::PUT, path).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    pub(crate) async fn post_multipart(&self, path: &str, form: multipart::Form) -> ApiResult<()> {
        self.send(self.request(Method::POST, path).multipart(form)).await?;
        Ok(())
    }

    /// Read a local file into a multipart part named after the file.
    pub(crate) async fn file_part(path: &Path) -> ApiResult<multipart::Part> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Upload {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(path))
            .map_err(ApiError::from)
    }
}

/// Content type for an upload, by extension.
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use std::path::PathBuf;

    struct Ignore;

    impl AuthFailureHandler for Ignore {
        fn session_rejected(&self) {}
    }

    fn client_with(token: Option<&str>) -> ApiClient {
        let store = Arc::new(MemoryTokenStore::new(token.map(str::to_string)));
        ApiClient::new("http://localhost:5000/", store, Arc::new(Ignore))
            .expect("client should build")
    }

    #[test]
    fn test_url_building() {
        let api = client_with(None);
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(api.url("/subjects"), "http://localhost:5000/api/v1/subjects");
        assert_eq!(
            api.upload_url(UploadKind::Document, "bab1.pdf"),
            "http://localhost:5000/uploads/documents/bab1.pdf"
        );
    }

    #[test]
    fn test_auth_headers_follow_token_store() {
        let api = client_with(Some("abc.def"));
        let headers = api.auth_headers();
        assert_eq!(
            headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc.def")
        );

        let api = client_with(None);
        assert!(api.auth_headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_unwrap_data_envelope_and_bare() {
        let wrapped = serde_json::json!({ "success": true, "data": [1, 2, 3] });
        let values: Vec<u32> = ApiClient::unwrap_data(wrapped).expect("wrapped payload");
        assert_eq!(values, vec![1, 2, 3]);

        let bare = serde_json::json!([4, 5]);
        let values: Vec<u32> = ApiClient::unwrap_data(bare).expect("bare payload");
        assert_eq!(values, vec![4, 5]);

        let wrong = serde_json::json!({ "data": "nope" });
        assert!(ApiClient::unwrap_data::<Vec<u32>>(wrong).is_err());
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(&PathBuf::from("intro.MP4")), "video/mp4");
        assert_eq!(mime_for(&PathBuf::from("materi.pdf")), "application/pdf");
        assert_eq!(mime_for(&PathBuf::from("banner.jpeg")), "image/jpeg");
        assert_eq!(mime_for(&PathBuf::from("noext")), "application/octet-stream");
    }
}
