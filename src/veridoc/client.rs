//! Remote API client for the verification backend.
//!
//! An explicit client object rather than a singleton: constructed from a
//! base URL (see [`crate::config::VeridocConfig`]) and an optional bearer
//! token, passed to whoever needs it. Every call is request/response; a
//! non-2xx answer surfaces the backend's `detail` message when the body
//! carries one, and transport failures become error strings. Nothing in
//! here panics across the CLI boundary.

use crate::error::{Result, VeridocError};
use crate::model::{AuthSession, UserProfile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
    token: Option<String>,
}

/// `POST /auth/login` and `POST /auth/register` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_id: i64,
    pub email: String,
    pub username: String,
}

impl AuthResponse {
    pub fn into_session(self) -> AuthSession {
        AuthSession {
            user: UserProfile {
                id: self.user_id,
                email: self.email,
                username: self.username,
            },
            token: self.access_token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDocument {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_size: u64,
    pub file_type: String,
    pub file_hash: String,
    pub ipfs_hash: Option<String>,
    pub blockchain_tx_hash: Option<String>,
    pub is_verified: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteVerification {
    pub id: i64,
    pub document_id: i64,
    pub verification_type: String,
    pub status: String,
    pub blockchain_tx_hash: Option<String>,
    pub ipfs_hash: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationHistoryResponse {
    pub verifications: Vec<RemoteVerification>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| VeridocError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- Authentication ---

    /// `POST /auth/login`. Credentials go form-encoded with the email in
    /// the `username` field, as the backend's token endpoint expects. The
    /// token is retained for subsequent authenticated calls.
    pub fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(%url, "login");
        let response = self
            .client
            .post(&url)
            .form(&[("username", email), ("password", password)])
            .send()
            .map_err(transport_error)?;
        let auth: AuthResponse = read_json(response)?;
        self.token = Some(auth.access_token.clone());
        Ok(auth)
    }

    /// `POST /auth/register`. Also retains the returned token.
    pub fn register(&mut self, req: &RegisterRequest) -> Result<AuthResponse> {
        let auth: AuthResponse = self.post_json("/auth/register", req)?;
        self.token = Some(auth.access_token.clone());
        Ok(auth)
    }

    pub fn current_user(&self) -> Result<RemoteUser> {
        self.get("/auth/me")
    }

    // --- Documents ---

    /// `POST /documents/upload` (multipart).
    pub fn upload_document(
        &self,
        file: &Path,
        title: &str,
        description: Option<&str>,
    ) -> Result<RemoteDocument> {
        let url = format!("{}/documents/upload", self.base_url);
        debug!(%url, "upload document");

        let mut form = reqwest::blocking::multipart::Form::new()
            .file("file", file)
            .map_err(VeridocError::Io)?
            .text("title", title.to_string());
        if let Some(desc) = description {
            form = form.text("description", desc.to_string());
        }

        let mut request = self.client.post(&url).multipart(form);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().map_err(transport_error)?;
        read_json(response)
    }

    pub fn get_documents(&self) -> Result<Vec<RemoteDocument>> {
        self.get("/documents/")
    }

    pub fn get_document(&self, id: i64) -> Result<RemoteDocument> {
        self.get(&format!("/documents/{}", id))
    }

    pub fn delete_document(&self, id: i64) -> Result<()> {
        let url = format!("{}/documents/{}", self.base_url, id);
        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .map_err(transport_error)?;
        check_status(response).map(|_| ())
    }

    pub fn verify_document(&self, id: i64) -> Result<serde_json::Value> {
        self.post_empty(&format!("/documents/{}/verify", id))
    }

    // --- Verification ---

    pub fn verification_history(&self) -> Result<VerificationHistoryResponse> {
        self.get("/verification/history")
    }

    pub fn document_verifications(&self, document_id: i64) -> Result<Vec<RemoteVerification>> {
        self.get(&format!("/verification/document/{}", document_id))
    }

    pub fn verify_on_blockchain(&self, document_id: i64) -> Result<serde_json::Value> {
        self.post_empty(&format!("/verification/verify-blockchain/{}", document_id))
    }

    pub fn verification_stats(&self) -> Result<serde_json::Value> {
        self.get("/verification/stats")
    }

    // --- User profile ---

    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<RemoteUser> {
        let url = format!("{}/users/profile", self.base_url);
        let response = self
            .authorized(self.client.put(&url).json(update))
            .send()
            .map_err(transport_error)?;
        read_json(response)
    }

    pub fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        let url = format!("{}/users/change-password", self.base_url);
        let body = serde_json::json!({
            "current_password": current_password,
            "new_password": new_password,
        });
        let response = self
            .authorized(self.client.post(&url).json(&body))
            .send()
            .map_err(transport_error)?;
        check_status(response).map(|_| ())
    }

    pub fn delete_account(&self) -> Result<()> {
        let url = format!("{}/users/account", self.base_url);
        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .map_err(transport_error)?;
        check_status(response).map(|_| ())
    }

    pub fn health(&self) -> Result<serde_json::Value> {
        self.get("/health")
    }

    // --- Plumbing ---

    fn authorized(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .map_err(transport_error)?;
        read_json(response)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, endpoint: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "POST");
        let response = self
            .authorized(self.client.post(&url).json(body))
            .send()
            .map_err(transport_error)?;
        read_json(response)
    }

    fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "POST");
        let response = self
            .authorized(self.client.post(&url))
            .send()
            .map_err(transport_error)?;
        read_json(response)
    }
}

fn transport_error(e: reqwest::Error) -> VeridocError {
    if e.is_connect() {
        VeridocError::Http(format!("Could not reach the backend: {}", e))
    } else if e.is_timeout() {
        VeridocError::Http(format!(
            "Request timed out after {}s",
            REQUEST_TIMEOUT_SECS
        ))
    } else {
        VeridocError::Http(e.to_string())
    }
}

fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(VeridocError::Http(error_message(status.as_u16(), &body)))
}

fn read_json<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
    let response = check_status(response)?;
    response
        .json()
        .map_err(|e| VeridocError::Http(format!("Malformed response: {}", e)))
}

/// Prefer the backend's `detail` field; fall back to a generic status line.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    format!("HTTP error! status: {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn error_message_prefers_detail_field() {
        let msg = error_message(401, r#"{"detail": "Incorrect email or password"}"#);
        assert_eq!(msg, "Incorrect email or password");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(error_message(500, "<html>oops</html>"), "HTTP error! status: 500");
        assert_eq!(error_message(404, r#"{"other": 1}"#), "HTTP error! status: 404");
    }

    #[test]
    fn auth_response_becomes_a_session() {
        let auth = AuthResponse {
            access_token: "tok".into(),
            token_type: "bearer".into(),
            user_id: 3,
            email: "a@b.c".into(),
            username: "abc".into(),
        };
        let session = auth.into_session();
        assert_eq!(session.token, "tok");
        assert_eq!(session.user.username, "abc");
    }
}
