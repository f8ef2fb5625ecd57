//! Upload relay.
//!
//! Accepts a multipart `file` upload from the browser and forwards it to the
//! configured file API with a bearer token, so the client never talks to the
//! third party directly (and never needs CORS from it). The upstream status
//! and body are passed back unchanged.
//!
//! ```text
//! OPTIONS /upload            200, CORS headers
//! POST    /upload  file=...  → POST {endpoint}
//!                               file, folderPath, options={"access": ...}
//!                               Authorization: Bearer {token}
//!                            ← upstream status + body
//! other   /upload            405 {"error": "Method not allowed"}
//! ```
//!
//! ## Size limit
//!
//! The whole multipart body, not just the `file` field, is capped at
//! `upload.max_bytes`. A declared `Content-Length` over the cap is refused
//! before reading; otherwise reading stops as soon as the cap is passed.
//! Either way the client gets 413 and nothing is relayed.
//!
//! ## Token
//!
//! Read from the environment variable named by `upload.token_env`. When that
//! is unset or empty the client's own `Authorization: Bearer ...` header is
//! relayed instead. With neither, the request fails with 500.

use crate::config::UploadConfig;
use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CONTENT_LENGTH, HeaderMap};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};
use futures_util::StreamExt;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use serde_json::json;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Server misconfigured: missing upload token")]
    MissingToken,
    #[error("No file provided")]
    NoFile,
    #[error("Invalid upload: {0}")]
    Multipart(String),
    #[error("Upload too large: limit is {limit} bytes")]
    TooLarge { limit: usize },
    #[error("Upload relay failed: {0}")]
    Relay(#[from] reqwest::Error),
}

impl UploadError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UploadError::NoFile | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::MissingToken | UploadError::Relay(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// A file received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Relays uploads to the configured endpoint.
#[derive(Debug, Clone)]
pub struct UploadRelay {
    client: reqwest::Client,
    config: UploadConfig,
}

impl UploadRelay {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Response builder with the CORS headers every upload response carries.
    fn cors(&self, status: StatusCode) -> HttpResponseBuilder {
        let mut builder = HttpResponse::build(status);
        builder
            .insert_header(("Access-Control-Allow-Origin", self.config.allowed_origin.as_str()))
            .insert_header(("Access-Control-Allow-Methods", "POST, OPTIONS"))
            .insert_header(("Access-Control-Allow-Headers", "Content-Type, Authorization"));
        builder
    }

    pub fn error_response(&self, error: &UploadError) -> HttpResponse {
        self.cors(error.status_code())
            .json(json!({ "error": error.to_string() }))
    }

    /// Token from the environment, else the client's bearer token.
    pub fn token(&self, headers: &HeaderMap) -> Option<String> {
        let from_env = env::var(&self.config.token_env).ok();
        let from_client = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        resolve_token(from_env.as_deref(), from_client)
    }

    /// Send the file upstream and return its status and body.
    pub async fn forward(
        &self,
        file: UploadedFile,
        token: &str,
    ) -> Result<(StatusCode, Vec<u8>), UploadError> {
        let part = Part::bytes(file.data)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("folderPath", self.config.folder_path.clone())
            .text("options", json!({ "access": self.config.access }).to_string());

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    async fn relay(&self, req: &HttpRequest, payload: Multipart) -> Result<HttpResponse, UploadError> {
        let token = self.token(req.headers()).ok_or(UploadError::MissingToken)?;
        let limit = self.config.max_bytes;
        if declared_length(req.headers()).is_some_and(|len| len > limit) {
            return Err(UploadError::TooLarge { limit });
        }
        let file = read_file_field(payload, limit)
            .await?
            .ok_or(UploadError::NoFile)?;
        let size = file.data.len();
        let name = file.file_name.clone();

        let (status, body) = self.forward(file, &token).await?;
        info!("Relayed upload {name:?} ({size} bytes): upstream {status}");
        Ok(self
            .cors(status)
            .content_type("application/json")
            .body(body))
    }
}

/// Pick the upload token: the configured one if non-empty, else the bearer
/// token from the client's `Authorization` header.
pub fn resolve_token(configured: Option<&str>, authorization: Option<&str>) -> Option<String> {
    if let Some(token) = configured.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }
    authorization.and_then(bearer_token).map(String::from)
}

/// Extract `<token>` from `Bearer <token>`.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    rest.split_whitespace().next()
}

/// `Content-Length` of the request, when present and numeric.
fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

/// Read the `file` field from a multipart body. Other fields are drained and
/// ignored. Fails once more than `limit` bytes of field data have been read.
async fn read_file_field(
    mut payload: Multipart,
    limit: usize,
) -> Result<Option<UploadedFile>, UploadError> {
    let mut found = None;
    let mut total = 0usize;
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Multipart(e.to_string()))?;
        let is_file = found.is_none() && field.name() == Some("file");
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
            total = total.saturating_add(chunk.len());
            if total > limit {
                return Err(UploadError::TooLarge { limit });
            }
            if is_file {
                data.extend_from_slice(&chunk);
            }
        }
        if is_file {
            found = Some(UploadedFile {
                file_name,
                content_type,
                data,
            });
        }
    }
    Ok(found)
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn proxy_upload(
    req: HttpRequest,
    payload: Multipart,
    relay: web::Data<UploadRelay>,
) -> HttpResponse {
    match relay.relay(&req, payload).await {
        Ok(response) => response,
        Err(e) => {
            match &e {
                UploadError::Relay(_) => warn!("{e}"),
                _ => debug!("Rejected upload: {e}"),
            }
            relay.error_response(&e)
        }
    }
}

pub async fn preflight(relay: web::Data<UploadRelay>) -> HttpResponse {
    relay.cors(StatusCode::OK).finish()
}

pub async fn method_not_allowed(relay: web::Data<UploadRelay>) -> HttpResponse {
    relay
        .cors(StatusCode::METHOD_NOT_ALLOWED)
        .json(json!({ "error": "Method not allowed" }))
}
