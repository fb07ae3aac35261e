//! File manager client with request/response classification.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::{ServerMessage, NON_PERSONAL_ACCOUNT};
use super::form::Form;
use super::wire::{DirectoryResponse, RawNode};
use crate::config::ClientConfig;
use crate::credential::Credential;
use crate::error::{IsApiError, Result};
use crate::http::{HttpClient, RawResponse, Transport};

/// Directory/metadata query endpoint.
const DIRECTORY_QUERY_PATH: &str = "/auth/dok/fmgr_api";

/// Endpoint for every mutating operation.
const FILE_MANAGER_PATH: &str = "/auth/dok/rfmgr.pl";

/// Prefix under which stored files are downloadable by path.
const DOWNLOAD_PREFIX: &str = "/auth";

/// Server-side operation selected by the `op` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileManagerOp {
    /// Store an uploaded file
    Upload,
    /// Create a folder
    CreateFolder,
    /// Open the permission management view of a folder
    OpenPermissions,
    /// Add a permission grant
    AddPermission,
    /// Set per-file attributes on a folder
    SetAttributes,
    /// Unpack an uploaded zip archive into a folder
    ImportZip,
}

impl FileManagerOp {
    /// Wire code of the operation.
    pub fn code(&self) -> &'static str {
        match self {
            FileManagerOp::Upload => "vlso",
            FileManagerOp::CreateFolder => "vlsl",
            FileManagerOp::OpenPermissions => "prav",
            FileManagerOp::AddPermission => "prpr",
            FileManagerOp::SetAttributes => "atri",
            FileManagerOp::ImportZip => "imzi",
        }
    }
}

/// Authenticated connection to the IS file manager.
///
/// All file operations are methods on this type. Requests are issued one at
/// a time and never retried.
#[derive(Debug)]
pub struct Connection<T = HttpClient> {
    transport: T,
    base_url: String,
}

impl Connection<HttpClient> {
    /// Connect to the default IS instance.
    pub fn new(credential: Credential) -> Result<Self> {
        Self::with_config(credential, ClientConfig::default())
    }

    /// Connect using explicit client settings.
    pub fn with_config(credential: Credential, config: ClientConfig) -> Result<Self> {
        let transport = HttpClient::new(credential, &config)?;
        Ok(Self::with_transport(transport, config.base_url))
    }
}

impl<T: Transport> Connection<T> {
    /// Build a connection over any transport.
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn directory_query_url(&self, path: &str) -> String {
        format!(
            "{}{}?url={};format=json",
            self.base_url, DIRECTORY_QUERY_PATH, path
        )
    }

    pub(crate) fn download_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, DOWNLOAD_PREFIX, path)
    }

    fn file_manager_url(&self) -> String {
        format!("{}{}", self.base_url, FILE_MANAGER_PATH)
    }

    /// Issue an authenticated GET.
    ///
    /// Fails only on network errors; status and body are returned as-is.
    pub async fn get(&self, url: &str) -> Result<RawResponse> {
        debug!(url, "GET");
        let response = self.transport.get(url).await?;
        debug!(
            url,
            status = response.status,
            bytes = response.body.len(),
            "GET done"
        );
        Ok(response)
    }

    /// Issue an authenticated POST to the file manager and decode its reply.
    ///
    /// # Errors
    /// * `Protocol` - non-success status or a body that is not a JSON object
    /// * `Permission` - the account type may not perform mutations
    /// * `Api` - the server reported an error; carries its literal message
    pub async fn post<R: DeserializeOwned>(&self, form: Form) -> Result<R> {
        let form = form.normalized();
        let url = self.file_manager_url();
        let op = form.get("op").unwrap_or_default().to_string();
        debug!(url = %url, op = %op, "POST");

        let response = self.transport.post(&url, &form).await?;
        if !response.is_success() {
            return Err(IsApiError::Protocol(format!(
                "HTTP {} from file manager (op {})",
                response.status, op
            )));
        }

        let text = response.text();
        debug!(op = %op, bytes = text.len(), "POST done");
        let body = text.trim_start();

        if body.starts_with(NON_PERSONAL_ACCOUNT) {
            let line = body.lines().next().unwrap_or_default();
            return Err(IsApiError::Permission(line.trim().to_string()));
        }
        if !body.starts_with('{') {
            return Err(IsApiError::Protocol(format!(
                "Malformed or forbidden request (op {}): {}",
                op,
                preview(body)
            )));
        }

        let value: Value = serde_json::from_str(body)?;
        if let Some(err) = value.get("chyba") {
            let message = match err {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(IsApiError::Api(message));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Fetch the metadata node at `path` with one level of children.
    pub(crate) async fn query_node(&self, path: &str) -> Result<RawNode> {
        let response = self.get(&self.directory_query_url(path)).await?;
        let decoded: DirectoryResponse = serde_json::from_slice(&response.body)?;

        if let Some(message) = decoded.error {
            return Err(match ServerMessage::classify(&message) {
                ServerMessage::NotFound => IsApiError::FileNotFound(message),
                _ => IsApiError::Api(message),
            });
        }

        decoded
            .nodes
            .into_iter()
            .next()
            .ok_or_else(|| IsApiError::Protocol(format!("No node in listing of {}", path)))
    }
}

fn preview(body: &str) -> String {
    let mut out: String = body.chars().take(80).collect();
    if out.len() < body.len() {
        out.push_str("...");
    }
    out
}
