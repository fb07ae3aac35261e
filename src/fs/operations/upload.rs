//! Upload operations with client-side conflict resolution.

use std::path::Path;

use tracing::{debug, info};

use super::utils::normalize_dir;
use crate::api::wire::Ack;
use crate::api::{Connection, FileManagerOp, Form};
use crate::error::{IsApiError, Result};
use crate::fs::conflict::{CollisionCode, OnConflict};
use crate::fs::node::{FileMeta, RemoteRef};
use crate::http::Transport;

/// Optional parameters of [`Connection::upload_file`].
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Remote file name, optionally with a subdirectory relative to the target
    /// directory; defaults to the local file name
    pub as_path: Option<String>,
    /// Long display name
    pub long_name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Policy for an existing file of the same name
    pub on_conflict: OnConflict,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_path(mut self, as_path: impl Into<String>) -> Self {
        self.as_path = Some(as_path.into());
        self
    }

    pub fn long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }
}

/// Parameters of [`Connection::upload_zip`].
#[derive(Debug, Clone)]
pub struct ZipImportOptions {
    /// Only `Error`, `Overwrite` and `Rename` are accepted
    pub on_conflict: OnConflict,
    /// Recreate the archive's directory structure instead of flattening it
    pub keep_structure: bool,
}

impl Default for ZipImportOptions {
    fn default() -> Self {
        Self {
            on_conflict: OnConflict::Error,
            keep_structure: true,
        }
    }
}

/// Where an upload lands on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UploadTarget {
    dir: String,
    file_name: String,
}

impl UploadTarget {
    fn resolve(remote_dir: &str, as_path: Option<&str>, local_name: &str) -> Result<Self> {
        let (sub_dir, file_name) = match as_path {
            Some(p) => p.rsplit_once('/').unwrap_or(("", p)),
            None => ("", local_name),
        };
        if file_name.is_empty() {
            return Err(IsApiError::InvalidPath(format!(
                "No file name in {}",
                as_path.unwrap_or(local_name)
            )));
        }

        Ok(Self {
            dir: normalize_dir(&format!("{}/{}", remote_dir, sub_dir)),
            file_name: file_name.to_string(),
        })
    }
}

fn local_file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| IsApiError::InvalidPath(path.display().to_string()))
}

/// Whether the stored name or description differ from the requested ones.
///
/// The server stores the file name as the long name when none is given, and
/// an absent description as empty.
fn metadata_differs(existing: &FileMeta, target: &UploadTarget, options: &UploadOptions) -> bool {
    let wanted_name = options.long_name.as_deref().unwrap_or(&target.file_name);
    let stored_name = existing.name.as_deref().unwrap_or(&existing.shortname);
    let wanted_description = options.description.as_deref().unwrap_or_default();
    let stored_description = existing.annotation.as_deref().unwrap_or_default();

    stored_name != wanted_name || stored_description != wanted_description
}

impl<T: Transport> Connection<T> {
    /// Upload a local file into a remote directory.
    ///
    /// `Ignore` and `UpdateIfDifferent` are decided here by listing the
    /// target directory first; the remaining policies are sent to the server
    /// as a collision code. Under `UpdateIfDifferent` an existing file is
    /// replaced when its name, description or bytes differ, which requires
    /// downloading it. Remote changes between that check and the upload are
    /// not detected.
    ///
    /// # Arguments
    /// * `local_path` - Path to the local file to upload
    /// * `remote_dir` - Remote directory to upload into
    /// * `options` - Remote name, long name, description and conflict policy
    ///
    /// # Example
    /// ```no_run
    /// # use isapi::{Connection, Credential, OnConflict, UploadOptions};
    /// # async fn example() -> isapi::Result<()> {
    /// let conn = Connection::new(Credential::from_api_key("login:secret")?)?;
    /// conn.upload_file(
    ///     "results.txt",
    ///     "/el/fi/podzim2018/IB015/ode/hw12/",
    ///     UploadOptions::new().on_conflict(OnConflict::UpdateIfDifferent),
    /// )
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_file<'a, P: AsRef<Path>>(
        &self,
        local_path: P,
        remote_dir: impl Into<RemoteRef<'a>>,
        options: UploadOptions,
    ) -> Result<()> {
        let local_path = local_path.as_ref();
        let target = UploadTarget::resolve(
            remote_dir.into().path(),
            options.as_path.as_deref(),
            local_file_name(local_path)?,
        )?;
        let data = tokio::fs::read(local_path).await?;

        let code = match options.on_conflict.collision_code() {
            Some(code) => code,
            None => match self.resolve_conflict(&target, &options, &data).await? {
                Some(code) => code,
                None => return Ok(()),
            },
        };

        debug!(
            dir = %target.dir,
            file = %target.file_name,
            collision = code.as_str(),
            bytes = data.len(),
            "uploading file"
        );
        let form = Form::op(FileManagerOp::Upload)
            .field("furl", target.dir.as_str())
            .field("jmeno_souboru", target.file_name.as_str())
            .optional("nazev", options.long_name)
            .optional("popis", options.description)
            .field("kolize", code.as_str())
            .attach("soubor", target.file_name, "application/octet-stream", data);
        let _: Ack = self.post(form).await?;
        Ok(())
    }

    /// Decide a client-side policy. `None` means the upload is unnecessary.
    async fn resolve_conflict(
        &self,
        target: &UploadTarget,
        options: &UploadOptions,
        data: &[u8],
    ) -> Result<Option<CollisionCode>> {
        let listing = self.list_directory(target.dir.as_str()).await?;
        let Some(existing) = listing.entry(&target.file_name) else {
            return Ok(Some(CollisionCode::Error));
        };

        match options.on_conflict {
            OnConflict::Ignore => {
                info!(path = existing.path(), "file exists, skipping upload");
                Ok(None)
            }
            OnConflict::UpdateIfDifferent => {
                if existing.is_directory() {
                    return Err(IsApiError::IsADirectory(existing.path().to_string()));
                }
                if metadata_differs(existing.meta(), target, options) {
                    return Ok(Some(CollisionCode::Overwrite));
                }
                let remote = self.get(&self.download_url(existing.path())).await?;
                if remote.body != data {
                    Ok(Some(CollisionCode::Overwrite))
                } else {
                    info!(path = existing.path(), "file is up to date, skipping upload");
                    Ok(None)
                }
            }
            other => Ok(other.collision_code()),
        }
    }

    /// Upload a zip archive and let the server unpack it into `remote_dir`.
    ///
    /// # Errors
    /// `InvalidArgument` for `Ignore` and `UpdateIfDifferent`, which the
    /// server cannot apply to archive members.
    pub async fn upload_zip<'a, P: AsRef<Path>>(
        &self,
        local_zip: P,
        remote_dir: impl Into<RemoteRef<'a>>,
        options: ZipImportOptions,
    ) -> Result<()> {
        let code = options.on_conflict.collision_code().ok_or_else(|| {
            IsApiError::InvalidArgument(format!(
                "{:?} is not supported for zip import",
                options.on_conflict
            ))
        })?;
        let local_zip = local_zip.as_ref();
        let file_name = local_file_name(local_zip)?.to_string();
        let dir = normalize_dir(remote_dir.into().path());
        let data = tokio::fs::read(local_zip).await?;

        debug!(dir = %dir, file = %file_name, bytes = data.len(), "importing zip");
        let form = Form::op(FileManagerOp::ImportZip)
            .field("furl", dir)
            .field("kolize", code.as_str())
            .field(
                "zachovat_strukturu",
                if options.keep_structure { "a" } else { "n" },
            )
            .attach("soubor", file_name, "application/zip", data);
        let _: Ack = self.post(form).await?;
        Ok(())
    }
}
