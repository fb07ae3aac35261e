//! Folder creation and drop-folder setup.

use chrono::{DateTime, TimeZone};
use tracing::{debug, info};

use super::utils::split_parent;
use crate::api::wire::{Ack, PermissionView};
use crate::api::{Connection, FileManagerOp, Form, ServerMessage};
use crate::error::{IsApiError, Result};
use crate::http::Transport;
use crate::time::format_timestamp;

impl<T: Transport> Connection<T> {
    /// Create a folder.
    ///
    /// Returns `false` without error if a folder with the same short or long
    /// name already exists in the parent.
    ///
    /// # Arguments
    /// * `path` - Full path of the new folder; trailing slashes are ignored
    /// * `long_name` - Display name
    /// * `description` - Folder description
    pub async fn mkdir(
        &self,
        path: &str,
        long_name: Option<&str>,
        description: Option<&str>,
    ) -> Result<bool> {
        let (parent, shortname) =
            split_parent(path).ok_or_else(|| IsApiError::InvalidPath(path.to_string()))?;

        debug!(parent = %parent, shortname, "creating folder");
        let form = Form::op(FileManagerOp::CreateFolder)
            .field("furl", parent.as_str())
            .field("zkratka", shortname)
            .optional("nazev", long_name)
            .optional("popis", description);

        match self.post::<Ack>(form).await {
            Ok(_) => Ok(true),
            Err(IsApiError::Api(message))
                if ServerMessage::classify(&message) == ServerMessage::AlreadyExists =>
            {
                info!(path, "folder already exists");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Create a homework drop folder.
    ///
    /// After creating the folder, optionally limits the current write grant to
    /// `deadline` and turns on submitter surname and UČO prefixes and change
    /// notifications. An existing folder is left untouched and `false` is
    /// returned.
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Local, TimeZone};
    /// # use isapi::{Connection, Credential};
    /// # async fn example() -> isapi::Result<()> {
    /// let conn = Connection::new(Credential::from_api_key("login:secret")?)?;
    /// let deadline = Local.with_ymd_and_hms(2018, 12, 24, 23, 59, 0).unwrap();
    /// conn.mkdrop(
    ///     "/el/fi/podzim2018/IB015/ode/drop/",
    ///     Some("Homework Drop"),
    ///     None,
    ///     Some(deadline),
    /// )
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn mkdrop<Tz: TimeZone>(
        &self,
        path: &str,
        long_name: Option<&str>,
        description: Option<&str>,
        deadline: Option<DateTime<Tz>>,
    ) -> Result<bool> {
        if !self.mkdir(path, long_name, description).await? {
            return Ok(false);
        }
        let folder = match split_parent(path) {
            Some((parent, shortname)) => format!("{}{}/", parent, shortname),
            None => return Err(IsApiError::InvalidPath(path.to_string())),
        };

        let view: PermissionView = self
            .post(Form::op(FileManagerOp::OpenPermissions).field("furl", folder.as_str()))
            .await?;

        if let Some(deadline) = deadline {
            let mode = view.write_mode.ok_or_else(|| {
                IsApiError::Protocol(format!("no write permission mode offered for {}", folder))
            })?;
            let grant = format!("{}{}", mode, format_timestamp(&deadline));
            debug!(folder = %folder, grant = %grant, "limiting write permission");
            let _: Ack = self
                .post(
                    Form::op(FileManagerOp::AddPermission)
                        .field("furl", folder.as_str())
                        .field("pravo", grant),
                )
                .await?;
        }

        let _: Ack = self
            .post(
                Form::op(FileManagerOp::SetAttributes)
                    .field("furl", folder.as_str())
                    .field("pripojit_prijmeni", "a")
                    .field("pripojit_uco", "a")
                    .field("sledovat", "a"),
            )
            .await?;
        Ok(true)
    }
}
