//! Directory listing and metadata queries.

use tracing::debug;

use crate::api::Connection;
use crate::error::Result;
use crate::fs::node::{parse_directory_listing, parse_node, DirMeta, Node, RemoteRef};
use crate::http::Transport;

impl<T: Transport> Connection<T> {
    /// List a directory.
    ///
    /// Expects an IS path, e.g. `/el/fi/podzim2018/IB015/ode/hw12/`, or a
    /// directory obtained by an earlier query. Returns the directory with a
    /// single level expanded and no file contents; deeper levels need one call
    /// per child.
    ///
    /// # Errors
    /// `FileNotFound` if the path does not exist, `Api` for other server errors.
    ///
    /// # Example
    /// ```no_run
    /// # use isapi::{Connection, Credential};
    /// # async fn example() -> isapi::Result<()> {
    /// let conn = Connection::new(Credential::from_api_key("login:secret")?)?;
    /// let dir = conn.list_directory("/el/fi/podzim2018/IB015/ode/hw12/").await?;
    /// for entry in &dir.entries {
    ///     println!("{} ({})", entry.shortname(), entry.path());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_directory<'a>(&self, target: impl Into<RemoteRef<'a>>) -> Result<DirMeta> {
        let path = target.into().path();
        let raw = self.query_node(path).await?;
        let dir = parse_directory_listing(&raw);
        debug!(path, entries = dir.entries.len(), "listed directory");
        Ok(dir)
    }

    /// Get metadata of a file or directory without listing its children.
    pub async fn file_info<'a>(&self, target: impl Into<RemoteRef<'a>>) -> Result<Node> {
        let raw = self.query_node(target.into().path()).await?;
        Ok(parse_node(&raw))
    }
}
