//! Download operations.

use tracing::debug;

use crate::api::Connection;
use crate::error::{IsApiError, Result};
use crate::fs::node::{FileData, RemoteRef};
use crate::http::Transport;

impl<T: Transport> Connection<T> {
    /// Download a file together with its metadata.
    ///
    /// The download endpoint cannot report a missing path, so metadata is
    /// fetched afterwards to surface `FileNotFound`.
    ///
    /// # Errors
    /// `IsADirectory` if the path resolves to a directory, even though the
    /// byte download itself succeeded.
    pub async fn get_file<'a>(&self, target: impl Into<RemoteRef<'a>>) -> Result<FileData> {
        let path = target.into().path();
        let response = self.get(&self.download_url(path)).await?;
        let meta = self.file_info(path).await?;

        if meta.is_directory() {
            return Err(IsApiError::IsADirectory(path.to_string()));
        }

        debug!(path, bytes = response.body.len(), "downloaded file");
        Ok(FileData {
            data: response.body,
            charset: response.charset,
            content_type: response.content_type,
            meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Connection;
    use crate::error::IsApiError;
    use crate::testing::{api_error, dir_node, file_node, file_response, info, MockTransport};

    #[tokio::test]
    async fn test_get_file() {
        let transport = MockTransport::new(vec![
            file_response(b"main = pure ()", "text/x-haskell", Some("utf-8")),
            info(file_node("/el/fi/hw/", "main.hs", "text/x-haskell")),
        ]);
        let conn = Connection::with_transport(transport, "https://is.example.org");

        let file = conn.get_file("/el/fi/hw/main.hs").await.unwrap();
        assert_eq!(file.data, b"main = pure ()");
        assert_eq!(file.charset.as_deref(), Some("utf-8"));
        assert_eq!(file.content_type.as_deref(), Some("text/x-haskell"));
        assert_eq!(file.meta.shortname(), "main.hs");

        let requests = conn.transport().requests();
        assert_eq!(requests[0].url, "https://is.example.org/auth/el/fi/hw/main.hs");
        assert!(requests[1].url.contains("fmgr_api?url=/el/fi/hw/main.hs;"));
    }

    #[tokio::test]
    async fn test_get_file_on_directory() {
        let transport = MockTransport::new(vec![
            file_response(b"<html>listing</html>", "text/html", None),
            info(dir_node("/el/fi/hw/", "hw", 4)),
        ]);
        let conn = Connection::with_transport(transport, "https://is.example.org");

        let err = conn.get_file("/el/fi/hw/").await.unwrap_err();
        assert!(matches!(err, IsApiError::IsADirectory(ref p) if p == "/el/fi/hw/"));
    }

    #[tokio::test]
    async fn test_get_file_missing() {
        let transport = MockTransport::new(vec![
            file_response(b"", "text/html", None),
            api_error("Zadaný uzel neexistuje."),
        ]);
        let conn = Connection::with_transport(transport, "https://is.example.org");

        let err = conn.get_file("/el/fi/hw/gone.txt").await.unwrap_err();
        assert!(matches!(err, IsApiError::FileNotFound(_)));
    }
}
