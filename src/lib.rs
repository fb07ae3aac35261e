//! # isapi
//!
//! Rust client library for the file manager of the Masaryk University
//! information system (IS MUNI).
//!
//! ## Features
//!
//! - **Browsing**: List directories one level at a time (`list_directory`) and
//!   query metadata of a single entry (`file_info`).
//! - **Downloads**: Fetch file bytes together with charset, content type and
//!   metadata (`get_file`).
//! - **Uploads**:
//!   - Upload local files with a selectable conflict policy (`upload_file`).
//!   - `Ignore` and `UpdateIfDifferent` are decided client-side, so repeated
//!     uploads of unchanged files cost no writes.
//!   - Let the server unpack zip archives (`upload_zip`).
//! - **Folders**: Idempotent folder creation (`mkdir`) and homework drop
//!   folders with an optional submission deadline (`mkdrop`).
//!
//! Every operation accepts either a remote path or metadata returned by an
//! earlier call. Credentials are a login and secret pair, usually kept as a
//! single `login:secret` API key.
//!
//! ## Example
//!
//! ```no_run
//! use isapi::{Connection, Credential, OnConflict, UploadOptions};
//!
//! # async fn example() -> isapi::Result<()> {
//! let conn = Connection::new(Credential::from_api_key("xlogin:secret")?)?;
//!
//! let dir = conn.list_directory("/el/fi/podzim2018/IB015/ode/hw12/").await?;
//! for file in dir.files() {
//!     println!("{} {:?}", file.shortname, file.mime);
//! }
//!
//! if conn.mkdir("/el/fi/podzim2018/IB015/ode/drop/", Some("Homework Drop"), None).await? {
//!     println!("created");
//! }
//!
//! conn.upload_file(
//!     "solution.hs",
//!     "/el/fi/podzim2018/IB015/ode/drop/",
//!     UploadOptions::new().on_conflict(OnConflict::UpdateIfDifferent),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Callers without an async runtime can use the one-shot helpers in
//! [`blocking`].

pub mod api;
pub mod blocking;
pub mod config;
pub mod credential;
pub mod error;
pub mod fs;
pub mod http;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use api::Connection;
pub use config::ClientConfig;
pub use credential::Credential;
pub use error::{IsApiError, Result};
pub use fs::{
    parse_directory_listing, parse_node, CollisionCode, DirMeta, FileData, FileMeta, Node,
    OnConflict, RemoteRef, UploadOptions, ZipImportOptions,
};
pub use http::{HttpClient, RawResponse, Transport};
pub use time::{format_timestamp, parse_timestamp};
