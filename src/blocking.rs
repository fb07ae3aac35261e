//! Synchronous one-shot wrappers for callers without an async runtime.
//!
//! Each call builds a current-thread runtime and a fresh [`Connection`];
//! use the async API directly for more than a handful of requests.

use tokio::runtime::{Builder, Runtime};

use crate::api::Connection;
use crate::config::ClientConfig;
use crate::credential::Credential;
use crate::error::Result;
use crate::fs::{DirMeta, FileData};

fn runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

/// Blocking [`Connection::list_directory`] against the default IS instance.
pub fn list_directory(path: &str, credential: Credential) -> Result<DirMeta> {
    list_directory_with_config(path, credential, ClientConfig::default())
}

/// Blocking [`Connection::list_directory`] with explicit client settings.
pub fn list_directory_with_config(
    path: &str,
    credential: Credential,
    config: ClientConfig,
) -> Result<DirMeta> {
    let conn = Connection::with_config(credential, config)?;
    runtime()?.block_on(conn.list_directory(path))
}

/// Blocking [`Connection::get_file`] against the default IS instance.
pub fn get_file(path: &str, credential: Credential) -> Result<FileData> {
    get_file_with_config(path, credential, ClientConfig::default())
}

/// Blocking [`Connection::get_file`] with explicit client settings.
pub fn get_file_with_config(
    path: &str,
    credential: Credential,
    config: ClientConfig,
) -> Result<FileData> {
    let conn = Connection::with_config(credential, config)?;
    runtime()?.block_on(conn.get_file(path))
}
