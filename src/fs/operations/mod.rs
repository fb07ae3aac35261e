//! File manager operations split into focused modules.

mod browse;
mod dir_ops;
mod download;
mod upload;
mod utils;

pub use upload::{UploadOptions, ZipImportOptions};
