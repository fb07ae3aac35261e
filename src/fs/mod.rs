//! Remote file manager tree and operations.

pub mod conflict;
pub mod node;
mod operations;

pub use conflict::{CollisionCode, OnConflict};
pub use node::{
    parse_directory_listing, parse_node, DirMeta, FileData, FileMeta, Node, RemoteRef,
};
pub use operations::{UploadOptions, ZipImportOptions};
