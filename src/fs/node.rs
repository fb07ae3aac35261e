//! Metadata tree model built from file manager nodes.

use std::ops::Deref;

use chrono::{DateTime, Local};
use tracing::warn;

use crate::api::wire::RawNode;
use crate::time::parse_timestamp;

/// Metadata of a single file manager entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMeta {
    /// Canonical remote path; the stored object's path when one exists
    pub path: String,
    /// Name unique within the parent directory
    pub shortname: String,
    /// Long display name
    pub name: Option<String>,
    /// Description
    pub annotation: Option<String>,
    /// Whether the current user has marked the entry as read
    pub is_read: bool,
    /// MIME type of the stored object
    pub mime: Option<String>,
    /// Numeric id (UČO) of the author or last modifier
    pub author: Option<u64>,
    /// Time of insertion or last modification
    pub change_time: Option<DateTime<Local>>,
    /// Identifier of the stored object
    pub object_id: Option<u64>,
}

impl FileMeta {
    fn from_raw(raw: &RawNode) -> Self {
        let object = raw.object();
        if object.is_none() && raw.child_count == 0 {
            warn!(
                path = %raw.path,
                "node has neither children nor a stored object (empty directory or broken file)"
            );
        }

        let (author, changed_at) = match object {
            Some(obj) => (obj.author, obj.inserted_at.as_deref()),
            None => (raw.changed_by, raw.changed_at.as_deref()),
        };
        let object_name = object.and_then(|o| o.file_name.clone());

        Self {
            path: object
                .and_then(|o| o.path.clone())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| raw.path.clone()),
            shortname: object_name
                .clone()
                .unwrap_or_else(|| raw.shortname.clone()),
            name: raw.name.clone().or(object_name),
            annotation: raw.annotation.clone(),
            is_read: raw.read != 0,
            mime: object.and_then(|o| o.mime.clone()),
            author,
            change_time: changed_at.and_then(|ts| change_time(&raw.path, ts)),
            object_id: object.and_then(|o| o.object_id),
        }
    }

    pub fn is_directory(&self) -> bool {
        false
    }
}

fn change_time(path: &str, raw: &str) -> Option<DateTime<Local>> {
    match parse_timestamp(raw) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!(path, error = %e, "ignoring unparseable change time");
            None
        }
    }
}

/// Metadata of a directory with (at most) one expanded level of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct DirMeta {
    pub meta: FileMeta,
    /// Number of children reported by the server
    pub child_count: u64,
    /// Children, in server order; their own entries are not expanded
    pub entries: Vec<Node>,
}

impl DirMeta {
    fn from_raw(raw: &RawNode) -> Self {
        Self {
            meta: FileMeta::from_raw(raw),
            child_count: raw.child_count,
            entries: Vec::new(),
        }
    }

    fn append(&mut self, raw: &RawNode) {
        self.entries.push(parse_node(raw));
    }

    pub fn is_directory(&self) -> bool {
        true
    }

    /// Find a direct child by short name.
    pub fn entry(&self, shortname: &str) -> Option<&Node> {
        self.entries.iter().find(|e| e.shortname() == shortname)
    }

    pub fn files(&self) -> impl Iterator<Item = &FileMeta> {
        self.entries.iter().filter_map(Node::as_file)
    }

    pub fn dirs(&self) -> impl Iterator<Item = &DirMeta> {
        self.entries.iter().filter_map(Node::as_dir)
    }
}

impl Deref for DirMeta {
    type Target = FileMeta;

    fn deref(&self) -> &FileMeta {
        &self.meta
    }
}

/// A parsed file manager entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    File(FileMeta),
    Dir(DirMeta),
}

impl Node {
    /// Metadata shared by files and directories.
    pub fn meta(&self) -> &FileMeta {
        match self {
            Node::File(meta) => meta,
            Node::Dir(dir) => &dir.meta,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Dir(_))
    }

    pub fn path(&self) -> &str {
        &self.meta().path
    }

    pub fn shortname(&self) -> &str {
        &self.meta().shortname
    }

    pub fn as_file(&self) -> Option<&FileMeta> {
        match self {
            Node::File(meta) => Some(meta),
            Node::Dir(_) => None,
        }
    }

    pub fn as_dir(&self) -> Option<&DirMeta> {
        match self {
            Node::Dir(dir) => Some(dir),
            Node::File(_) => None,
        }
    }
}

/// A remote location given either as a path or as previously fetched metadata.
#[derive(Debug, Clone, Copy)]
pub enum RemoteRef<'a> {
    Path(&'a str),
    Meta(&'a FileMeta),
}

impl<'a> RemoteRef<'a> {
    /// Canonical remote path of the reference.
    pub fn path(&self) -> &'a str {
        match *self {
            RemoteRef::Path(path) => path,
            RemoteRef::Meta(meta) => &meta.path,
        }
    }
}

impl<'a> From<&'a str> for RemoteRef<'a> {
    fn from(path: &'a str) -> Self {
        RemoteRef::Path(path)
    }
}

impl<'a> From<&'a String> for RemoteRef<'a> {
    fn from(path: &'a String) -> Self {
        RemoteRef::Path(path)
    }
}

impl<'a> From<&'a FileMeta> for RemoteRef<'a> {
    fn from(meta: &'a FileMeta) -> Self {
        RemoteRef::Meta(meta)
    }
}

impl<'a> From<&'a DirMeta> for RemoteRef<'a> {
    fn from(dir: &'a DirMeta) -> Self {
        RemoteRef::Meta(&dir.meta)
    }
}

impl<'a> From<&'a Node> for RemoteRef<'a> {
    fn from(node: &'a Node) -> Self {
        RemoteRef::Meta(node.meta())
    }
}

/// Downloaded file content with its metadata.
#[derive(Debug, Clone)]
pub struct FileData {
    pub data: Vec<u8>,
    /// Character set from the response headers
    pub charset: Option<String>,
    /// MIME type from the response headers
    pub content_type: Option<String>,
    pub meta: Node,
}

/// Parse a raw node without expanding its children.
///
/// Nodes reporting children become directories; everything else is a file.
pub fn parse_node(raw: &RawNode) -> Node {
    if raw.child_count == 0 {
        Node::File(FileMeta::from_raw(raw))
    } else {
        Node::Dir(DirMeta::from_raw(raw))
    }
}

/// Parse the root of a directory query and its one level of children.
///
/// The root is always a directory, even when it reports no children.
pub fn parse_directory_listing(raw: &RawNode) -> DirMeta {
    let mut dir = DirMeta::from_raw(raw);
    for child in raw.children() {
        dir.append(child);
    }
    dir
}
