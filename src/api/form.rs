//! Form body for mutating file manager requests.

use super::client::FileManagerOp;

/// Field carrying the target folder; the server requires a trailing slash.
pub const FOLDER_URL_FIELD: &str = "furl";

/// A binary attachment sent as a multipart file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

/// Ordered form fields plus optional file attachments.
///
/// Fields may hold `None`; absent values are stripped before transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, Option<String>)>,
    attachments: Vec<Attachment>,
}

impl Form {
    /// Start a form for the given file manager operation.
    pub fn op(op: FileManagerOp) -> Self {
        Self::default().field("op", op.code())
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), Some(value.into())));
        self
    }

    pub fn optional(mut self, name: &str, value: Option<impl Into<String>>) -> Self {
        self.fields.push((name.to_string(), value.map(Into::into)));
        self
    }

    pub fn attach(
        mut self,
        field: &str,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.attachments.push(Attachment {
            field: field.to_string(),
            file_name: file_name.into(),
            mime: mime.into(),
            data,
        });
        self
    }

    /// Value of the first field with this name, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Fields that carry a value, in insertion order.
    pub fn present_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(n, v)| v.as_deref().map(|v| (n.as_str(), v)))
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Apply the wire rules: folder URLs end with `/`, absent fields are dropped.
    pub(crate) fn normalized(mut self) -> Self {
        self.fields.retain(|(_, v)| v.is_some());
        for (name, value) in self.fields.iter_mut() {
            if name == FOLDER_URL_FIELD {
                if let Some(v) = value.as_mut() {
                    if !v.ends_with('/') {
                        v.push('/');
                    }
                }
            }
        }
        self
    }
}
