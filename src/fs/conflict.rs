//! Name-collision policies for uploads.

/// What to do when an upload target already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnConflict {
    /// Fail with the server's "already exists" error
    #[default]
    Error,
    /// Replace the existing file
    Overwrite,
    /// Let the server store the upload under a fresh name
    Rename,
    /// Keep the existing file and skip the upload
    Ignore,
    /// Replace the existing file only if its metadata or content differ
    UpdateIfDifferent,
}

/// Collision code understood by the file manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCode {
    Error,
    Overwrite,
    Rename,
}

impl CollisionCode {
    /// Two-letter wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionCode::Error => "er",
            CollisionCode::Overwrite => "wr",
            CollisionCode::Rename => "re",
        }
    }
}

impl OnConflict {
    /// Wire collision code, for the policies the server enforces itself.
    ///
    /// `Ignore` and `UpdateIfDifferent` are resolved client-side and have none.
    pub fn collision_code(&self) -> Option<CollisionCode> {
        match self {
            OnConflict::Error => Some(CollisionCode::Error),
            OnConflict::Overwrite => Some(CollisionCode::Overwrite),
            OnConflict::Rename => Some(CollisionCode::Rename),
            OnConflict::Ignore | OnConflict::UpdateIfDifferent => None,
        }
    }

    /// Whether deciding this policy requires looking at the remote directory.
    pub fn is_client_side(&self) -> bool {
        self.collision_code().is_none()
    }
}
