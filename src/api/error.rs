//! Known server messages.
//!
//! The file manager reports failures only as human-readable Czech text, so
//! the few conditions the library reacts to are recognised by substring.

/// Prefix of the body returned when a non-personal account attempts a mutation.
pub const NON_PERSONAL_ACCOUNT: &str = "Neosobní účet nemá povoleno";

/// Fragment of the error reported for a path that does not exist.
pub const NOT_FOUND: &str = "neexistuje";

/// Error reported when a folder with the same long name already exists.
pub const FOLDER_NAME_EXISTS: &str = "Složka s tímto názvem již existuje";

/// Error reported when a folder with the same short name already exists.
pub const FOLDER_SHORTNAME_EXISTS: &str = "Složka s touto zkratkou již existuje";

/// Classification of a server error literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessage {
    /// The queried node does not exist
    NotFound,
    /// Folder creation collided with an existing folder
    AlreadyExists,
    /// Anything else; the caller gets the literal
    Other,
}

impl ServerMessage {
    /// Classify an error literal returned in the `chyba` field.
    pub fn classify(message: &str) -> Self {
        if message.contains(FOLDER_NAME_EXISTS) || message.contains(FOLDER_SHORTNAME_EXISTS) {
            ServerMessage::AlreadyExists
        } else if message.contains(NOT_FOUND) {
            ServerMessage::NotFound
        } else {
            ServerMessage::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            ServerMessage::classify("Zadaný uzel neexistuje."),
            ServerMessage::NotFound
        );
        assert_eq!(
            ServerMessage::classify("Složka s tímto názvem již existuje."),
            ServerMessage::AlreadyExists
        );
        assert_eq!(
            ServerMessage::classify("Chyba: Složka s touto zkratkou již existuje."),
            ServerMessage::AlreadyExists
        );
        assert_eq!(
            ServerMessage::classify("Soubor s tímto jménem již existuje."),
            ServerMessage::Other
        );
    }
}
