//! IS file manager client and wire types.

pub mod client;
pub mod error;
pub mod form;
pub mod wire;

pub use client::{Connection, FileManagerOp};
pub use error::ServerMessage;
pub use form::{Attachment, Form};
