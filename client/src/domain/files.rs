//! File uploads for avatars and event covers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an uploaded file is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Profile picture.
    Avatar,
    /// Event cover image.
    Event,
}

impl FileKind {
    /// Form value sent as `file_type`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avatar => "avatar",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avatar" => Ok(Self::Avatar),
            "event" => Ok(Self::Event),
            other => Err(format!("unknown file kind: {other}")),
        }
    }
}

/// File content to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type such as `image/jpeg`.
    pub mime_type: String,
    /// Raw content.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A stored file as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Identifier to reference from profiles and events.
    pub id: String,
    /// Public URL of the stored file.
    pub url: String,
}
