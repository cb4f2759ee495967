use thiserror::Error;

use crate::models::FolderId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrganizerError {
    #[error("Protected resource: {0}")]
    ProtectedResource(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(FolderId),

    #[error("Cannot move folder {folder} under {new_parent}: it would become its own ancestor")]
    InvalidMove { folder: FolderId, new_parent: FolderId },

    #[error("Folder {0} still contains folders or notes")]
    FolderNotEmpty(FolderId),

    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },
}

impl OrganizerError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        OrganizerError::Validation {
            field,
            message: message.into(),
        }
    }
}
