//! Driven port for file storage.

use async_trait::async_trait;

use crate::domain::{ApiError, FileKind, FileUpload, UploadedFile};

/// File operations offered by the remote service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilesApi: Send + Sync {
    /// Store a file tagged with its purpose.
    async fn upload_file(
        &self,
        upload: FileUpload,
        kind: FileKind,
    ) -> Result<UploadedFile, ApiError>;
}
