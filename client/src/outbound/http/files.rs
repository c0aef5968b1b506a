//! File upload endpoint.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use super::client::HttpApiClient;
use super::dto::UploadedFileDto;
use crate::domain::ports::FilesApi;
use crate::domain::{ApiError, FileKind, FileUpload, NormalizedError, UploadedFile};

/// Multipart body with the file under `file` and its purpose under `file_type`.
fn upload_form(upload: FileUpload, kind: FileKind) -> Result<Form, NormalizedError> {
    let part = Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&upload.mime_type)
        .map_err(|err| {
            NormalizedError::request_setup(format!(
                "invalid MIME type {:?}: {err}",
                upload.mime_type
            ))
        })?;
    Ok(Form::new()
        .part("file", part)
        .text("file_type", kind.as_str()))
}

#[async_trait]
impl FilesApi for HttpApiClient {
    async fn upload_file(
        &self,
        upload: FileUpload,
        kind: FileKind,
    ) -> Result<UploadedFile, ApiError> {
        let form = upload_form(upload, kind)?;
        let request = self
            .request(Method::POST, &["files", "upload"])?
            .multipart(form);
        self.call::<UploadedFileDto>(request).await
    }
}
