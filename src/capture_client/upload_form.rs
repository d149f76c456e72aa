use crate::config::Config;
use crate::prediction_client::form::{mime_for_file_name, FormPayload};
use crate::prediction_client::interface::SubmitError;
use std::path::PathBuf;

/// What the upload form holds at submit time: the file input and any extra
/// named text inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub file: Option<PathBuf>,
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            fields: Vec::new(),
        }
    }

    /// Extracts the form into a multipart payload. An empty file input still
    /// produces an empty `file` part, the way a browser serializes it.
    pub fn to_payload(&self, config: &Config) -> Result<FormPayload, SubmitError> {
        let mut payload = match &self.file {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .map_err(|e| SubmitError::Io(format!("{}: {}", path.display(), e)))?;
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let mime = mime_for_file_name(&file_name);
                FormPayload::new().file(&config.file_field_name, &file_name, mime, bytes)
            }
            None => FormPayload::new().file(
                &config.file_field_name,
                "",
                "application/octet-stream",
                Vec::new(),
            ),
        };

        for (name, value) in &self.fields {
            payload = payload.text(name, value);
        }

        Ok(payload)
    }
}
