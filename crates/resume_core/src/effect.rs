use crate::{AttemptId, OutputFormat, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartUpload(UploadJob),
    CancelUpload { attempt: AttemptId },
}

/// One multipart submission to the parsing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub attempt: AttemptId,
    pub file: SelectedFile,
    pub format: OutputFormat,
    pub output_folder: String,
}
