use std::path::{Path, PathBuf};

/// Largest file the parsing service accepts (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions the parsing service knows how to read, lowercase.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

const NO_FILE_MESSAGE: &str = "No file selected.";
const NOT_ACCEPTED_MESSAGE: &str =
    "This file was not accepted. Only PDF, DOCX, or DOC files under 5MB are allowed.";

/// What the file picker hands over before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size_bytes: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            path: path.into(),
        }
    }
}

/// A file that passed [`validate`]. Only this module can construct one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    size_bytes: u64,
    path: PathBuf,
    extension: String,
}

impl SelectedFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercase extension without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn content_type(&self) -> &'static str {
        match self.extension.as_str() {
            "pdf" => "application/pdf",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoFileSelected,
    UnsupportedExtension,
    TooLarge { size_bytes: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectReason,
}

impl Rejection {
    /// User-facing text. Extension and size failures share one message.
    pub fn message(&self) -> &'static str {
        match self.reason {
            RejectReason::NoFileSelected => NO_FILE_MESSAGE,
            RejectReason::UnsupportedExtension | RejectReason::TooLarge { .. } => {
                NOT_ACCEPTED_MESSAGE
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(SelectedFile),
    Rejected(Rejection),
}

/// Classify a picker result. Pure; the caller decides what to show.
pub fn validate(candidate: Option<FileCandidate>) -> Verdict {
    let Some(candidate) = candidate else {
        return reject(RejectReason::NoFileSelected);
    };

    let Some(extension) = accepted_extension(&candidate.name) else {
        return reject(RejectReason::UnsupportedExtension);
    };

    if candidate.size_bytes > MAX_UPLOAD_BYTES {
        return reject(RejectReason::TooLarge {
            size_bytes: candidate.size_bytes,
        });
    }

    Verdict::Accepted(SelectedFile {
        name: candidate.name,
        size_bytes: candidate.size_bytes,
        path: candidate.path,
        extension,
    })
}

fn reject(reason: RejectReason) -> Verdict {
    Verdict::Rejected(Rejection { reason })
}

fn accepted_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}
