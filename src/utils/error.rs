use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirscopeError {
    #[error("Not a valid directory: {path}")]
    InvalidDirectory { path: PathBuf },

    #[error("Permission denied while reading: {path}")]
    PartialAccess { path: PathBuf },

    #[error("Invalid name '{name}': {reason}")]
    NameValidationFailed { name: String, reason: String },

    #[error("Already exists: {path}")]
    DestinationCollision { path: PathBuf },

    #[error("Copy failed at {path}: {reason}")]
    CopyFailed { path: PathBuf, reason: String },

    #[error("Move failed: {src} -> {dest}: {reason}")]
    MoveFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Delete failed at {path}: {reason}")]
    DeleteFailed { path: PathBuf, reason: String },

    #[error("Create failed at {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    #[error("No history in that direction")]
    EmptyHistory,

    #[error("Source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Cannot place {src} inside itself ({dest})")]
    RecursiveDestination { src: PathBuf, dest: PathBuf },

    #[error("Search query must not be empty")]
    InvalidSearchQuery,

    #[error("Cannot open {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DirscopeError {
    /// 다이얼로그 제목용 짧은 분류
    pub fn title(&self) -> &'static str {
        match self {
            DirscopeError::InvalidDirectory { .. } => "Invalid Directory",
            DirscopeError::PartialAccess { .. } => "Access Denied",
            DirscopeError::NameValidationFailed { .. } => "Invalid Name",
            DirscopeError::DestinationCollision { .. } => "Name Collision",
            DirscopeError::CopyFailed { .. } => "Copy Failed",
            DirscopeError::MoveFailed { .. } => "Move Failed",
            DirscopeError::DeleteFailed { .. } => "Delete Failed",
            DirscopeError::CreateFailed { .. } => "Create Failed",
            DirscopeError::EmptyHistory => "History",
            DirscopeError::SourceNotFound { .. } => "Not Found",
            DirscopeError::RecursiveDestination { .. } => "Invalid Destination",
            DirscopeError::InvalidSearchQuery => "Search",
            DirscopeError::OpenFailed { .. } => "Open Failed",
            DirscopeError::Io(_) => "Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirscopeError>;
