use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not a directory: {0}")]
    NotDirectory(String),

    #[error("is a directory: {0}")]
    IsDirectory(String),

    #[error("directory not empty: {0}")]
    DirectoryNotEmpty(String),

    /// The target is the working directory or one of its ancestors.
    #[error("resource busy: {0}")]
    Busy(String),
}

impl FsError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Wrong node kind for the requested operation.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::NotDirectory(_) | Self::IsDirectory(_))
    }

    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    #[must_use]
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists(path.into())
    }

    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    #[must_use]
    pub fn not_directory(path: impl Into<String>) -> Self {
        Self::NotDirectory(path.into())
    }

    #[must_use]
    pub fn is_directory(path: impl Into<String>) -> Self {
        Self::IsDirectory(path.into())
    }

    #[must_use]
    pub fn directory_not_empty(path: impl Into<String>) -> Self {
        Self::DirectoryNotEmpty(path.into())
    }

    #[must_use]
    pub fn busy(path: impl Into<String>) -> Self {
        Self::Busy(path.into())
    }
}

pub type FsResult<T> = Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_predicates() {
        assert!(FsError::not_found("/path").is_not_found());
        assert!(!FsError::already_exists("/path").is_not_found());

        assert!(FsError::not_directory("/etc/passwd").is_type_mismatch());
        assert!(FsError::is_directory("/tmp").is_type_mismatch());
        assert!(!FsError::directory_not_empty("/var").is_type_mismatch());
    }

    #[test]
    fn error_display() {
        let err = FsError::not_found("/var/logs/missing.log");
        assert_eq!(err.to_string(), "not found: /var/logs/missing.log");

        let err = FsError::busy("/home");
        assert_eq!(err.to_string(), "resource busy: /home");
    }
}
