use thiserror::Error;

/// Library-wide error type for cloud storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No access token configured; raised before any network call.
    #[error("Google Drive access token is not set")]
    AccessTokenMissing,

    /// Scope string did not name a known scope.
    #[error("Unknown scope '{0}': expected 'documents' or 'app_data'")]
    InvalidScope(String),

    /// No object matched the final path segment.
    #[error("File not found at path {0}")]
    FileNotFound(String),

    /// A directory in the path chain (or the scope root) could not be resolved.
    #[error("{0}")]
    DirectoryNotFound(String),

    /// The path resolved to a folder where a file was required.
    #[error("Path {0} is a directory")]
    PathIsDirectory(String),

    /// The path resolved to a file where a directory was required.
    #[error("Path {0} is a file")]
    PathIsFile(String),

    /// Non-recursive delete of a directory that still has children.
    #[error("Directory {path} is not empty: {children:?}")]
    DirectoryNotEmpty { path: String, children: Vec<String> },

    /// Create-without-overwrite hit an existing object.
    #[error("File {0} already exists")]
    FileAlreadyExists(String),

    /// Multiple siblings share the requested name and strict mode is active.
    #[error("Multiple files with the same name found at path {path}: {ids:?}")]
    MultipleFilesWithSameName { path: String, ids: Vec<String> },

    /// The backing store rejected the credential.
    #[error("Could not authenticate with Google Drive: {0}")]
    AuthenticationFailed(String),

    /// A create or content-update call failed.
    #[error("Write failed: {0}")]
    Write(String),

    /// A content fetch failed.
    #[error("Read failed: {0}")]
    Read(String),

    /// A delete call failed.
    #[error("Delete failed: {0}")]
    Delete(String),

    /// A metadata fetch failed.
    #[error("Stat failed: {0}")]
    Stat(String),

    /// Unclassified transport or API failure.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },
}

/// Stable, machine-readable error codes. Callers branch on these rather than
/// on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    FileNotFound,
    DirectoryNotFound,
    FileAlreadyExists,
    MultipleFilesSameName,
    PathIsDirectory,
    PathIsFile,
    DirectoryNotEmpty,
    InvalidScope,
    AuthenticationFailed,
    WriteError,
    ReadError,
    DeleteError,
    StatError,
    AccessTokenMissing,
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::FileNotFound => "ERR_FILE_NOT_FOUND",
            ErrorCode::DirectoryNotFound => "ERR_NO_DIRECTORY_FOUND",
            ErrorCode::FileAlreadyExists => "ERR_FILE_EXISTS",
            ErrorCode::MultipleFilesSameName => "ERR_MULTIPLE_FILES_SAME_NAME",
            ErrorCode::PathIsDirectory => "ERR_PATH_IS_DIRECTORY",
            ErrorCode::PathIsFile => "ERR_PATH_IS_FILE",
            ErrorCode::DirectoryNotEmpty => "ERR_DIRECTORY_NOT_EMPTY",
            ErrorCode::InvalidScope => "ERR_INVALID_SCOPE",
            ErrorCode::AuthenticationFailed => "ERR_AUTHENTICATION_FAILED",
            ErrorCode::WriteError => "ERR_WRITE_ERROR",
            ErrorCode::ReadError => "ERR_READ_ERROR",
            ErrorCode::DeleteError => "ERR_DELETE_ERROR",
            ErrorCode::StatError => "ERR_STAT_ERROR",
            ErrorCode::AccessTokenMissing => "ERR_ACCESS_TOKEN_MISSING",
            ErrorCode::Unknown => "ERR_UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StorageError {
    /// The stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            StorageError::AccessTokenMissing => ErrorCode::AccessTokenMissing,
            StorageError::InvalidScope(_) => ErrorCode::InvalidScope,
            StorageError::FileNotFound(_) => ErrorCode::FileNotFound,
            StorageError::DirectoryNotFound(_) => ErrorCode::DirectoryNotFound,
            StorageError::PathIsDirectory(_) => ErrorCode::PathIsDirectory,
            StorageError::PathIsFile(_) => ErrorCode::PathIsFile,
            StorageError::DirectoryNotEmpty { .. } => ErrorCode::DirectoryNotEmpty,
            StorageError::FileAlreadyExists(_) => ErrorCode::FileAlreadyExists,
            StorageError::MultipleFilesWithSameName { .. } => ErrorCode::MultipleFilesSameName,
            StorageError::AuthenticationFailed(_) => ErrorCode::AuthenticationFailed,
            StorageError::Write(_) => ErrorCode::WriteError,
            StorageError::Read(_) => ErrorCode::ReadError,
            StorageError::Delete(_) => ErrorCode::DeleteError,
            StorageError::Stat(_) => ErrorCode::StatError,
            StorageError::Api { .. } => ErrorCode::Unknown,
        }
    }

    fn map_api(self, wrap: impl FnOnce(String) -> StorageError) -> StorageError {
        match self {
            StorageError::Api { message, .. } => wrap(message),
            other => other,
        }
    }

    /// Reclassify an unrecognized transport failure as a write failure.
    /// Domain and auth errors pass through unchanged.
    pub(crate) fn into_write_error(self) -> StorageError {
        self.map_api(StorageError::Write)
    }

    pub(crate) fn into_read_error(self) -> StorageError {
        self.map_api(StorageError::Read)
    }

    pub(crate) fn into_delete_error(self) -> StorageError {
        self.map_api(StorageError::Delete)
    }

    pub(crate) fn into_stat_error(self) -> StorageError {
        self.map_api(StorageError::Stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_strings() {
        assert_eq!(StorageError::AccessTokenMissing.code().as_str(), "ERR_ACCESS_TOKEN_MISSING");
        assert_eq!(
            StorageError::FileNotFound("/a.txt".into()).code().as_str(),
            "ERR_FILE_NOT_FOUND"
        );
        assert_eq!(
            StorageError::DirectoryNotFound("gone".into()).code().as_str(),
            "ERR_NO_DIRECTORY_FOUND"
        );
    }

    #[test]
    fn api_errors_reclassify_per_operation() {
        let err = StorageError::Api { message: "boom".into(), status: Some(500) };
        assert_eq!(err.into_write_error().code(), ErrorCode::WriteError);

        // Domain errors keep their identity through reclassification.
        let err = StorageError::FileNotFound("/a".into()).into_read_error();
        assert_eq!(err.code(), ErrorCode::FileNotFound);
    }
}
