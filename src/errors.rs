use thiserror::Error;

/// Failure preparing the HTTP attachment headers for a workbook download.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("file name '{0}' cannot be carried in a Content-Disposition header")]
    InvalidFileName(String),
}

/// Classification failure in the file-type lookup table.
#[derive(Debug, Error)]
pub enum FileTypeError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),
}
