/// Errors raised while rendering an export package.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("zip packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error while writing package: {0}")]
    Io(#[from] std::io::Error),
}
