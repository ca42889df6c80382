use std::path::{Path, PathBuf};

/// Whole-file text storage for roster data files and reports
#[mockall::automock]
#[async_trait::async_trait]
pub trait StoragePort {
    async fn read_text(&self, path: &Path) -> Result<String, Error>;
    /// Create or truncate `path` and write `contents` to it
    async fn write_text(&self, path: &Path, contents: &str) -> Result<(), Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file {0} does not exist")]
    NotFound(PathBuf),

    /// Concrete adapter errors
    ///
    /// Permission, encoding and other I/O failures from the concrete adapter.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
