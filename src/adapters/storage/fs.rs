use crate::ports::storage::{Error, StoragePort};
use std::{io, path::Path};

/// Local filesystem storage
#[derive(Clone, Debug, Default)]
pub struct FsStorage;

#[async_trait::async_trait]
impl StoragePort for FsStorage {
    async fn read_text(&self, path: &Path) -> Result<String, Error> {
        tracing::debug!(path = %path.display(), "reading file");
        tokio::fs::read_to_string(path)
            .await
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
                _ => Error::Adapter(Box::new(err)),
            })
    }

    async fn write_text(&self, path: &Path, contents: &str) -> Result<(), Error> {
        tracing::debug!(path = %path.display(), bytes = contents.len(), "writing file");
        tokio::fs::write(path, contents)
            .await
            .map_err(|err| Error::Adapter(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    #[tokio::test]
    async fn test_write_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("members.dat");
        let storage = FsStorage;

        let res = storage.write_text(&path, "REGULAR,1\n").await;
        assert_that!(res).is_ok();

        let res = storage.read_text(&path).await;
        assert_that!(res).is_ok().is_equal_to("REGULAR,1\n".to_string());
    }

    #[tokio::test]
    async fn test_write_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("members.txt");
        let storage = FsStorage;

        storage.write_text(&path, "a much longer first version").await.unwrap();
        storage.write_text(&path, "short").await.unwrap();

        assert_that!(storage.read_text(&path).await)
            .is_ok()
            .is_equal_to("short".to_string());
    }

    #[tokio::test]
    async fn test_read_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.dat");

        let res = FsStorage.read_text(&path).await;

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::NotFound(missing) if missing == &path));
    }

    #[tokio::test]
    async fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("members.txt");

        let res = FsStorage.write_text(&path, "x").await;

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::Adapter(_)));
    }
}
