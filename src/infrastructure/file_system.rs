use crate::core::interfaces::FileSystemService;
use crate::utils::{BuildError, Result};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Writes through tokio. Never creates missing directories.
pub struct TokioFileSystemService;

#[async_trait::async_trait]
impl FileSystemService for TokioFileSystemService {
    async fn write_file(&self, path: &Path, content: &[u8], mode: u32) -> Result<()> {
        write_with_mode(path, content, mode)
            .await
            .map_err(|e| BuildError::write_failure(path.to_path_buf(), e))
    }
}

async fn write_with_mode(path: &Path, content: &[u8], mode: u32) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(mode);

    let mut file = options.open(path).await?;
    file.write_all(content).await?;
    file.flush().await?;

    // The open mode only applies to new files and is masked by the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_and_overwrite() {
        let fs_service = TokioFileSystemService;
        let temp_dir = tempdir().unwrap();
        let target = temp_dir.path().join("hide-min.css");

        fs_service.write_file(&target, b"a{color:red}b{}", 0o644).await.unwrap();
        fs_service.write_file(&target, b"a{}", 0o644).await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"a{}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_mode_is_reapplied_to_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let fs_service = TokioFileSystemService;
        let temp_dir = tempdir().unwrap();
        let target = temp_dir.path().join("line-numbers-min.js");
        std::fs::write(&target, "old").unwrap();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o600)).unwrap();

        fs_service.write_file(&target, b"new", 0o644).await.unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[tokio::test]
    async fn test_missing_parent_not_created() {
        let fs_service = TokioFileSystemService;
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("heading");
        let target = missing.join("numbering-min.css");

        let err = fs_service.write_file(&target, b"h1{}", 0o644).await.unwrap_err();

        match err {
            BuildError::WriteFailure { path, source } => {
                assert_eq!(path, target);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected write failure, got {other:?}"),
        }
        assert!(!missing.exists());
    }
}
