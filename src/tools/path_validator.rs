use crate::error::{Result, TranscodeError};
use std::fs::File;
use std::path::Path;

/// 確認來源檔案存在、是一般檔案且可讀取
pub fn validate_source_file(path: &Path) -> Result<()> {
    if !path.is_file() || File::open(path).is_err() {
        return Err(TranscodeError::Precondition {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// 清空並重新建立執行目錄，避免先前執行的產物混入本次結果
pub fn reset_directory(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| TranscodeError::io(path, e))?;
    }
    std::fs::create_dir_all(path).map_err(|e| TranscodeError::io(path, e))
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| TranscodeError::io(path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_source_is_precondition_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_source_file(&temp_dir.path().join("nope.mp4"));
        assert!(matches!(result, Err(TranscodeError::Precondition { .. })));
    }

    #[test]
    fn test_directory_is_not_a_source() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_source_file(temp_dir.path()).is_err());
    }

    #[test]
    fn test_existing_file_passes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("source.mp4");
        std::fs::write(&path, b"data").unwrap();
        assert!(validate_source_file(&path).is_ok());
    }

    #[test]
    fn test_ensure_directory_creates_nested() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a/b/c");
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_directory_exists(&nested).unwrap();
    }

    #[test]
    fn test_reset_directory_drops_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let run_dir = temp_dir.path().join("video_1");
        std::fs::create_dir_all(run_dir.join("hls")).unwrap();
        std::fs::write(run_dir.join("hls/master.m3u8"), "#EXTM3U\n").unwrap();
        std::fs::write(run_dir.join("preview.mp4"), b"old").unwrap();

        reset_directory(&run_dir).unwrap();

        assert!(run_dir.is_dir());
        assert_eq!(std::fs::read_dir(&run_dir).unwrap().count(), 0);

        let fresh = temp_dir.path().join("video_2");
        reset_directory(&fresh).unwrap();
        assert!(fresh.is_dir());
    }
}
