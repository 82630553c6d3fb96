use super::thumbnail_extractor::{create_thumbnail_tasks, extract_thumbnails_parallel};
use super::timestamp_selector::select_timestamps;
use crate::error::Result;
use crate::tools::{Toolchain, ensure_directory_exists};
use log::info;
use std::path::{Path, PathBuf};

/// 從來源影片平均擷取縮圖，回傳成功的縮圖路徑（依時間排序）
///
/// 長度未知或為 0 時回傳空列表；單張失敗只會略過該張。
/// 只有在無法建立輸出目錄時回傳錯誤。
pub fn sample_thumbnails(
    toolchain: &Toolchain,
    source_path: &Path,
    output_dir: &Path,
    duration_seconds: f64,
    count: usize,
    width: u32,
) -> Result<Vec<PathBuf>> {
    let timestamps = select_timestamps(duration_seconds, count);
    if timestamps.is_empty() {
        info!("影片長度未知或未要求縮圖，略過縮圖擷取");
        return Ok(Vec::new());
    }

    ensure_directory_exists(output_dir)?;

    let tasks = create_thumbnail_tasks(source_path, &timestamps, output_dir);
    let thumbnails: Vec<PathBuf> = extract_thumbnails_parallel(toolchain, &tasks, width)
        .into_iter()
        .filter(|r| r.success)
        .map(|r| r.output_path)
        .collect();

    info!("已產生 {}/{} 張縮圖", thumbnails.len(), tasks.len());
    Ok(thumbnails)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_zero_duration_returns_empty_without_running_tools() {
        let temp_dir = TempDir::new().unwrap();
        let toolchain = Toolchain {
            ffmpeg: PathBuf::from("/nonexistent/ffmpeg"),
            ..Toolchain::default()
        };
        let output_dir = temp_dir.path().join("thumbnails");

        let thumbnails = sample_thumbnails(
            &toolchain,
            Path::new("/test/video.mp4"),
            &output_dir,
            0.0,
            10,
            320,
        )
        .unwrap();

        assert!(thumbnails.is_empty());
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_failed_extractions_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let toolchain = Toolchain {
            ffmpeg: PathBuf::from("/nonexistent/ffmpeg"),
            ..Toolchain::default()
        };

        let thumbnails = sample_thumbnails(
            &toolchain,
            Path::new("/test/video.mp4"),
            &temp_dir.path().join("thumbnails"),
            30.0,
            3,
            320,
        )
        .unwrap();

        assert!(thumbnails.is_empty());
    }
}
