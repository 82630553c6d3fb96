use crate::error::TranscodeError;
use crate::tools::{ToolCommand, Toolchain};
use log::{debug, error};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 縮圖預設寬度，高度依比例計算
pub const THUMBNAIL_WIDTH: u32 = 320;

/// 縮圖擷取任務
#[derive(Debug, Clone)]
pub struct ThumbnailTask {
    pub video_path: PathBuf,
    pub timestamp: f64,
    pub output_path: PathBuf,
    /// 從 1 開始
    pub index: usize,
}

/// 縮圖擷取結果
#[derive(Debug)]
pub struct ThumbnailResult {
    pub output_path: PathBuf,
    pub index: usize,
    pub success: bool,
    pub error_message: Option<String>,
}

/// 建立縮圖任務列表，輸出檔名為 `thumb_01.jpg`、`thumb_02.jpg`…
#[must_use]
pub fn create_thumbnail_tasks(
    video_path: &Path,
    timestamps: &[f64],
    output_dir: &Path,
) -> Vec<ThumbnailTask> {
    timestamps
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| ThumbnailTask {
            video_path: video_path.to_path_buf(),
            timestamp,
            output_path: output_dir.join(format!("thumb_{:02}.jpg", i + 1)),
            index: i + 1,
        })
        .collect()
}

#[must_use]
pub fn build_thumbnail_command(toolchain: &Toolchain, task: &ThumbnailTask, width: u32) -> ToolCommand {
    let mut cmd = toolchain.ffmpeg(toolchain.timeouts.thumbnail);
    cmd.args(["-ss".to_string(), format!("{:.3}", task.timestamp)])
        .arg("-i")
        .arg(&task.video_path)
        .args([
            "-frames:v".to_string(),
            "1".to_string(),
            "-vf".to_string(),
            format!("scale={width}:-1"),
            "-y".to_string(),
        ])
        .arg(&task.output_path);
    cmd
}

/// 擷取單一縮圖
#[must_use]
pub fn extract_thumbnail(toolchain: &Toolchain, task: &ThumbnailTask, width: u32) -> ThumbnailResult {
    debug!("擷取縮圖 {}: timestamp={:.3}s", task.index, task.timestamp);

    let outcome = build_thumbnail_command(toolchain, task, width)
        .execute()
        .map_err(|e| e.to_string())
        .and_then(|_| {
            if task.output_path.exists() {
                Ok(())
            } else {
                Err(format!("縮圖檔案未建立: {}", task.output_path.display()))
            }
        });

    match outcome {
        Ok(()) => ThumbnailResult {
            output_path: task.output_path.clone(),
            index: task.index,
            success: true,
            error_message: None,
        },
        Err(message) => ThumbnailResult {
            output_path: task.output_path.clone(),
            index: task.index,
            success: false,
            error_message: Some(message),
        },
    }
}

/// 平行擷取多個縮圖，結果順序與任務順序相同
pub fn extract_thumbnails_parallel(
    toolchain: &Toolchain,
    tasks: &[ThumbnailTask],
    width: u32,
) -> Vec<ThumbnailResult> {
    tasks
        .par_iter()
        .map(|task| {
            let result = extract_thumbnail(toolchain, task, width);

            if let Some(msg) = result.error_message.as_ref().filter(|_| !result.success) {
                let err = TranscodeError::Sample {
                    index: task.index,
                    reason: msg.clone(),
                };
                error!("{err}");
            }

            result
        })
        .collect()
}
