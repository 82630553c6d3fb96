use crate::error::TranscodeError;
use crate::tools::{ToolCommand, Toolchain};
use log::{error, info};
use std::path::{Path, PathBuf};

pub const PREVIEW_FILE_NAME: &str = "preview.mp4";
pub const PREVIEW_WIDTH: u32 = 640;
pub const PREVIEW_VIDEO_BITRATE: &str = "500k";
pub const PREVIEW_AUDIO_BITRATE: &str = "96k";

#[must_use]
pub fn build_preview_command(
    toolchain: &Toolchain,
    source_path: &Path,
    output_path: &Path,
    max_duration_seconds: u32,
) -> ToolCommand {
    let mut cmd = toolchain.ffmpeg(toolchain.timeouts.preview);
    cmd.arg("-i")
        .arg(source_path)
        .args([
            "-t".to_string(),
            max_duration_seconds.to_string(),
            "-vf".to_string(),
            // libx264 需要偶數高度
            format!("scale={PREVIEW_WIDTH}:-2"),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-preset".to_string(),
            "fast".to_string(),
            "-b:v".to_string(),
            PREVIEW_VIDEO_BITRATE.to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            PREVIEW_AUDIO_BITRATE.to_string(),
            "-movflags".to_string(),
            "+faststart".to_string(),
            "-y".to_string(),
        ])
        .arg(output_path);
    cmd
}

/// 從影片開頭擷取低位元率預覽片段
///
/// 來源比上限短時由 ffmpeg 在串流結尾自然截斷。失敗時回傳 `None`。
pub fn extract_preview(
    toolchain: &Toolchain,
    source_path: &Path,
    output_dir: &Path,
    max_duration_seconds: u32,
) -> Option<PathBuf> {
    let output_path = output_dir.join(PREVIEW_FILE_NAME);

    match build_preview_command(toolchain, source_path, &output_path, max_duration_seconds)
        .execute()
    {
        Ok(_) => {
            info!("預覽片段已產生: {}", output_path.display());
            Some(output_path)
        }
        Err(source) => {
            error!("{}", TranscodeError::Preview { source });
            None
        }
    }
}
