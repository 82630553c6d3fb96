use super::master_playlist::VariantDescriptor;
use crate::component::rendition_encoder::RenditionResult;
use crate::error::{Result, TranscodeError};
use crate::tools::{ToolCommand, Toolchain};
use log::{info, warn};
use std::fs;
use std::path::Path;

/// 每個切片的目標長度（秒）
pub const SEGMENT_SECONDS: u32 = 6;

/// 建立 HLS 切片命令（`-c copy`，不重新編碼）
///
/// 產生 `<hls_dir>/<label>.m3u8` 與 `<hls_dir>/<label>_000.ts`、`_001.ts`…
#[must_use]
pub fn build_segment_command(
    toolchain: &Toolchain,
    hls_dir: &Path,
    rendition: &RenditionResult,
) -> ToolCommand {
    let label = &rendition.label;
    let mut cmd = toolchain.ffmpeg(toolchain.timeouts.segment);
    cmd.arg("-i")
        .arg(&rendition.output_path)
        .args([
            "-c".to_string(),
            "copy".to_string(),
            "-start_number".to_string(),
            "0".to_string(),
            "-hls_time".to_string(),
            SEGMENT_SECONDS.to_string(),
            "-hls_list_size".to_string(),
            "0".to_string(),
            "-f".to_string(),
            "hls".to_string(),
            "-hls_segment_filename".to_string(),
        ])
        .arg(hls_dir.join(format!("{label}_%03d.ts")))
        .arg("-y")
        .arg(hls_dir.join(variant_playlist_name(label)));
    cmd
}

#[must_use]
pub fn variant_playlist_name(label: &str) -> String {
    format!("{label}.m3u8")
}

/// 刪除某解析度既有的變體播放清單與 `<label>_NNN.ts` 片段
pub fn remove_variant_files(hls_dir: &Path, label: &str) {
    let Ok(entries) = fs::read_dir(hls_dir) else {
        return;
    };

    let playlist = variant_playlist_name(label);
    let segment_prefix = format!("{label}_");
    for entry in entries.filter_map(std::result::Result::ok) {
        let name = entry.file_name().to_string_lossy().to_string();
        let is_segment = name
            .strip_prefix(&segment_prefix)
            .and_then(|rest| rest.strip_suffix(".ts"))
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));

        if name == playlist || is_segment {
            if let Err(e) = fs::remove_file(entry.path()) {
                warn!("無法刪除舊的 HLS 檔案 {}: {e}", entry.path().display());
            }
        }
    }
}

/// 將一個解析度切成 HLS 片段，回傳對應的串流變體
///
/// 切片前會清除同名的舊檔案；失敗時也會清除，避免留下不完整的片段。
pub fn segment_rendition(
    toolchain: &Toolchain,
    hls_dir: &Path,
    rendition: &RenditionResult,
) -> Result<VariantDescriptor> {
    remove_variant_files(hls_dir, &rendition.label);

    if let Err(source) = build_segment_command(toolchain, hls_dir, rendition).execute() {
        remove_variant_files(hls_dir, &rendition.label);
        return Err(TranscodeError::Segment {
            label: rendition.label.clone(),
            source,
        });
    }

    info!("HLS 切片完成: {}", rendition.label);

    let preset = &rendition.preset;
    Ok(VariantDescriptor {
        label: rendition.label.clone(),
        bandwidth_bps: preset.bandwidth_bps(),
        width: preset.width,
        height: preset.height,
        playlist_relative_path: variant_playlist_name(&rendition.label),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenditionPreset;
    use std::path::PathBuf;

    #[test]
    fn test_segment_command_uses_stream_copy() {
        let rendition = RenditionResult {
            label: "480p".to_string(),
            output_path: PathBuf::from("/out/v1/480p.mp4"),
            preset: RenditionPreset {
                label: "480p".to_string(),
                width: 854,
                height: 480,
                video_bitrate_kbps: 1000,
                audio_bitrate_kbps: 96,
            },
        };
        let cmd = build_segment_command(&Toolchain::default(), Path::new("/out/v1/hls"), &rendition);
        let args: Vec<String> = cmd
            .get_args()
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        let joined = args.join(" ");
        assert!(joined.contains("-i /out/v1/480p.mp4"));
        assert!(joined.contains("-c copy"));
        assert!(joined.contains("-hls_time 6"));
        assert!(joined.contains("-hls_list_size 0"));
        assert!(joined.contains("-start_number 0"));
        assert!(joined.contains("-hls_segment_filename /out/v1/hls/480p_%03d.ts"));
        assert_eq!(args.last().unwrap(), "/out/v1/hls/480p.m3u8");
    }

    #[test]
    fn test_remove_variant_files_only_touches_own_label() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let hls = temp_dir.path();
        for name in [
            "720p.m3u8",
            "720p_000.ts",
            "720p_001.ts",
            "720p_hi.m3u8",
            "720p_hi_000.ts",
            "480p_000.ts",
            "master.m3u8",
        ] {
            fs::write(hls.join(name), b"x").unwrap();
        }

        remove_variant_files(hls, "720p");

        let mut left: Vec<String> = fs::read_dir(hls)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        left.sort();
        assert_eq!(
            left,
            vec!["480p_000.ts", "720p_hi.m3u8", "720p_hi_000.ts", "master.m3u8"]
        );
    }

    #[test]
    fn test_missing_directory_is_ignored() {
        remove_variant_files(Path::new("/nonexistent/hls"), "720p");
    }
}
