use crate::error::{Result, TranscodeError};
use crate::tools::Toolchain;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 來源影片資訊（每次執行探測一次，之後唯讀）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceMetadata {
    pub duration_seconds: f64,
    pub size_bytes: u64,
    pub container_bitrate_bps: u64,
    pub container_format: String,
    pub video: Option<VideoStreamInfo>,
    pub audio: Option<AudioStreamInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoStreamInfo {
    pub width: u32,
    pub height: u32,
    pub codec: String,
    pub frame_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioStreamInfo {
    pub codec: String,
    pub channel_count: u32,
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: FormatInfo,
    #[serde(default)]
    streams: Vec<StreamInfo>,
}

/// 內部欄位皆可缺漏（預設為 0），但 `format` 區段本身必須存在
#[derive(Deserialize)]
struct FormatInfo {
    format_name: Option<String>,
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    channels: Option<u32>,
}

/// 使用 ffprobe 取得來源影片資訊
///
/// ffprobe 結束碼非零、逾時或輸出無法解析時回傳 [`TranscodeError::Probe`]。
/// 缺少影像或音訊串流不算錯誤，對應欄位為 `None`。
pub fn probe_source(toolchain: &Toolchain, path: &Path) -> Result<SourceMetadata> {
    let mut cmd = toolchain.ffprobe();
    cmd.args([
        "-v",
        "quiet",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
    ])
    .arg(path);

    let output = cmd.execute().map_err(|e| TranscodeError::Probe {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let metadata = parse_probe_output(&output.stdout).map_err(|e| TranscodeError::Probe {
        path: path.to_path_buf(),
        reason: format!("無法解析 ffprobe 輸出: {e}"),
    })?;

    info!(
        "影片資訊 {}: {:.2}s, {}",
        path.display(),
        metadata.duration_seconds,
        metadata.container_format
    );
    Ok(metadata)
}

fn parse_probe_output(raw: &str) -> serde_json::Result<SourceMetadata> {
    let probe: FfprobeOutput = serde_json::from_str(raw)?;
    let format = &probe.format;

    let duration_seconds = format
        .duration
        .as_deref()
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(0.0);

    let video = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .map(|s| VideoStreamInfo {
            width: s.width.unwrap_or(0),
            height: s.height.unwrap_or(0),
            codec: s.codec_name.clone().unwrap_or_default(),
            frame_rate: s
                .r_frame_rate
                .as_deref()
                .and_then(parse_frame_rate)
                .unwrap_or(0.0),
        });

    let audio = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .map(|s| AudioStreamInfo {
            codec: s.codec_name.clone().unwrap_or_default(),
            channel_count: s.channels.unwrap_or(0),
        });

    Ok(SourceMetadata {
        duration_seconds,
        size_bytes: parse_count(format.size.as_deref()),
        container_bitrate_bps: parse_count(format.bit_rate.as_deref()),
        container_format: format.format_name.clone().unwrap_or_default(),
        video,
        audio,
    })
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"）
///
/// 字串來自不可信任的媒體資料，只接受「整數/整數」或單一十進位數字。
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let rate = rate.trim();
    if let Some((num_str, den_str)) = rate.split_once('/') {
        let num: u64 = num_str.trim().parse().ok()?;
        let den: u64 = den_str.trim().parse().ok()?;
        if den == 0 {
            return None;
        }
        return Some(num as f64 / den as f64);
    }

    rate.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
