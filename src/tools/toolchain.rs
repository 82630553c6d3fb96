use crate::config::TranscoderSettings;
use crate::tools::ToolCommand;
use std::path::PathBuf;
use std::time::Duration;

/// 各階段外部工具呼叫的逾時設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimeouts {
    pub probe: Duration,
    pub encode: Duration,
    pub segment: Duration,
    pub thumbnail: Duration,
    pub preview: Duration,
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self {
            probe: Duration::from_secs(60),
            encode: Duration::from_secs(4 * 3600),
            segment: Duration::from_secs(600),
            thumbnail: Duration::from_secs(60),
            preview: Duration::from_secs(600),
        }
    }
}

/// ffmpeg / ffprobe 的位置與逾時
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub timeouts: StageTimeouts,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            timeouts: StageTimeouts::default(),
        }
    }
}

impl Toolchain {
    #[must_use]
    pub fn from_settings(settings: &TranscoderSettings) -> Self {
        Self {
            ffmpeg: settings.ffmpeg_path.clone(),
            ffprobe: settings.ffprobe_path.clone(),
            timeouts: StageTimeouts {
                probe: Duration::from_secs(settings.timeouts.probe_secs),
                encode: Duration::from_secs(settings.timeouts.encode_secs),
                segment: Duration::from_secs(settings.timeouts.segment_secs),
                thumbnail: Duration::from_secs(settings.timeouts.thumbnail_secs),
                preview: Duration::from_secs(settings.timeouts.preview_secs),
            },
        }
    }

    /// 建立 ffmpeg 命令（已帶入共用的安靜輸出參數）
    #[must_use]
    pub fn ffmpeg(&self, timeout: Duration) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.ffmpeg);
        cmd.args(["-hide_banner", "-nostdin", "-loglevel", "error"])
            .timeout(timeout);
        cmd
    }

    #[must_use]
    pub fn ffprobe(&self) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.ffprobe);
        cmd.timeout(self.timeouts.probe);
        cmd
    }
}
