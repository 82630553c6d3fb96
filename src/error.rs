//! 轉碼流程的錯誤分類
//!
//! 致命錯誤（來源不存在、探測失敗）會中止整個流程；
//! 其餘錯誤只會讓對應的產物缺席。

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// 外部工具（ffmpeg / ffprobe）執行失敗
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("無法啟動 {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} 執行逾時（{timeout:?}）")]
    Timeout { program: String, timeout: Duration },

    #[error("{program} 結束碼 {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("來源檔案不存在或無法讀取: {}", path.display())]
    Precondition { path: PathBuf },

    #[error("影片 ID 不合法: {video_id:?}")]
    InvalidVideoId { video_id: String },

    #[error("無法探測影片資訊 {}: {reason}", path.display())]
    Probe { path: PathBuf, reason: String },

    #[error("轉碼 {label} 失敗: {source}")]
    Encode {
        label: String,
        #[source]
        source: ToolError,
    },

    #[error("HLS 切片 {label} 失敗: {source}")]
    Segment {
        label: String,
        #[source]
        source: ToolError,
    },

    #[error("沒有任何成功的串流變體，無法產生主播放清單")]
    NoVariants,

    #[error("縮圖 {index} 擷取失敗: {reason}")]
    Sample { index: usize, reason: String },

    #[error("預覽片段產生失敗: {source}")]
    Preview {
        #[source]
        source: ToolError,
    },

    #[error("上傳 {relative_path} 失敗: {reason}")]
    Publish {
        relative_path: String,
        reason: String,
    },

    #[error("檔案操作失敗 {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranscodeError {
    /// 是否為會中止整個流程的錯誤
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Precondition { .. } | Self::InvalidVideoId { .. } | Self::Probe { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = TranscodeError> = std::result::Result<T, E>;
