use super::catalog::RenditionCatalog;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 最近使用的來源檔案保留數量
pub const MAX_RECENT_PATHS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    pub probe_secs: u64,
    pub encode_secs: u64,
    pub segment_secs: u64,
    pub thumbnail_secs: u64,
    pub preview_secs: u64,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            probe_secs: 60,
            encode_secs: 4 * 3600,
            segment_secs: 600,
            thumbnail_secs: 60,
            preview_secs: 600,
        }
    }
}

/// 上傳目的地設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishSettings {
    /// 物件儲存的本機鏡像目錄
    pub bucket_dir: PathBuf,
    /// 回傳網址的前綴
    pub base_url: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            bucket_dir: PathBuf::from("./bucket"),
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscoderSettings {
    pub input_dir: PathBuf,
    pub output_root: PathBuf,
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    /// 同時執行的外部程序上限，0 表示依 CPU 數量
    pub max_workers: usize,
    pub thumbnail_count: usize,
    pub thumbnail_width: u32,
    pub preview_seconds: u32,
    pub timeouts: TimeoutSettings,
    /// 預設輸出的解析度，空白代表全部
    pub default_labels: Vec<String>,
    /// 自訂解析度階梯表（JSON），未設定時使用內建表
    pub catalog_path: Option<PathBuf>,
    pub publish: PublishSettings,
    pub recent_sources: Vec<String>,
}

impl Default for TranscoderSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./uploads"),
            output_root: PathBuf::from("./transcoded"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            max_workers: 2,
            thumbnail_count: 10,
            thumbnail_width: 320,
            preview_seconds: 30,
            timeouts: TimeoutSettings::default(),
            default_labels: Vec::new(),
            catalog_path: None,
            publish: PublishSettings::default(),
            recent_sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: RenditionCatalog,
    pub settings: TranscoderSettings,
}
