use crate::component::manifest_builder::ManifestSet;
use crate::component::rendition_encoder::RenditionResult;
use crate::config::TranscoderSettings;
use crate::tools::{SourceMetadata, Toolchain};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// 一次轉碼的彙整結果
///
/// 部分失敗時仍會回傳：缺少的產物即代表該階段失敗。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscodeRun {
    pub video_id: String,
    pub output_dir: PathBuf,
    pub metadata: SourceMetadata,
    pub renditions: BTreeMap<String, RenditionResult>,
    pub manifest: Option<ManifestSet>,
    pub thumbnails: Vec<PathBuf>,
    /// 依影片長度應產生的縮圖數量（長度未知時為 0）
    pub expected_thumbnails: usize,
    pub preview: Option<PathBuf>,
}

impl TranscodeRun {
    /// 所有要求的解析度、變體、縮圖與預覽片段皆已產生
    #[must_use]
    pub fn is_complete(&self, requested: usize) -> bool {
        self.renditions.len() == requested
            && self
                .manifest
                .as_ref()
                .is_some_and(|m| m.variants.len() == requested)
            && self.thumbnails.len() == self.expected_thumbnails
            && self.preview.is_some()
    }
}

/// 流程階段，只會往前推進
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStage {
    Pending,
    Probing,
    Encoding { completed: usize, total: usize },
    BuildingManifest,
    Sampling,
    Done,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "等待中"),
            Self::Probing => write!(f, "探測影片資訊"),
            Self::Encoding { completed, total } => write!(f, "轉碼中 ({completed}/{total})"),
            Self::BuildingManifest => write!(f, "產生 HLS 播放清單"),
            Self::Sampling => write!(f, "擷取縮圖"),
            Self::Done => write!(f, "完成"),
        }
    }
}

/// 流程執行參數
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub output_root: PathBuf,
    pub toolchain: Toolchain,
    /// 0 表示使用 rayon 預設值
    pub max_workers: usize,
    pub thumbnail_count: usize,
    pub thumbnail_width: u32,
    pub preview_seconds: u32,
}

impl PipelineOptions {
    #[must_use]
    pub fn from_settings(settings: &TranscoderSettings) -> Self {
        Self {
            output_root: settings.output_root.clone(),
            toolchain: Toolchain::from_settings(settings),
            max_workers: settings.max_workers,
            thumbnail_count: settings.thumbnail_count,
            thumbnail_width: settings.thumbnail_width,
            preview_seconds: settings.preview_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::manifest_builder::VariantDescriptor;
    use crate::config::RenditionPreset;

    fn complete_run() -> TranscodeRun {
        let preset = RenditionPreset {
            label: "720p".to_string(),
            width: 1280,
            height: 720,
            video_bitrate_kbps: 2500,
            audio_bitrate_kbps: 128,
        };
        let output_dir = PathBuf::from("/out/v1");
        TranscodeRun {
            video_id: "v1".to_string(),
            output_dir: output_dir.clone(),
            metadata: SourceMetadata {
                duration_seconds: 30.0,
                size_bytes: 0,
                container_bitrate_bps: 0,
                container_format: "mp4".to_string(),
                video: None,
                audio: None,
            },
            renditions: BTreeMap::from([(
                "720p".to_string(),
                RenditionResult {
                    label: "720p".to_string(),
                    output_path: output_dir.join("720p.mp4"),
                    preset: preset.clone(),
                },
            )]),
            manifest: Some(ManifestSet {
                master_path: output_dir.join("hls/master.m3u8"),
                variants: vec![VariantDescriptor {
                    label: "720p".to_string(),
                    bandwidth_bps: preset.bandwidth_bps(),
                    width: 1280,
                    height: 720,
                    playlist_relative_path: "720p.m3u8".to_string(),
                }],
            }),
            thumbnails: vec![output_dir.join("thumbnails/thumb_01.jpg")],
            expected_thumbnails: 1,
            preview: Some(output_dir.join("preview.mp4")),
        }
    }

    #[test]
    fn test_is_complete_requires_every_artifact() {
        let run = complete_run();
        assert!(run.is_complete(1));
        assert!(!run.is_complete(2));

        let mut missing_thumbnails = complete_run();
        missing_thumbnails.thumbnails.clear();
        assert!(!missing_thumbnails.is_complete(1));

        let mut no_preview = complete_run();
        no_preview.preview = None;
        assert!(!no_preview.is_complete(1));
    }

    #[test]
    fn test_unknown_duration_needs_no_thumbnails() {
        let mut run = complete_run();
        run.thumbnails.clear();
        run.expected_thumbnails = 0;
        assert!(run.is_complete(1));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(
            RunStage::Encoding {
                completed: 2,
                total: 5
            }
            .to_string(),
            "轉碼中 (2/5)"
        );
    }

    #[test]
    fn test_options_from_settings() {
        let settings = TranscoderSettings {
            thumbnail_count: 4,
            max_workers: 3,
            ..TranscoderSettings::default()
        };
        let options = PipelineOptions::from_settings(&settings);
        assert_eq!(options.thumbnail_count, 4);
        assert_eq!(options.max_workers, 3);
        assert_eq!(options.preview_seconds, 30);
        assert_eq!(options.output_root, PathBuf::from("./transcoded"));
    }
}
