use super::run::{PipelineOptions, RunStage, TranscodeRun};
use crate::component::manifest_builder::build_manifest;
use crate::component::preview_extractor::extract_preview;
use crate::component::rendition_encoder::{RenditionResult, encode_renditions};
use crate::component::thumbnail_sampler::{sample_thumbnails, select_timestamps};
use crate::config::RenditionCatalog;
use crate::error::{Result, TranscodeError};
use crate::tools::{probe_source, reset_directory, validate_source_file};
use log::{error, info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

pub const HLS_DIR_NAME: &str = "hls";
pub const THUMBNAILS_DIR_NAME: &str = "thumbnails";

/// 影片 ID 會成為目錄名稱與物件鍵前綴
static REGEX_VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,127}$").expect("Invalid regex"));

/// 檢查影片 ID 是否可安全作為目錄名稱與物件鍵前綴
pub fn validate_video_id(video_id: &str) -> Result<()> {
    if REGEX_VIDEO_ID.is_match(video_id) {
        Ok(())
    } else {
        Err(TranscodeError::InvalidVideoId {
            video_id: video_id.to_string(),
        })
    }
}

/// 轉碼流程
///
/// 五階段：
/// A. 探測影片資訊（ffprobe）
/// B. 平行轉碼各解析度，同時擷取預覽片段
/// C. 產生 HLS 播放清單
/// D. 平行擷取縮圖
/// E. 彙整結果
pub struct TranscodeOrchestrator {
    catalog: RenditionCatalog,
    options: PipelineOptions,
    pool: ThreadPool,
}

impl TranscodeOrchestrator {
    pub fn new(catalog: RenditionCatalog, options: PipelineOptions) -> anyhow::Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(options.max_workers)
            .thread_name(|i| format!("transcode-{i}"))
            .build()?;

        Ok(Self {
            catalog,
            options,
            pool,
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &RenditionCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn run(&self, source_path: &Path, video_id: &str, labels: &[String]) -> Result<TranscodeRun> {
        self.run_with_observer(source_path, video_id, labels, &|_| {})
    }

    /// 執行完整流程，每次階段變化呼叫 `observer`
    ///
    /// 只有來源不存在、影片 ID 不合法或探測失敗會回傳錯誤；
    /// 其餘失敗只會讓結果缺少對應的產物。
    pub fn run_with_observer(
        &self,
        source_path: &Path,
        video_id: &str,
        labels: &[String],
        observer: &(dyn Fn(RunStage) + Sync),
    ) -> Result<TranscodeRun> {
        observer(RunStage::Pending);

        validate_video_id(video_id)?;
        validate_source_file(source_path)?;

        info!("開始轉碼影片 {video_id}: {}", source_path.display());
        let toolchain = &self.options.toolchain;

        observer(RunStage::Probing);
        let metadata = probe_source(toolchain, source_path)?;

        // 同一 ID 重新轉碼時，舊產物不可留在本次的輸出目錄中
        let output_dir = self.options.output_root.join(video_id);
        reset_directory(&output_dir)?;

        let presets = self.catalog.resolve(labels);
        let total = presets.len();
        observer(RunStage::Encoding {
            completed: 0,
            total,
        });

        let (encoded, preview) = self.pool.install(|| {
            rayon::join(
                || {
                    encode_renditions(
                        toolchain,
                        source_path,
                        &output_dir,
                        &presets,
                        &|completed, total| observer(RunStage::Encoding { completed, total }),
                    )
                },
                || {
                    extract_preview(
                        toolchain,
                        source_path,
                        &output_dir,
                        self.options.preview_seconds,
                    )
                },
            )
        });

        info!("轉碼結果: 成功 {}/{}", encoded.len(), total);

        observer(RunStage::BuildingManifest);
        let manifest = match self.pool.install(|| {
            build_manifest(
                toolchain,
                &output_dir.join(HLS_DIR_NAME),
                &self.catalog,
                &encoded,
            )
        }) {
            Ok(manifest) => Some(manifest),
            Err(TranscodeError::NoVariants) => {
                warn!("沒有可用的串流變體，略過主播放清單");
                None
            }
            Err(e) => {
                error!("產生播放清單失敗: {e}");
                None
            }
        };

        observer(RunStage::Sampling);
        let expected_thumbnails =
            select_timestamps(metadata.duration_seconds, self.options.thumbnail_count).len();
        let thumbnails = self
            .pool
            .install(|| {
                sample_thumbnails(
                    toolchain,
                    source_path,
                    &output_dir.join(THUMBNAILS_DIR_NAME),
                    metadata.duration_seconds,
                    self.options.thumbnail_count,
                    self.options.thumbnail_width,
                )
            })
            .unwrap_or_else(|e| {
                error!("縮圖擷取失敗: {e}");
                Vec::new()
            });

        let renditions: BTreeMap<String, RenditionResult> = encoded
            .into_iter()
            .map(|r| (r.label.clone(), r))
            .collect();

        observer(RunStage::Done);
        info!("影片 {video_id} 轉碼完成");

        Ok(TranscodeRun {
            video_id: video_id.to_string(),
            output_dir,
            metadata,
            renditions,
            manifest,
            thumbnails,
            expected_thumbnails,
            preview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tools::Toolchain;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn orchestrator(output_root: &Path) -> TranscodeOrchestrator {
        let options = PipelineOptions {
            output_root: output_root.to_path_buf(),
            toolchain: Toolchain {
                ffmpeg: PathBuf::from("/nonexistent/ffmpeg"),
                ffprobe: PathBuf::from("/nonexistent/ffprobe"),
                ..Toolchain::default()
            },
            max_workers: 2,
            thumbnail_count: 3,
            thumbnail_width: 320,
            preview_seconds: 30,
        };
        TranscodeOrchestrator::new(Config::load_embedded_catalog().unwrap(), options).unwrap()
    }

    #[test]
    fn test_video_id_validation() {
        assert!(validate_video_id("video_123").is_ok());
        assert!(matches!(
            validate_video_id("../escape"),
            Err(TranscodeError::InvalidVideoId { .. })
        ));
        assert!(REGEX_VIDEO_ID.is_match("video_123"));
        assert!(REGEX_VIDEO_ID.is_match("a1b2-c3.d4"));
        assert!(!REGEX_VIDEO_ID.is_match(""));
        assert!(!REGEX_VIDEO_ID.is_match(".."));
        assert!(!REGEX_VIDEO_ID.is_match("../etc"));
        assert!(!REGEX_VIDEO_ID.is_match("a/b"));
    }

    #[test]
    fn test_missing_source_aborts_before_any_work() {
        let temp_dir = TempDir::new().unwrap();
        let orchestrator = orchestrator(temp_dir.path());
        let stages = Mutex::new(Vec::new());

        let result = orchestrator.run_with_observer(
            &temp_dir.path().join("missing.mp4"),
            "video_1",
            &[],
            &|stage| stages.lock().unwrap().push(stage),
        );

        assert!(matches!(result, Err(TranscodeError::Precondition { .. })));
        assert_eq!(stages.into_inner().unwrap(), vec![RunStage::Pending]);
        assert!(!temp_dir.path().join("video_1").exists());
    }

    #[test]
    fn test_probe_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source.mp4");
        std::fs::write(&source, b"not really a video").unwrap();

        let result = orchestrator(temp_dir.path()).run(&source, "video_1", &[]);

        match result {
            Err(err @ TranscodeError::Probe { .. }) => {
                assert!(err.is_fatal());
                assert!(err.to_string().contains("source.mp4"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unsafe_video_id_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source.mp4");
        std::fs::write(&source, b"data").unwrap();

        let result = orchestrator(temp_dir.path()).run(&source, "../escape", &[]);
        assert!(matches!(result, Err(TranscodeError::InvalidVideoId { .. })));
    }
}
