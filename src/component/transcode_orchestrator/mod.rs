//! 轉碼流程元件
//!
//! 探測 → 各解析度轉碼 → HLS 播放清單 → 縮圖 → 預覽片段，
//! 彙整為 [`TranscodeRun`]

mod main;
mod run;

pub use main::{HLS_DIR_NAME, THUMBNAILS_DIR_NAME, TranscodeOrchestrator, validate_video_id};
pub use run::{PipelineOptions, RunStage, TranscodeRun};
