//! 功能元件模組
//!
//! 每個子模組實現轉碼流程中的一個階段，包含主要邏輯和專用工具

pub mod artifact_publisher;
pub mod manifest_builder;
pub mod preview_extractor;
pub mod rendition_encoder;
pub mod thumbnail_sampler;
pub mod transcode_orchestrator;

pub use artifact_publisher::{ArtifactPublisher, LocalObjectStore, ObjectStore};
pub use manifest_builder::{ManifestSet, VariantDescriptor, build_manifest};
pub use preview_extractor::extract_preview;
pub use rendition_encoder::{RenditionResult, encode_rendition, encode_renditions};
pub use thumbnail_sampler::sample_thumbnails;
pub use transcode_orchestrator::{
    PipelineOptions, RunStage, TranscodeOrchestrator, TranscodeRun, validate_video_id,
};
