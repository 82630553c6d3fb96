use super::ffmpeg_command::RenditionCommand;
use crate::config::RenditionPreset;
use crate::error::{Result, TranscodeError};
use crate::tools::Toolchain;
use log::{error, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 成功轉碼的解析度（失敗的不會產生此紀錄）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenditionResult {
    pub label: String,
    pub output_path: PathBuf,
    pub preset: RenditionPreset,
}

/// 轉碼單一解析度
///
/// 失敗時刪除殘留的輸出檔並回傳 [`TranscodeError::Encode`]，由呼叫端決定略過。
pub fn encode_rendition(
    toolchain: &Toolchain,
    source_path: &Path,
    output_dir: &Path,
    preset: &RenditionPreset,
) -> Result<RenditionResult> {
    let command = RenditionCommand::new(source_path, output_dir, preset);
    let destination = command.destination_path().to_path_buf();

    info!("轉碼 {} -> {}", preset.label, destination.display());

    if let Err(source) = command.build_command(toolchain).execute() {
        remove_partial_output(&destination);
        return Err(TranscodeError::Encode {
            label: preset.label.clone(),
            source,
        });
    }

    info!("轉碼完成: {}", preset.label);
    Ok(RenditionResult {
        label: preset.label.clone(),
        output_path: destination,
        preset: preset.clone(),
    })
}

/// 平行轉碼多個解析度，回傳成功的結果（順序與輸入相同）
///
/// 每完成一個（不論成敗）呼叫一次 `on_finished(已完成, 總數)`。
/// 平行度由呼叫端所在的 rayon 執行緒池決定。
pub fn encode_renditions(
    toolchain: &Toolchain,
    source_path: &Path,
    output_dir: &Path,
    presets: &[RenditionPreset],
    on_finished: &(dyn Fn(usize, usize) + Sync),
) -> Vec<RenditionResult> {
    let total = presets.len();
    let finished = AtomicUsize::new(0);

    presets
        .par_iter()
        .map(|preset| {
            let result = encode_rendition(toolchain, source_path, output_dir, preset);
            on_finished(finished.fetch_add(1, Ordering::SeqCst) + 1, total);
            result
        })
        .collect::<Vec<_>>()
        .into_iter()
        .filter_map(|result| match result {
            Ok(rendition) => Some(rendition),
            Err(e) => {
                error!("{e}，略過此解析度");
                None
            }
        })
        .collect()
}

fn remove_partial_output(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!("無法刪除失敗的輸出檔案 {}: {e}", path.display());
        } else {
            info!("已刪除失敗的輸出檔案: {}", path.display());
        }
    }
}
