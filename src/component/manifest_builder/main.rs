use super::master_playlist::{
    MASTER_PLAYLIST_NAME, ManifestSet, VariantDescriptor, order_variants, render_master_playlist,
};
use super::segmenter::segment_rendition;
use crate::component::rendition_encoder::RenditionResult;
use crate::config::RenditionCatalog;
use crate::error::{Result, TranscodeError};
use crate::tools::{Toolchain, ensure_directory_exists};
use log::{error, info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// 由成功的轉碼結果建立 HLS 主播放清單與各變體播放清單
///
/// 切片失敗的解析度不列入主播放清單；沒有任何變體成功時回傳
/// [`TranscodeError::NoVariants`]，且目錄中不會留有主播放清單
/// （包括先前執行留下的）。
pub fn build_manifest(
    toolchain: &Toolchain,
    hls_dir: &Path,
    catalog: &RenditionCatalog,
    renditions: &[RenditionResult],
) -> Result<ManifestSet> {
    let master_path = hls_dir.join(MASTER_PLAYLIST_NAME);
    remove_stale_master(&master_path)?;

    let known: Vec<&RenditionResult> = renditions
        .iter()
        .filter(|r| {
            let in_catalog = catalog.preset_for(&r.label).is_some();
            if !in_catalog {
                warn!("解析度 {} 不在階梯表中，不列入播放清單", r.label);
            }
            in_catalog
        })
        .collect();

    if known.is_empty() {
        return Err(TranscodeError::NoVariants);
    }

    ensure_directory_exists(hls_dir)?;

    let mut variants: Vec<VariantDescriptor> = known
        .par_iter()
        .map(|rendition| segment_rendition(toolchain, hls_dir, rendition))
        .collect::<Vec<_>>()
        .into_iter()
        .filter_map(|result| match result {
            Ok(variant) => Some(variant),
            Err(e) => {
                error!("{e}，不列入主播放清單");
                None
            }
        })
        .collect();

    if variants.is_empty() {
        return Err(TranscodeError::NoVariants);
    }

    order_variants(catalog, &mut variants);

    fs::write(&master_path, render_master_playlist(&variants))
        .map_err(|e| TranscodeError::io(&master_path, e))?;

    info!(
        "主播放清單已產生: {}（{} 個變體）",
        master_path.display(),
        variants.len()
    );

    Ok(ManifestSet {
        master_path,
        variants,
    })
}

fn remove_stale_master(master_path: &Path) -> Result<()> {
    match fs::remove_file(master_path) {
        Ok(()) => {
            info!("已刪除舊的主播放清單: {}", master_path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TranscodeError::io(master_path, e)),
    }
}
