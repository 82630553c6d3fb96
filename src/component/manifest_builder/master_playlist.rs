use crate::config::RenditionCatalog;
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt::Write;
use std::path::PathBuf;

pub const MASTER_PLAYLIST_NAME: &str = "master.m3u8";
pub const HLS_VERSION: u32 = 3;

/// 主播放清單中的一個串流變體
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantDescriptor {
    pub label: String,
    pub bandwidth_bps: u64,
    pub width: u32,
    pub height: u32,
    /// 相對於主播放清單所在目錄
    pub playlist_relative_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSet {
    pub master_path: PathBuf,
    /// 依頻寬由高到低排列
    pub variants: Vec<VariantDescriptor>,
}

/// 依頻寬由高到低排序，同頻寬時依階梯表宣告順序
///
/// 播放器會選第一個可用的變體，最高頻寬必須排在最前面。
pub fn order_variants(catalog: &RenditionCatalog, variants: &mut [VariantDescriptor]) {
    variants.sort_by_key(|v| {
        (
            Reverse(v.bandwidth_bps),
            catalog.position(&v.label).unwrap_or(usize::MAX),
        )
    });
}

/// 產生主播放清單內容（變體須已排序）
#[must_use]
pub fn render_master_playlist(variants: &[VariantDescriptor]) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "#EXTM3U");
    let _ = writeln!(text, "#EXT-X-VERSION:{HLS_VERSION}");
    let _ = writeln!(text);

    for variant in variants {
        let _ = writeln!(
            text,
            "#EXT-X-STREAM-INF:BANDWIDTH={},RESOLUTION={}x{}",
            variant.bandwidth_bps, variant.width, variant.height
        );
        let _ = writeln!(text, "{}", variant.playlist_relative_path);
        let _ = writeln!(text);
    }
    text
}
