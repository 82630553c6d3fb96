//! HLS 播放清單產生元件
//!
//! 1. 每個解析度以 `-c copy` 切成 6 秒片段並產生變體播放清單
//! 2. 依頻寬由高到低（同頻寬依階梯表順序）排列變體
//! 3. 寫出主播放清單

mod main;
mod master_playlist;
mod segmenter;

pub use main::build_manifest;
pub use master_playlist::{
    HLS_VERSION, MASTER_PLAYLIST_NAME, ManifestSet, VariantDescriptor, order_variants,
    render_master_playlist,
};
pub use segmenter::{
    SEGMENT_SECONDS, build_segment_command, remove_variant_files, segment_rendition,
    variant_playlist_name,
};
