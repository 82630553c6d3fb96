//! 縮圖取樣元件
//!
//! 依影片長度平均選取時間點，平行擷取單張畫面

mod main;
mod thumbnail_extractor;
mod timestamp_selector;

pub use main::sample_thumbnails;
pub use thumbnail_extractor::{
    THUMBNAIL_WIDTH, ThumbnailResult, ThumbnailTask, build_thumbnail_command,
    create_thumbnail_tasks, extract_thumbnail, extract_thumbnails_parallel,
};
pub use timestamp_selector::select_timestamps;
