//! 上傳元件
//!
//! 將整個輸出目錄上傳到物件儲存，鍵為 `videos/<video_id>/<相對路徑>`

mod content_type;
mod main;
mod object_store;

pub use content_type::{DEFAULT_CONTENT_TYPE, content_type_for};
pub use main::{ArtifactPublisher, KEY_PREFIX, object_key};
pub use object_store::{LocalObjectStore, ObjectStore};
