//! 預覽片段元件

mod main;

pub use main::{PREVIEW_FILE_NAME, build_preview_command, extract_preview};
