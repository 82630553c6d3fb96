//! 解析度轉碼元件
//!
//! 每個解析度呼叫一次 ffmpeg，輸出 `<label>.mp4`（H.264/AAC，faststart）

mod ffmpeg_command;
mod main;

pub use ffmpeg_command::RenditionCommand;
pub use main::{RenditionResult, encode_rendition, encode_renditions};
