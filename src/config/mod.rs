pub mod catalog;
pub mod load;
pub mod save;
pub mod types;

pub use catalog::{RESERVED_LABELS, RenditionCatalog, RenditionPreset};
pub use types::{Config, MAX_RECENT_PATHS, PublishSettings, TimeoutSettings, TranscoderSettings};
