use crate::config::types::{MAX_RECENT_PATHS, TranscoderSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &TranscoderSettings) -> Result<()> {
    // Save to settings.json in the current working directory
    save_settings_to(settings, Path::new("settings.json"))
}

pub fn save_settings_to(settings: &TranscoderSettings, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 更新最近使用的來源檔案
/// 將新路徑加入最前面，去重並限制數量
pub fn add_recent_source(settings: &mut TranscoderSettings, path: &str) {
    settings.recent_sources.retain(|p| p != path);
    settings.recent_sources.insert(0, path.to_string());
    settings.recent_sources.truncate(MAX_RECENT_PATHS);
}
