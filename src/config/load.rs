use crate::config::catalog::{RenditionCatalog, RenditionPreset};
use crate::config::types::{Config, TranscoderSettings};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

/// 編譯時嵌入的預設解析度階梯表
const RENDITION_CATALOG_JSON: &str = include_str!("../data/rendition_catalog.json");

const SETTINGS_FILE: &str = "settings.json";

impl Config {
    pub fn new() -> Result<Self> {
        let settings = match Self::load_settings(Path::new(SETTINGS_FILE)) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("無法載入設定，使用預設值: {e:#}");
                TranscoderSettings::default()
            }
        };
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: TranscoderSettings) -> Result<Self> {
        let catalog = match &settings.catalog_path {
            Some(path) => Self::load_catalog_file(path)?,
            None => Self::load_embedded_catalog()?,
        };
        Ok(Self { catalog, settings })
    }

    pub fn load_settings(path: &Path) -> Result<TranscoderSettings> {
        if !path.exists() {
            return Ok(TranscoderSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// 從編譯時嵌入的 JSON 載入解析度階梯表
    pub fn load_embedded_catalog() -> Result<RenditionCatalog> {
        parse_catalog(RENDITION_CATALOG_JSON).context("無法解析嵌入的解析度階梯表")
    }

    fn load_catalog_file(path: &Path) -> Result<RenditionCatalog> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("無法讀取解析度階梯表 {}", path.display()))?;
        parse_catalog(&content)
            .with_context(|| format!("無法解析解析度階梯表 {}", path.display()))
    }
}

fn parse_catalog(raw: &str) -> Result<RenditionCatalog> {
    let presets: Vec<RenditionPreset> = serde_json::from_str(raw)?;
    RenditionCatalog::from_presets(presets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_catalog_is_monotonic_ladder() {
        let catalog = Config::load_embedded_catalog().unwrap();
        assert_eq!(
            catalog.labels(),
            vec!["2160p", "1080p", "720p", "480p", "360p"]
        );

        let presets: Vec<_> = catalog.iter().collect();
        for pair in presets.windows(2) {
            assert!(pair[0].width > pair[1].width);
            assert!(pair[0].height > pair[1].height);
            assert!(pair[0].video_bitrate_kbps > pair[1].video_bitrate_kbps);
        }
    }

    #[test]
    fn test_missing_settings_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Config::load_settings(&temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, TranscoderSettings::default());
    }

    #[test]
    fn test_partial_settings_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{"thumbnail_count": 4, "timeouts": {"encode_secs": 90}}"#).unwrap();

        let settings = Config::load_settings(&path).unwrap();
        assert_eq!(settings.thumbnail_count, 4);
        assert_eq!(settings.timeouts.encode_secs, 90);
        assert_eq!(settings.timeouts.probe_secs, 60);
        assert_eq!(settings.preview_seconds, 30);
    }

    #[test]
    fn test_custom_catalog_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ladder.json");
        fs::write(
            &path,
            r#"[{"label": "540p", "width": 960, "height": 540,
                 "video_bitrate_kbps": 1800, "audio_bitrate_kbps": 128}]"#,
        )
        .unwrap();

        let settings = TranscoderSettings {
            catalog_path: Some(path),
            ..TranscoderSettings::default()
        };
        let config = Config::with_settings(settings).unwrap();
        assert_eq!(config.catalog.labels(), vec!["540p"]);
    }

    #[test]
    fn test_invalid_custom_catalog_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ladder.json");
        fs::write(&path, "[]").unwrap();

        let settings = TranscoderSettings {
            catalog_path: Some(path),
            ..TranscoderSettings::default()
        };
        assert!(Config::with_settings(settings).is_err());
    }

    #[test]
    fn test_custom_catalog_with_colliding_label_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ladder.json");
        fs::write(
            &path,
            r#"[{"label": "preview", "width": 640, "height": 360,
                 "video_bitrate_kbps": 500, "audio_bitrate_kbps": 96}]"#,
        )
        .unwrap();

        let settings = TranscoderSettings {
            catalog_path: Some(path),
            ..TranscoderSettings::default()
        };
        let err = Config::with_settings(settings).unwrap_err();
        assert!(format!("{err:#}").contains("preview"));
    }
}
