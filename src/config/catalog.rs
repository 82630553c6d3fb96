use anyhow::{Result, bail};
use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// 標籤會成為檔名（`<label>.mp4`、`<label>.m3u8`、`<label>_%03d.ts`）
static REGEX_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,31}$").expect("Invalid regex"));

/// 與預覽片段、主播放清單同名，不可作為標籤
pub const RESERVED_LABELS: &[&str] = &["preview", "master"];

/// 單一解析度的編碼參數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenditionPreset {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub video_bitrate_kbps: u32,
    pub audio_bitrate_kbps: u32,
}

impl RenditionPreset {
    /// 主播放清單宣告的頻寬（不含音訊位元率）
    #[must_use]
    pub const fn bandwidth_bps(&self) -> u64 {
        self.video_bitrate_kbps as u64 * 1000
    }
}

/// 解析度階梯表
///
/// 啟動時建立一次，之後唯讀；宣告順序即為同頻寬時的排序依據。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenditionCatalog {
    presets: Vec<RenditionPreset>,
}

impl RenditionCatalog {
    pub fn from_presets(presets: Vec<RenditionPreset>) -> Result<Self> {
        if presets.is_empty() {
            bail!("解析度階梯表不可為空");
        }

        let mut seen = HashSet::new();
        for preset in &presets {
            if !REGEX_LABEL.is_match(&preset.label) {
                bail!(
                    "解析度標籤只能包含英數字、底線與連字號: {:?}",
                    preset.label
                );
            }
            if RESERVED_LABELS
                .iter()
                .any(|reserved| reserved.eq_ignore_ascii_case(&preset.label))
            {
                bail!("解析度標籤 {} 為保留名稱", preset.label);
            }
            if !seen.insert(preset.label.as_str()) {
                bail!("解析度標籤重複: {}", preset.label);
            }
            if preset.width == 0
                || preset.height == 0
                || preset.video_bitrate_kbps == 0
                || preset.audio_bitrate_kbps == 0
            {
                bail!("解析度 {} 的尺寸與位元率必須大於 0", preset.label);
            }
        }

        Ok(Self { presets })
    }

    #[must_use]
    pub fn preset_for(&self, label: &str) -> Option<&RenditionPreset> {
        self.presets.iter().find(|p| p.label == label)
    }

    /// 標籤在表中的宣告順序
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.presets.iter().position(|p| p.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenditionPreset> {
        self.presets.iter()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.label.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// 將使用者指定的標籤轉為參數列表
    ///
    /// 空列表代表全部；未知或重複的標籤會被略過並記錄警告，不會中止。
    #[must_use]
    pub fn resolve(&self, labels: &[String]) -> Vec<RenditionPreset> {
        if labels.is_empty() {
            return self.presets.clone();
        }

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(labels.len());
        for label in labels {
            let Some(preset) = self.preset_for(label) else {
                warn!("未知的解析度: {label}，略過");
                continue;
            };
            if !seen.insert(label.as_str()) {
                warn!("解析度 {label} 重複指定，略過");
                continue;
            }
            resolved.push(preset.clone());
        }
        resolved
    }
}
