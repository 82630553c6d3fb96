use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// 物件儲存客戶端
///
/// 實作需可跨執行緒共用，上傳會平行進行。
pub trait ObjectStore: Sync {
    /// 上傳單一檔案，回傳可公開存取的網址
    fn put_object(&self, key: &str, local_path: &Path, content_type: &str) -> Result<String>;
}

/// 以本機目錄模擬的物件儲存
///
/// 物件寫入 `<root>/<key>`，網址為 `<base_url>/<key>`。
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    base_url: String,
}

impl LocalObjectStore {
    #[must_use]
    pub fn new(root: &Path, base_url: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn object_path(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, part| path.join(part))
    }
}

impl ObjectStore for LocalObjectStore {
    fn put_object(&self, key: &str, local_path: &Path, content_type: &str) -> Result<String> {
        let destination = self.object_path(key);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("無法建立目錄: {}", parent.display()))?;
        }

        fs::copy(local_path, &destination).with_context(|| {
            format!(
                "無法複製 {} -> {}",
                local_path.display(),
                destination.display()
            )
        })?;

        debug!("已寫入物件 {key} ({content_type})");
        Ok(format!("{}/{key}", self.base_url))
    }
}
