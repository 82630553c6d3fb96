use super::content_type::content_type_for;
use super::object_store::ObjectStore;
use crate::error::TranscodeError;
use crate::tools::scan_all_files;
use log::{error, info};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// 物件鍵的共用前綴
pub const KEY_PREFIX: &str = "videos";

#[must_use]
pub fn object_key(video_id: &str, relative_path: &str) -> String {
    format!("{KEY_PREFIX}/{video_id}/{relative_path}")
}

/// 上傳轉碼結果
pub struct ArtifactPublisher<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> ArtifactPublisher<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// 上傳 `local_dir` 下所有檔案，回傳「相對路徑 → 網址」
    ///
    /// 上傳失敗的檔案記錄錯誤後略過，不重試，也不會出現在結果中。
    pub fn publish(&self, video_id: &str, local_dir: &Path) -> BTreeMap<String, String> {
        let files = scan_all_files(local_dir);
        info!("開始上傳 {} 個檔案: {}", files.len(), local_dir.display());

        let uploaded: BTreeMap<String, String> = files
            .par_iter()
            .filter_map(|file| {
                let key = object_key(video_id, &file.relative_path);
                let content_type = content_type_for(&file.path);

                match self.store.put_object(&key, &file.path, content_type) {
                    Ok(url) => {
                        info!("已上傳 {}", file.relative_path);
                        Some((file.relative_path.clone(), url))
                    }
                    Err(e) => {
                        let err = TranscodeError::Publish {
                            relative_path: file.relative_path.clone(),
                            reason: format!("{e:#}"),
                        };
                        error!("{err}");
                        None
                    }
                }
            })
            .collect();

        info!("上傳完成: {}/{}", uploaded.len(), files.len());
        uploaded
    }
}
