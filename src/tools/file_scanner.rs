use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    /// 相對於掃描根目錄的路徑，以 `/` 分隔
    pub relative_path: String,
    pub size: u64,
}

/// 掃描目錄下所有一般檔案，依相對路徑排序
pub fn scan_all_files(directory: &Path) -> Vec<FileInfo> {
    let mut files: Vec<FileInfo> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            let relative_path = entry
                .path()
                .strip_prefix(directory)
                .ok()?
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            Some(FileInfo {
                path: entry.into_path(),
                relative_path,
                size: metadata.len(),
            })
        })
        .collect();

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    files
}
