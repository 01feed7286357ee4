//! 上传请求数据模型
//!
//! 在打开浏览器之前完成所有本地校验

use std::path::{Path, PathBuf};

use crate::error::UploadError;

/// 允许上传的视频扩展名
pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm"];

/// 一次上传请求（内存态，不落盘）
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// 本地视频文件路径
    pub video_path: PathBuf,
    /// 文案，空字符串表示不设置文案
    pub caption: String,
}

impl UploadRequest {
    /// 创建上传请求，路径校验失败则拒绝
    pub fn new(video_path: impl Into<PathBuf>, caption: impl Into<String>) -> Result<Self, UploadError> {
        let video_path = video_path.into();
        Self::validate_path(&video_path)?;
        Ok(Self {
            video_path,
            caption: caption.into(),
        })
    }

    /// 校验视频路径：文件必须存在且扩展名在允许列表内
    pub fn validate_path(path: &Path) -> Result<(), UploadError> {
        if !path.is_file() {
            return Err(UploadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        if !ALLOWED_VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::UnsupportedExtension {
                path: path.display().to_string(),
                extension,
            });
        }

        Ok(())
    }

    /// 文件名（用于展示）
    pub fn file_name(&self) -> String {
        self.video_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.video_path.display().to_string())
    }

    /// 文件名去掉扩展名（AI 文案的默认描述）
    pub fn file_stem(&self) -> String {
        self.video_path
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// 文件大小（MB），读不到时返回 0
    pub fn size_mb(&self) -> f64 {
        std::fs::metadata(&self.video_path)
            .map(|m| m.len() as f64 / 1024.0 / 1024.0)
            .unwrap_or(0.0)
    }

    pub fn has_caption(&self) -> bool {
        !self.caption.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_rejects_missing_file() {
        let err = UploadRequest::new("/no/such/video.mp4", "").unwrap_err();
        assert!(matches!(err, UploadError::FileNotFound { .. }));
    }

    #[test]
    fn test_rejects_disallowed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        let err = UploadRequest::new(&path, "").unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedExtension { .. }));
    }

    #[test]
    fn test_accepts_valid_video_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.MP4");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let request = UploadRequest::new(&path, "my caption").unwrap();
        assert_eq!(request.file_name(), "clip.MP4");
        assert_eq!(request.file_stem(), "clip");
        assert!(request.has_caption());
        assert!(request.size_mb() > 0.0);
    }

    #[test]
    fn test_blank_caption_counts_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.webm");
        fs::write(&path, b"x").unwrap();

        let request = UploadRequest::new(&path, "   ").unwrap();
        assert!(!request.has_caption());
    }
}
