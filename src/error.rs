use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 浏览器相关错误
    Browser(BrowserError),
    /// Cookie 存储错误
    Cookie(CookieError),
    /// 文案生成错误
    Caption(CaptionError),
    /// 登录流程错误
    Login(LoginError),
    /// 上传流程错误
    Upload(UploadError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Browser(e) => write!(f, "浏览器错误: {}", e),
            AppError::Cookie(e) => write!(f, "Cookie错误: {}", e),
            AppError::Caption(e) => write!(f, "文案错误: {}", e),
            AppError::Login(e) => write!(f, "登录错误: {}", e),
            AppError::Upload(e) => write!(f, "上传错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Browser(e) => Some(e),
            AppError::Cookie(e) => Some(e),
            AppError::Caption(e) => Some(e),
            AppError::Login(e) => Some(e),
            AppError::Upload(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 浏览器相关错误
#[derive(Debug)]
pub enum BrowserError {
    /// 启动浏览器失败
    LaunchFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 浏览器配置失败
    ConfigurationFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    NavigationFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 等待元素超时
    WaitTimeout { selector: String, timeout_secs: u64 },
    /// 执行脚本失败
    ScriptExecutionFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::LaunchFailed { source } => {
                write!(f, "启动浏览器失败: {}", source)
            }
            BrowserError::ConfigurationFailed { source } => {
                write!(f, "浏览器配置失败: {}", source)
            }
            BrowserError::NavigationFailed { url, source } => {
                write!(f, "导航到 {} 失败: {}", url, source)
            }
            BrowserError::WaitTimeout {
                selector,
                timeout_secs,
            } => {
                write!(f, "等待元素 '{}' 超时 ({}秒)", selector, timeout_secs)
            }
            BrowserError::ScriptExecutionFailed { source } => {
                write!(f, "执行脚本失败: {}", source)
            }
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::LaunchFailed { source }
            | BrowserError::ConfigurationFailed { source }
            | BrowserError::NavigationFailed { source, .. }
            | BrowserError::ScriptExecutionFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            BrowserError::WaitTimeout { .. } => None,
        }
    }
}

/// Cookie 存储错误
#[derive(Debug)]
pub enum CookieError {
    /// 读取 Cookie 文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入 Cookie 文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for CookieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieError::ReadFailed { path, source } => {
                write!(f, "读取 Cookie 文件 {} 失败: {}", path, source)
            }
            CookieError::WriteFailed { path, source } => {
                write!(f, "写入 Cookie 文件 {} 失败: {}", path, source)
            }
        }
    }
}

impl std::error::Error for CookieError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CookieError::ReadFailed { source, .. } | CookieError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 文案生成错误
#[derive(Debug)]
pub enum CaptionError {
    /// 未配置 LLM 凭证
    NoCredentials,
    /// LLM 返回内容为空
    EmptyResponse,
    /// LLM 返回内容超长
    TooLong { chars: usize, max_chars: usize },
    /// LLM API 调用失败
    RequestFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for CaptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptionError::NoCredentials => write!(f, "未配置 LLM API 凭证"),
            CaptionError::EmptyResponse => write!(f, "LLM 返回内容为空"),
            CaptionError::TooLong { chars, max_chars } => {
                write!(f, "LLM 返回文案超长 ({} 字符, 上限 {})", chars, max_chars)
            }
            CaptionError::RequestFailed { source } => {
                write!(f, "LLM API 调用失败: {}", source)
            }
        }
    }
}

impl std::error::Error for CaptionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptionError::RequestFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 登录流程错误
#[derive(Debug)]
pub enum LoginError {
    /// 手动登录等待超时
    Timeout { waited_secs: u64 },
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::Timeout { waited_secs } => {
                write!(f, "登录等待超时 (已等待 {} 秒)", waited_secs)
            }
        }
    }
}

impl std::error::Error for LoginError {}

/// 上传流程错误
#[derive(Debug)]
pub enum UploadError {
    /// 视频文件不存在
    FileNotFound { path: String },
    /// 视频文件扩展名不受支持
    UnsupportedExtension { path: String, extension: String },
    /// 页面上找不到文件上传控件
    FileInputMissing { timeout_secs: u64 },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::FileNotFound { path } => {
                write!(f, "视频文件不存在: {}", path)
            }
            UploadError::UnsupportedExtension { path, extension } => {
                write!(
                    f,
                    "不支持的视频格式 '{}' ({}), 支持: mp4/mov/avi/mkv/webm",
                    extension, path
                )
            }
            UploadError::FileInputMissing { timeout_secs } => {
                write!(f, "{}秒内未找到文件上传控件，页面可能未就绪", timeout_secs)
            }
        }
    }
}

impl std::error::Error for UploadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_display() {
        let err = UploadError::UnsupportedExtension {
            path: "demo.txt".to_string(),
            extension: "txt".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("txt"));
        assert!(msg.contains("mp4"));
    }

    #[test]
    fn test_app_error_wraps_source() {
        let err = AppError::Login(LoginError::Timeout { waited_secs: 300 });
        assert!(err.to_string().contains("300"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_caption_error_too_long() {
        let err = CaptionError::TooLong {
            chars: 250,
            max_chars: 200,
        };
        assert!(err.to_string().contains("250"));
    }
}
