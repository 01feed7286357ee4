//! Cookie 存储服务 - 业务能力层
//!
//! 只负责 cookies.json 的读写，不认识浏览器

use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{AppError, CookieError};
use crate::models::SessionCookie;

/// Cookie 存储
///
/// 磁盘格式是一个 JSON 数组，整体覆盖写入，没有追加或合并。
/// 单条记录损坏只丢弃那一条，整个文件损坏退化为空列表，都不会中断运行
pub struct CookieStore {
    path: PathBuf,
}

impl CookieStore {
    /// 创建新的 Cookie 存储
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cookie 文件是否已存在
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// 读取 Cookie 列表
    ///
    /// 文件不存在时创建空文件并返回空列表；
    /// 无法解析的条目跳过并告警，其余照常返回
    pub async fn load(&self) -> Result<Vec<SessionCookie>> {
        if !self.path.exists() {
            info!("📝 {} 不存在，创建空 Cookie 文件", self.path.display());
            self.write_json("[]").await?;
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::Cookie(CookieError::ReadFailed {
                path: self.path.display().to_string(),
                source: Box::new(e),
            })
        })?;

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("⚠️ Cookie 文件解析失败，按空处理: {}", e);
                return Ok(Vec::new());
            }
        };

        let total = entries.len();
        let mut cookies = Vec::new();
        for entry in entries {
            match serde_json::from_value::<SessionCookie>(entry) {
                Ok(cookie) if cookie.is_valid() => cookies.push(cookie),
                Ok(cookie) => {
                    warn!("⚠️ 跳过无效 Cookie: name='{}'", cookie.name);
                }
                Err(e) => {
                    warn!("⚠️ 跳过无法解析的 Cookie 条目: {}", e);
                }
            }
        }

        debug!("从 {} 读取 {}/{} 条 Cookie", self.path.display(), cookies.len(), total);
        Ok(cookies)
    }

    /// 保存 Cookie 列表，只写入有效条目
    ///
    /// # 返回
    /// 实际写入的条目数
    pub async fn save(&self, cookies: &[SessionCookie]) -> Result<usize> {
        let valid: Vec<&SessionCookie> = cookies.iter().filter(|c| c.is_valid()).collect();
        let json = serde_json::to_string_pretty(&valid)?;
        self.write_json(&json).await?;
        info!("💾 已保存 {} 条 Cookie 到 {}", valid.len(), self.path.display());
        Ok(valid.len())
    }

    /// 清空 Cookie 文件，强制下次运行重新登录
    pub async fn reset(&self) -> Result<()> {
        self.write_json("[]").await?;
        info!("🔄 已重置 {}", self.path.display());
        Ok(())
    }

    async fn write_json(&self, json: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Cookie(CookieError::WriteFailed {
                        path: self.path.display().to_string(),
                        source: Box::new(e),
                    })
                })?;
            }
        }
        fs::write(&self.path, json).await.map_err(|e| {
            AppError::Cookie(CookieError::WriteFailed {
                path: self.path.display().to_string(),
                source: Box::new(e),
            })
        })?;
        Ok(())
    }
}
