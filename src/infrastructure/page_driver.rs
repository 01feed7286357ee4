//! 页面驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"导航 / 等待 / 点击 / 注入"这些能力

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::network::{CookieParam, SetCookiesParams};
use chromiumoxide::{Element, Page};
use serde_json::Value as JsonValue;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::{AppError, BrowserError};
use crate::models::SessionCookie;

/// `wait_for` 的固定轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 页面驱动
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露浏览器操作原语
/// - 不认识登录/上传流程
pub struct PageDriver {
    page: Page,
}

impl PageDriver {
    /// 创建新的页面驱动
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 导航到指定 URL 并等待导航完成
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!("导航到: {}", url);
        self.page.goto(url).await.map_err(|e| {
            AppError::Browser(BrowserError::NavigationFailed {
                url: url.to_string(),
                source: Box::new(e),
            })
        })?;
        self.page.wait_for_navigation().await.map_err(|e| {
            AppError::Browser(BrowserError::NavigationFailed {
                url: url.to_string(),
                source: Box::new(e),
            })
        })?;
        Ok(())
    }

    /// 刷新当前页面
    pub async fn reload(&self) -> Result<()> {
        self.page.reload().await?;
        Ok(())
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await.map_err(|e| {
            AppError::Browser(BrowserError::ScriptExecutionFailed {
                source: Box::new(e),
            })
        })?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 在固定超时内等待元素出现
    ///
    /// 以 500ms 为间隔轮询，超时返回 `BrowserError::WaitTimeout`
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Element> {
        let start = Instant::now();
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }
            if start.elapsed() >= timeout {
                return Err(AppError::Browser(BrowserError::WaitTimeout {
                    selector: selector.to_string(),
                    timeout_secs: timeout.as_secs(),
                })
                .into());
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// 立即查找元素，找不到返回 None
    pub async fn find(&self, selector: &str) -> Option<Element> {
        self.page.find_element(selector).await.ok()
    }

    /// 立即查找所有匹配元素
    pub async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
        Ok(self.page.find_elements(selector).await.unwrap_or_default())
    }

    /// 读取当前会话的所有 Cookie
    pub async fn get_cookies(&self) -> Result<Vec<SessionCookie>> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies
            .into_iter()
            .map(|c| SessionCookie {
                name: c.name,
                value: c.value,
                domain: c.domain,
                path: c.path,
                secure: Some(c.secure),
                http_only: Some(c.http_only),
            })
            .collect())
    }

    /// 注入单个 Cookie
    ///
    /// 每个 Cookie 单独下发，浏览器拒收（域名/格式问题）只影响自己
    pub async fn add_cookie(&self, cookie: &SessionCookie) -> Result<()> {
        let mut param = CookieParam::new(cookie.name.clone(), cookie.value.clone());
        param.domain = Some(cookie.domain.clone());
        param.path = Some(cookie.path.clone());
        param.secure = cookie.secure;
        param.http_only = cookie.http_only;

        self.page
            .execute(SetCookiesParams::new(vec![param]))
            .await?;
        Ok(())
    }

    /// 把本地文件路径提交给文件上传控件
    ///
    /// `<input type="file">` 出于安全原因不能用 JS 赋值，必须走 CDP 命令
    pub async fn set_file_input(&self, element: &Element, path: &Path) -> Result<()> {
        let params = SetFileInputFilesParams {
            files: vec![path.to_string_lossy().to_string()],
            node_id: None,
            backend_node_id: Some(element.backend_node_id.clone()),
            object_id: None,
        };
        self.page.execute(params).await?;
        Ok(())
    }

    /// 清空当前聚焦的编辑框（全选 + 删除）
    ///
    /// 文案编辑框是 contenteditable，站点会预填文件名，输入前必须清掉
    pub async fn clear_focused_editor(&self) -> Result<()> {
        let result = self
            .eval(
                "(() => { document.execCommand('selectAll', false, null); \
                 document.execCommand('delete', false, null); return true; })()",
            )
            .await;
        if let Err(e) = result {
            warn!("清空编辑框失败: {}", e);
        }
        Ok(())
    }
}
