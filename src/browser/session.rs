use std::path::Path;

use anyhow::Result;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, BrowserError};

/// 在每次导航前注入的反检测脚本
///
/// 自动化启动的 Chromium 会暴露 `navigator.webdriver = true`，
/// TikTok 以此识别机器人，必须在任何页面脚本执行前抹掉
const STEALTH_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });";

/// 启动带界面的浏览器并准备好一个空白页面
///
/// 登录需要人工扫码或输入账号，所以浏览器必须可见；
/// 同时关闭自动化指纹相关的开关，伪装成普通用户的 Chrome
pub async fn launch_browser(config: &Config) -> Result<(Browser, Page)> {
    info!("🔧 正在启动浏览器...");

    let mut builder = BrowserConfig::builder()
        .with_head()
        .window_size(1200, 800)
        .args(vec![
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-blink-features=AutomationControlled",
            "--disable-gpu",
            "--no-first-run",
            "--disable-default-apps",
        ]);

    // 允许通过配置指定浏览器可执行文件，否则交给 chromiumoxide 自动探测
    if !config.chrome_executable.is_empty() {
        builder = builder.chrome_executable(Path::new(&config.chrome_executable));
    }

    let browser_config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        anyhow::anyhow!("配置浏览器失败: {}", e)
    })?;

    // 启动浏览器
    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        AppError::Browser(BrowserError::LaunchFailed {
            source: Box::new(e),
        })
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        AppError::Browser(BrowserError::LaunchFailed {
            source: Box::new(e),
        })
    })?;

    // 伪装 User-Agent 并注入反检测脚本，必须在首次导航之前完成
    page.execute(SetUserAgentOverrideParams::new(config.user_agent.clone()))
        .await
        .map_err(|e| {
            AppError::Browser(BrowserError::ConfigurationFailed {
                source: Box::new(e),
            })
        })?;
    page.execute(AddScriptToEvaluateOnNewDocumentParams::new(STEALTH_SCRIPT))
        .await
        .map_err(|e| {
            AppError::Browser(BrowserError::ConfigurationFailed {
                source: Box::new(e),
            })
        })?;

    info!("✅ 浏览器已就绪");
    Ok((browser, page))
}
