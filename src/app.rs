use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{error, info, warn};

use crate::browser::launch_browser;
use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::interact::{self, CaptionMode};
use crate::models::UploadRequest;
use crate::services::{CaptionService, CookieStore};
use crate::utils::logging;
use crate::workflow::{LoginFlow, LoginOutcome, PublishOutcome, UploadFlow};

/// 本次运行的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 用户在确认阶段取消
    Cancelled,
    /// 发布完成
    Completed(PublishOutcome),
}

/// 应用主结构
///
/// 浏览器句柄放在 Option 里：启动失败或尚未启动时关闭逻辑照样安全
pub struct App {
    config: Config,
    browser: Option<Browser>,
}

impl App {
    /// 初始化应用
    pub fn new(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        log_startup(&config);

        Ok(Self {
            config,
            browser: None,
        })
    }

    /// 运行应用主逻辑
    ///
    /// 无论中途成败，都会先给用户检查浏览器的机会，再关闭浏览器
    pub async fn run(&mut self) -> Result<()> {
        let result = self.run_inner().await;

        match &result {
            Ok(RunOutcome::Completed(outcome)) => log_success(outcome),
            Ok(RunOutcome::Cancelled) => info!("❌ 已取消上传"),
            Err(e) => error!("❌ 运行失败: {}", e),
        }

        // 关闭前给用户留出检查浏览器的机会
        if self.browser.is_some() {
            if let Err(e) = interact::pause("检查完浏览器后") {
                warn!("⚠️ 等待确认失败: {}", e);
            }
        }
        self.shutdown().await;

        result.map(|_| ())
    }

    async fn run_inner(&mut self) -> Result<RunOutcome> {
        // ========== 阶段 1: 收集输入（不碰浏览器） ==========
        let store = CookieStore::new(&self.config.cookie_file);
        if store.exists() && interact::ask_reset_cookies()? {
            store.reset().await?;
            info!("🔄 Cookie 已重置，本次需要重新登录");
        }

        let video_path = interact::ask_video_path()?;
        let caption = self.collect_caption(&video_path).await?;
        let request = UploadRequest::new(video_path, caption)?;

        interact::print_summary(&request, &self.config.cookie_file);
        if !interact::confirm_upload()? {
            return Ok(RunOutcome::Cancelled);
        }

        // ========== 阶段 2: 启动浏览器并登录 ==========
        let (browser, page) = launch_browser(&self.config).await?;
        self.browser = Some(browser);
        let driver = PageDriver::new(page);

        info!("\n🔑 正在登录 TikTok...");
        let login_flow = LoginFlow::new(&self.config);
        match login_flow.run(&driver).await? {
            LoginOutcome::CookieReuse => info!("✅ Cookie 登录成功"),
            LoginOutcome::ManualLogin => info!("✅ 人工登录成功"),
        }

        // ========== 阶段 3: 上传并发布 ==========
        info!("\n📤 开始上传...");
        let upload_flow = UploadFlow::new(&self.config);
        let outcome = upload_flow.run(&driver, &request).await?;

        Ok(RunOutcome::Completed(outcome))
    }

    /// 按用户选择的方式取得文案
    async fn collect_caption(&self, video_path: &std::path::Path) -> Result<String> {
        match interact::ask_caption_mode()? {
            CaptionMode::Ai => {
                let default_description = video_path
                    .file_stem()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let description = interact::ask_video_description(&default_description)?;
                let caption_service = CaptionService::new(&self.config);
                Ok(caption_service.generate(&description).await)
            }
            CaptionMode::Custom => interact::ask_custom_caption(),
            CaptionMode::None => Ok(String::new()),
        }
    }

    /// 关闭浏览器，重复调用和未启动时调用都安全
    async fn shutdown(&mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("⚠️ 关闭浏览器失败: {}", e);
            }
            let _ = browser.wait().await;
            info!("👋 浏览器已关闭");
        }
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(50));
    info!("🎯 TikTok 视频上传工具");
    info!("功能: Cookie 登录 + 视频上传 + AI 文案");
    info!("🍪 Cookie 文件: {}", config.cookie_file);
    info!("{}", "=".repeat(50));
}

fn log_success(outcome: &PublishOutcome) {
    info!("\n🎉 成功！视频已上传到 TikTok！");
    match outcome {
        PublishOutcome::Automated(strategy) => info!("🚀 发布方式: {}", strategy),
        PublishOutcome::ManualConfirmed => info!("🖱️ 发布方式: 人工点击并确认"),
    }
    info!("📱 可以去个人主页查看发布的视频");
}
