//! 登录流程 - 流程层
//!
//! 核心职责：把浏览器带到已登录状态
//!
//! 流程顺序：
//! 1. 注入已保存的 Cookie → 刷新 → 探测登录标志
//! 2. 直接访问上传页 → 检查上传控件
//! 3. 人工登录等待（兜底，轮询数分钟）
//!
//! 任何一步成功都会把当前会话的 Cookie 回写到磁盘

use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, LoginError};
use crate::infrastructure::PageDriver;
use crate::models::selectors::{FILE_INPUT_SELECTOR, LOGIN_PROBE_SELECTORS, LOGIN_WAIT_SELECTORS};
use crate::services::CookieStore;

/// 登录结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Cookie 复用成功，无需人工介入
    CookieReuse,
    /// 人工登录后成功
    ManualLogin,
}

/// 登录流程
///
/// - 编排 Cookie 注入、登录探测、人工等待
/// - 不持有任何资源（page）
/// - 只依赖业务能力（CookieStore）
pub struct LoginFlow {
    store: CookieStore,
    home_url: String,
    upload_url: String,
    page_settle: Duration,
    probe_timeout: Duration,
    verify_timeout: Duration,
    poll_interval: Duration,
    max_attempts: usize,
}

impl LoginFlow {
    /// 创建新的登录流程
    pub fn new(config: &Config) -> Self {
        Self {
            store: CookieStore::new(&config.cookie_file),
            home_url: config.home_url.clone(),
            upload_url: config.upload_url.clone(),
            page_settle: Duration::from_secs(config.page_settle_secs),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            verify_timeout: Duration::from_secs(config.login_verify_timeout_secs),
            poll_interval: Duration::from_secs(config.login_poll_interval_secs),
            max_attempts: config.login_max_attempts,
        }
    }

    /// Cookie 存储（重置提示等场景也要用）
    pub fn cookie_store(&self) -> &CookieStore {
        &self.store
    }

    /// 人工登录等待的总预算（秒）
    pub fn manual_wait_budget_secs(&self) -> u64 {
        self.max_attempts as u64 * self.poll_interval.as_secs()
    }

    pub async fn run(&self, driver: &PageDriver) -> Result<LoginOutcome> {
        info!("🌐 正在打开 TikTok 首页...");
        driver.navigate(&self.home_url).await?;
        sleep(self.page_settle).await;

        // ========== 阶段 1: 注入已保存的 Cookie ==========
        let saved = self.store.load().await?;
        let mut injected = 0usize;
        if !saved.is_empty() {
            for cookie in &saved {
                match driver.add_cookie(cookie).await {
                    Ok(()) => injected += 1,
                    Err(e) => {
                        // 单个 Cookie 被拒收不影响其余的注入
                        warn!("⚠️ Cookie '{}' 注入失败: {}", cookie.name, e);
                    }
                }
            }
            info!("🍪 已注入 {}/{} 条 Cookie", injected, saved.len());

            info!("🔄 刷新页面应用 Cookie...");
            driver.reload().await?;
            sleep(self.page_settle).await;
        } else {
            info!("📝 没有已保存的 Cookie，需要登录");
        }

        // ========== 阶段 2: 探测登录标志 ==========
        if injected > 0 {
            for selector in LOGIN_PROBE_SELECTORS {
                if driver.wait_for(selector, self.probe_timeout).await.is_ok() {
                    info!("✅ 检测到已登录状态 ({})", selector);
                    info!("🔄 正在进入上传页...");
                    driver.navigate(&self.upload_url).await?;
                    sleep(self.page_settle).await;

                    if driver
                        .wait_for(FILE_INPUT_SELECTOR, self.verify_timeout)
                        .await
                        .is_ok()
                    {
                        self.persist_session(driver).await;
                        return Ok(LoginOutcome::CookieReuse);
                    }
                    // 首页标志命中但上传页不可用，继续走人工登录
                    warn!("⚠️ 上传页未就绪，Cookie 可能已过期");
                    break;
                }
            }
        }

        // ========== 阶段 3: 直接检查上传页是否可用 ==========
        info!("🔄 正在打开上传页...");
        driver.navigate(&self.upload_url).await?;
        sleep(self.page_settle).await;

        if driver
            .wait_for(FILE_INPUT_SELECTOR, self.verify_timeout)
            .await
            .is_ok()
        {
            info!("✅ 上传页可直接访问，已处于登录状态");
            self.persist_session(driver).await;
            return Ok(LoginOutcome::CookieReuse);
        }

        // ========== 阶段 4: 人工登录等待 ==========
        self.manual_login_wait(driver).await?;
        self.persist_session(driver).await;
        Ok(LoginOutcome::ManualLogin)
    }

    /// 轮询等待人工完成登录
    ///
    /// 每隔固定间隔探测一轮登录成功标志，预算耗尽视为终态失败
    async fn manual_login_wait(&self, driver: &PageDriver) -> Result<()> {
        info!("{}", "=".repeat(50));
        info!("🔑 需要人工登录");
        info!("📱 请在浏览器中完成登录:");
        info!("   • 用 TikTok 手机 App 扫描二维码");
        info!("   • 或使用邮箱/密码登录");
        info!("   • 或使用手机号登录");
        info!("⏳ 脚本会自动检测登录完成...");
        info!("{}", "=".repeat(50));

        for attempt in 0..self.max_attempts {
            for selector in LOGIN_WAIT_SELECTORS {
                if driver.find(selector).await.is_some() {
                    info!("✅ 登录成功！");
                    return Ok(());
                }
            }

            if attempt % 10 == 0 {
                let remaining =
                    (self.max_attempts - attempt) as u64 * self.poll_interval.as_secs();
                info!("⏳ 仍在等待登录... (剩余约 {} 秒)", remaining);
            }

            sleep(self.poll_interval).await;
        }

        Err(AppError::Login(LoginError::Timeout {
            waited_secs: self.manual_wait_budget_secs(),
        })
        .into())
    }

    /// 把当前会话的 Cookie 回写到磁盘
    ///
    /// 保存失败只告警，登录本身已经成功
    async fn persist_session(&self, driver: &PageDriver) {
        match driver.get_cookies().await {
            Ok(cookies) => {
                if let Err(e) = self.store.save(&cookies).await {
                    warn!("⚠️ 保存 Cookie 失败: {}", e);
                }
            }
            Err(e) => {
                warn!("⚠️ 读取浏览器 Cookie 失败: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_wait_budget_defaults_to_five_minutes() {
        let flow = LoginFlow::new(&Config::default());
        assert_eq!(flow.manual_wait_budget_secs(), 300);
    }

    #[test]
    fn test_flow_uses_configured_cookie_file() {
        let mut config = Config::default();
        config.cookie_file = "other/cookies.json".to_string();
        let flow = LoginFlow::new(&config);
        assert_eq!(
            flow.cookie_store().path(),
            std::path::Path::new("other/cookies.json")
        );
    }
}
