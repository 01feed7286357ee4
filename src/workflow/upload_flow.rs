//! 上传流程 - 流程层
//!
//! 核心职责：把一个本地视频变成一条已发布的作品
//!
//! 流程顺序：
//! 1. 本地校验 → 提交文件 → 等待处理
//! 2. 填写文案（尽力而为）
//! 3. 发布：策略 A → 策略 B → 人工兜底

use std::time::Duration;

use anyhow::Result;
use chromiumoxide::Element;
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, UploadError};
use crate::infrastructure::PageDriver;
use crate::interact;
use crate::models::selectors::{
    CAPTION_EDITOR_SELECTORS, FILE_INPUT_SELECTOR, PRIMARY_BUTTON_CLASS_HINTS,
    PUBLISH_BUTTON_SELECTOR, PUBLISH_TEXT_HINTS,
};
use crate::models::UploadRequest;

/// 填写文案前的短暂停顿
const CAPTION_CLICK_SETTLE: Duration = Duration::from_secs(1);
/// 尝试发布前的短暂停顿
const PRE_PUBLISH_SETTLE: Duration = Duration::from_secs(3);
/// 等待处理就绪时的轮询间隔
const PROCESSING_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// 发布策略，按顺序尝试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStrategy {
    /// 策略 A: 通过 data-e2e 稳定属性定位发布按钮
    E2eAttribute,
    /// 策略 B: 扫描全部按钮，按 class 和文本猜测
    ButtonScan,
    /// 策略 C: 交给人工点击，等待确认
    Manual,
}

impl std::fmt::Display for PublishStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishStrategy::E2eAttribute => write!(f, "策略 A (data-e2e)"),
            PublishStrategy::ButtonScan => write!(f, "策略 B (按钮扫描)"),
            PublishStrategy::Manual => write!(f, "策略 C (人工兜底)"),
        }
    }
}

/// 发布策略的尝试顺序
pub const PUBLISH_STRATEGIES: &[PublishStrategy] = &[
    PublishStrategy::E2eAttribute,
    PublishStrategy::ButtonScan,
    PublishStrategy::Manual,
];

/// 发布结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// 自动点击发布成功
    Automated(PublishStrategy),
    /// 人工完成发布并确认
    ManualConfirmed,
}

/// 上传流程
///
/// - 编排文件提交、文案填写、发布
/// - 不持有任何资源（page）
pub struct UploadFlow {
    file_input_timeout: Duration,
    processing_wait: Duration,
    caption_editor_timeout: Duration,
    publish_button_timeout: Duration,
    post_settle: Duration,
    verbose_logging: bool,
}

impl UploadFlow {
    /// 创建新的上传流程
    pub fn new(config: &Config) -> Self {
        Self {
            file_input_timeout: Duration::from_secs(config.file_input_timeout_secs),
            processing_wait: Duration::from_secs(config.processing_wait_secs),
            caption_editor_timeout: Duration::from_secs(config.caption_editor_timeout_secs),
            publish_button_timeout: Duration::from_secs(config.publish_button_timeout_secs),
            post_settle: Duration::from_secs(config.post_settle_secs),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(
        &self,
        driver: &PageDriver,
        request: &UploadRequest,
    ) -> Result<PublishOutcome> {
        // 本地前置校验，不通过就不碰浏览器
        UploadRequest::validate_path(&request.video_path)?;
        info!(
            "📁 视频: {} ({:.1}MB)",
            request.file_name(),
            request.size_mb()
        );

        // ========== 步骤 1: 提交视频文件 ==========
        info!("📤 正在上传视频文件...");
        let file_input = match driver
            .wait_for(FILE_INPUT_SELECTOR, self.file_input_timeout)
            .await
        {
            Ok(element) => element,
            Err(_) => {
                return Err(AppError::Upload(UploadError::FileInputMissing {
                    timeout_secs: self.file_input_timeout.as_secs(),
                })
                .into());
            }
        };

        let absolute_path = request
            .video_path
            .canonicalize()
            .unwrap_or_else(|_| request.video_path.clone());
        driver.set_file_input(&file_input, &absolute_path).await?;
        info!("✅ 视频文件已提交: {}", request.file_name());

        // ========== 步骤 2: 等待站点处理视频 ==========
        self.wait_for_processing(driver).await;

        // ========== 步骤 3: 填写文案（尽力而为） ==========
        if request.has_caption() {
            self.set_caption(driver, &request.caption).await;
        } else {
            info!("🚫 未设置文案，跳过文案步骤");
        }

        // ========== 步骤 4: 发布 ==========
        sleep(PRE_PUBLISH_SETTLE).await;
        self.publish(driver).await
    }

    /// 等待站点完成视频处理
    ///
    /// 站点没有明确的"处理完成"信号，轮询发布相关控件是否出现，
    /// 轮询预算本身就是最坏情况下的兜底等待
    async fn wait_for_processing(&self, driver: &PageDriver) {
        info!("⏳ 等待视频处理...");
        let start = Instant::now();
        while start.elapsed() < self.processing_wait {
            if driver.find(PUBLISH_BUTTON_SELECTOR).await.is_some()
                || driver.find(CAPTION_EDITOR_SELECTORS[0]).await.is_some()
            {
                info!("✅ 编辑页面已就绪");
                sleep(PROCESSING_POLL_INTERVAL).await;
                return;
            }
            sleep(PROCESSING_POLL_INTERVAL).await;
        }
        info!("⏳ 处理等待达到上限，继续后续步骤");
    }

    /// 填写文案
    ///
    /// 按顺序尝试候选选择器，找不到编辑框只告警不中断
    async fn set_caption(&self, driver: &PageDriver, caption: &str) {
        info!("✍️ 正在填写文案...");

        let mut editor = None;
        for selector in CAPTION_EDITOR_SELECTORS {
            if self.verbose_logging {
                info!("尝试文案选择器: {}", selector);
            }
            if let Ok(element) = driver.wait_for(selector, self.caption_editor_timeout).await {
                info!("✅ 找到文案编辑框: {}", selector);
                editor = Some(element);
                break;
            }
        }

        let Some(editor) = editor else {
            warn!("⚠️ 未找到文案编辑框，跳过文案");
            return;
        };

        if let Err(e) = self.fill_editor(driver, &editor, caption).await {
            warn!("⚠️ 填写文案失败: {}", e);
            return;
        }
        info!("✅ 文案已填写: {}", caption);
    }

    async fn fill_editor(
        &self,
        driver: &PageDriver,
        editor: &Element,
        caption: &str,
    ) -> Result<()> {
        editor.click().await?;
        sleep(CAPTION_CLICK_SETTLE).await;
        // 站点会把文件名预填进编辑框，先清空再输入
        driver.clear_focused_editor().await?;
        editor.type_str(caption).await?;
        Ok(())
    }

    /// 按顺序尝试发布策略
    async fn publish(&self, driver: &PageDriver) -> Result<PublishOutcome> {
        info!("🚀 尝试发布视频...");

        for strategy in PUBLISH_STRATEGIES {
            match strategy {
                PublishStrategy::E2eAttribute => {
                    if self.try_publish_by_attribute(driver).await {
                        info!("🚀 发布成功！({})", strategy);
                        sleep(self.post_settle).await;
                        return Ok(PublishOutcome::Automated(*strategy));
                    }
                    info!("{} 未命中，尝试下一个...", strategy);
                }
                PublishStrategy::ButtonScan => {
                    if self.try_publish_by_button_scan(driver).await {
                        info!("🚀 发布成功！({})", strategy);
                        sleep(self.post_settle).await;
                        return Ok(PublishOutcome::Automated(*strategy));
                    }
                    info!("{} 未命中，尝试下一个...", strategy);
                }
                PublishStrategy::Manual => {
                    warn!("⚠️ 自动发布失败，转入人工兜底");
                    info!("📝 视频和文案都已就绪！");
                    info!("🖱️ 请在浏览器中手动点击 'Post' 按钮");
                    interact::pause("完成手动发布后按回车")?;
                    return Ok(PublishOutcome::ManualConfirmed);
                }
            }
        }

        // PUBLISH_STRATEGIES 以人工兜底收尾，不会走到这里
        unreachable!("发布策略列表必须以人工兜底结束")
    }

    /// 策略 A: 稳定属性定位
    async fn try_publish_by_attribute(&self, driver: &PageDriver) -> bool {
        match driver
            .wait_for(PUBLISH_BUTTON_SELECTOR, self.publish_button_timeout)
            .await
        {
            Ok(button) => button.click().await.is_ok(),
            Err(_) => false,
        }
    }

    /// 策略 B: 扫描所有按钮，按 class 和可见文本猜测
    async fn try_publish_by_button_scan(&self, driver: &PageDriver) -> bool {
        let buttons = match driver.find_all("button").await {
            Ok(buttons) => buttons,
            Err(_) => return false,
        };

        for button in buttons {
            let class = button
                .attribute("class")
                .await
                .ok()
                .flatten()
                .unwrap_or_default();
            let text = button
                .inner_text()
                .await
                .ok()
                .flatten()
                .unwrap_or_default();

            if class_suggests_primary(&class) || text_suggests_publish(&text) {
                if button.click().await.is_ok() {
                    return true;
                }
            }
        }
        false
    }
}

/// class 列表是否像主操作按钮（同时包含所有关键字）
fn class_suggests_primary(class: &str) -> bool {
    let class = class.to_lowercase();
    PRIMARY_BUTTON_CLASS_HINTS.iter().all(|hint| class.contains(hint))
}

/// 按钮文本是否像发布按钮
fn text_suggests_publish(text: &str) -> bool {
    let text = text.to_lowercase();
    PUBLISH_TEXT_HINTS.iter().any(|hint| text.contains(hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_tried_in_order_with_manual_last() {
        assert_eq!(
            PUBLISH_STRATEGIES,
            &[
                PublishStrategy::E2eAttribute,
                PublishStrategy::ButtonScan,
                PublishStrategy::Manual,
            ]
        );
    }

    #[test]
    fn test_class_hints_require_all_keywords() {
        assert!(class_suggests_primary("Button__root--type-primary size-large"));
        assert!(class_suggests_primary("btn PRIMARY LARGE"));
        assert!(!class_suggests_primary("Button__root--type-primary"));
        assert!(!class_suggests_primary("size-large secondary"));
        assert!(!class_suggests_primary(""));
    }

    #[test]
    fn test_text_hints_match_case_insensitive() {
        assert!(text_suggests_publish("Post"));
        assert!(text_suggests_publish("PUBLISH NOW"));
        assert!(text_suggests_publish("发布 post"));
        assert!(!text_suggests_publish("Cancel"));
        assert!(!text_suggests_publish(""));
    }

    #[test]
    fn test_flow_picks_up_configured_timeouts() {
        let mut config = Config::default();
        config.file_input_timeout_secs = 7;
        config.processing_wait_secs = 9;
        let flow = UploadFlow::new(&config);
        assert_eq!(flow.file_input_timeout, Duration::from_secs(7));
        assert_eq!(flow.processing_wait, Duration::from_secs(9));
    }
}
