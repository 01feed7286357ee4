//! # TikTok Video Upload
//!
//! 一个把本地视频发布到 TikTok 的自动化命令行工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageDriver` - 唯一的 page owner，提供导航/等待/点击/注入能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `CookieStore` - cookies.json 读写能力
//! - `CaptionService` - AI 文案生成能力（带离线回退）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义登录和上传的完整流程
//! - `LoginFlow` - Cookie 注入 → 登录探测 → 人工等待
//! - `UploadFlow` - 文件提交 → 文案 → 发布策略 A/B/C
//!
//! ### ④ 编排层（App）
//! - `app` - 收集用户输入，按顺序驱动登录和上传，负责资源清理
//!
//! ## 模块结构

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod interact;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, RunOutcome};
pub use browser::launch_browser;
pub use config::Config;
pub use error::AppError;
pub use infrastructure::PageDriver;
pub use models::{SessionCookie, UploadRequest, ALLOWED_VIDEO_EXTENSIONS};
pub use services::{CaptionService, CookieStore};
pub use workflow::{LoginFlow, LoginOutcome, PublishOutcome, PublishStrategy, UploadFlow};
