//! 站点 DOM 选择器目录
//!
//! TikTok 的页面结构没有版本号，随时可能变化。应对策略是把已知可用的
//! 选择器按优先级排成列表，逐个尝试，全部失败时回退到人工操作。
//! 新发现的选择器直接追加到列表，不需要改动任何流程代码。

/// 文件上传控件
pub const FILE_INPUT_SELECTOR: &str = "input[type='file']";

/// 已登录状态的探测选择器（首页，按顺序尝试，命中即止）
pub const LOGIN_PROBE_SELECTORS: &[&str] = &[
    "[data-e2e='profile-icon']",
    "[data-e2e='upload-icon']",
    "a[href*='/upload']",
    "svg[data-e2e='upload-icon']",
];

/// 手动登录等待期间轮询的选择器（上传页）
pub const LOGIN_WAIT_SELECTORS: &[&str] = &[
    "input[type='file']",
    "[data-e2e='upload-btn']",
    "div[data-e2e='upload-container']",
    ".upload-btn",
];

/// 文案编辑框候选选择器（按顺序尝试，命中即止）
pub const CAPTION_EDITOR_SELECTORS: &[&str] = &[
    "div[contenteditable='true']",
    "div[data-text='true']",
    "textarea[placeholder*='caption']",
    "div[role='textbox']",
    "[data-e2e='editor']",
    ".public-DraftEditor-content",
    "div[data-contents='true']",
    "[data-e2e='video-caption']",
];

/// 发布按钮的稳定属性选择器（策略 A）
pub const PUBLISH_BUTTON_SELECTOR: &str = "button[data-e2e='publish-button']";

/// 策略 B：按钮 class 中同时出现这些关键字时视为主操作按钮
pub const PRIMARY_BUTTON_CLASS_HINTS: &[&str] = &["primary", "large"];

/// 策略 B：按钮文本包含这些词时视为发布按钮（小写比较）
pub const PUBLISH_TEXT_HINTS: &[&str] = &["post", "publish"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_lists_non_empty() {
        assert!(!LOGIN_PROBE_SELECTORS.is_empty());
        assert!(!LOGIN_WAIT_SELECTORS.is_empty());
        assert!(!CAPTION_EDITOR_SELECTORS.is_empty());
    }

    #[test]
    fn test_file_input_is_first_login_wait_selector() {
        // 上传控件是最可靠的登录成功信号，必须排在最前面
        assert_eq!(LOGIN_WAIT_SELECTORS[0], FILE_INPUT_SELECTOR);
    }

    #[test]
    fn test_contenteditable_tried_before_fallbacks() {
        assert_eq!(CAPTION_EDITOR_SELECTORS[0], "div[contenteditable='true']");
    }
}
