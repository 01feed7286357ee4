//! 控制台交互
//!
//! 收集用户输入：视频路径、文案方式、各类确认。
//! 所有提示都是阻塞式的，整个程序本来就是单线程顺序执行

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};

use crate::models::UploadRequest;

/// 文案方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionMode {
    /// AI 生成
    Ai,
    /// 手动输入
    Custom,
    /// 不设置文案
    None,
}

const CAPTION_MODE_ITEMS: &[&str] = &["🤖 AI 生成文案", "✍️ 手动输入文案", "🚫 不设置文案"];

fn caption_mode_from_index(index: usize) -> CaptionMode {
    match index {
        0 => CaptionMode::Ai,
        1 => CaptionMode::Custom,
        _ => CaptionMode::None,
    }
}

/// 是否重置已保存的 Cookie
pub fn ask_reset_cookies() -> Result<bool> {
    let reset = Confirm::new()
        .with_prompt("🍪 重置已保存的 Cookie？")
        .default(false)
        .interact()?;
    Ok(reset)
}

/// 询问视频文件路径，校验不通过就重新询问
pub fn ask_video_path() -> Result<PathBuf> {
    loop {
        let input: String = Input::new()
            .with_prompt("📁 视频文件路径")
            .interact_text()?;
        // Windows 下复制出来的路径常带引号
        let path = PathBuf::from(input.trim().trim_matches('"'));

        match UploadRequest::validate_path(&path) {
            Ok(()) => return Ok(path),
            Err(e) => println!("❌ {}", e),
        }
    }
}

/// 询问文案方式
pub fn ask_caption_mode() -> Result<CaptionMode> {
    let index = Select::new()
        .with_prompt("📝 如何生成文案")
        .items(CAPTION_MODE_ITEMS)
        .default(0)
        .interact()?;
    Ok(caption_mode_from_index(index))
}

/// 询问视频描述（AI 文案的上下文），默认用文件名
pub fn ask_video_description(default: &str) -> Result<String> {
    let description: String = Input::new()
        .with_prompt("📝 描述一下视频内容 (供 AI 参考)")
        .default(default.to_string())
        .interact_text()?;
    Ok(description)
}

/// 询问手动文案，空输入重新询问
pub fn ask_custom_caption() -> Result<String> {
    loop {
        let caption: String = Input::new()
            .with_prompt("✍️ 输入你的文案")
            .allow_empty(true)
            .interact_text()?;
        if !caption.trim().is_empty() {
            return Ok(caption);
        }
        println!("❌ 文案不能为空");
    }
}

/// 上传前的最终确认
pub fn confirm_upload() -> Result<bool> {
    let confirm = Confirm::new()
        .with_prompt("🚀 确认开始上传？")
        .default(true)
        .interact()?;
    Ok(confirm)
}

/// 打印上传摘要
pub fn print_summary(request: &UploadRequest, cookie_file: &str) {
    println!("\n📋 上传摘要:");
    println!("{}", "─".repeat(40));
    println!("📁 视频: {}", request.file_name());
    println!("📏 大小: {:.1}MB", request.size_mb());
    if request.has_caption() {
        println!("✍️ 文案: {}", request.caption);
    }
    println!("🍪 Cookie: {}", cookie_file);
    println!("{}", "─".repeat(40));
}

/// 阻塞等待用户按回车
pub fn pause(prompt: &str) -> Result<()> {
    let _: String = Input::new()
        .with_prompt(format!("{} (回车继续)", prompt))
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_mode_mapping_follows_menu_order() {
        assert_eq!(caption_mode_from_index(0), CaptionMode::Ai);
        assert_eq!(caption_mode_from_index(1), CaptionMode::Custom);
        assert_eq!(caption_mode_from_index(2), CaptionMode::None);
        // Select 不会返回越界索引，越界一律按"无文案"处理
        assert_eq!(caption_mode_from_index(9), CaptionMode::None);
    }

    #[test]
    fn test_menu_has_three_options() {
        assert_eq!(CAPTION_MODE_ITEMS.len(), 3);
    }
}
