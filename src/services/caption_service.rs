//! 文案生成服务 - 业务能力层
//!
//! 只负责"生成一条文案"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 默认指向 Gemini 的 OpenAI 兼容端点，可通过环境变量切换
//! - 任何失败都退化为内置文案池，调用方永远拿得到文案

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::CaptionError;

/// 内置回退文案池
///
/// LLM 不可用时从这里随机取一条，完全离线也能工作
pub const FALLBACK_CAPTIONS: &[&str] = &[
    "🔥 This hits different! Drop a ❤️ #viral #fyp #trending #foryou",
    "✨ POV: You found the perfect video #viral #fyp #trending #amazing",
    "🚀 This is about to blow up! #viral #fyp #trending #content #fire",
    "💯 Can't stop watching this! #viral #fyp #trending #addictive #wow",
    "😱 This gave me chills... #viral #fyp #trending #mindblown",
    "🎯 Exactly what I needed to see #viral #fyp #trending #relatable",
];

/// 文案生成服务
///
/// 职责：
/// - 调用 LLM API 生成短文案
/// - 校验返回内容的长度
/// - 失败时提供回退文案
/// - 不认识浏览器，不关心流程顺序
pub struct CaptionService {
    client: Option<Client<OpenAIConfig>>,
    model_name: String,
    max_chars: usize,
}

impl CaptionService {
    /// 创建新的文案生成服务
    ///
    /// 未配置 API Key 时退化为纯回退模式
    pub fn new(config: &Config) -> Self {
        let client = if config.has_llm_credentials() {
            let openai_config = OpenAIConfig::new()
                .with_api_key(&config.llm_api_key)
                .with_api_base(&config.llm_api_base_url);
            Some(Client::with_config(openai_config))
        } else {
            warn!("⚠️ 未配置 LLM_API_KEY，将使用内置文案池");
            None
        };

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            max_chars: config.caption_max_chars,
        }
    }

    /// 根据视频描述生成文案
    ///
    /// 这个函数永远不会失败：LLM 不可用、调用出错、返回内容不合格时
    /// 都会退化为内置文案池
    pub async fn generate(&self, description: &str) -> String {
        let client = match &self.client {
            Some(client) => client,
            None => {
                info!("未配置凭证，直接使用回退文案");
                return self.fallback_caption();
            }
        };

        info!("🤖 正在生成 AI 文案...");
        match self.request_caption(client, description).await {
            Ok(caption) => match self.validate_caption(&caption) {
                Ok(()) => {
                    info!("✅ AI 文案: {}", caption);
                    caption
                }
                Err(e) => {
                    warn!("⚠️ AI 文案不合格: {}", e);
                    self.fallback_caption()
                }
            },
            Err(e) => {
                warn!("⚠️ AI 文案生成失败: {}", e);
                self.fallback_caption()
            }
        }
    }

    /// 调用 LLM API 请求一条文案
    async fn request_caption(
        &self,
        client: &Client<OpenAIConfig>,
        description: &str,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(build_prompt(description))
            .build()?;
        let messages = vec![ChatCompletionRequestMessage::User(user_msg)];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.7)
            .max_tokens(256u32)
            .build()?;

        let response = client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(CaptionError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }

    /// 校验文案：非空且不超过长度上限
    pub fn validate_caption(&self, caption: &str) -> Result<(), CaptionError> {
        if caption.trim().is_empty() {
            return Err(CaptionError::EmptyResponse);
        }
        let chars = caption.chars().count();
        if chars > self.max_chars {
            return Err(CaptionError::TooLong {
                chars,
                max_chars: self.max_chars,
            });
        }
        Ok(())
    }

    /// 从内置文案池随机取一条
    pub fn fallback_caption(&self) -> String {
        let caption = FALLBACK_CAPTIONS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_CAPTIONS[0]);
        info!("🔄 使用回退文案: {}", caption);
        caption.to_string()
    }
}

/// 构建文案生成提示词
///
/// 提示词保持英文，目标站点的文案生态是英文标签
fn build_prompt(description: &str) -> String {
    format!(
        r#"Create a catchy TikTok caption for a video about: "{}".

Requirements:
- Maximum 150 characters
- Include 5-8 trending hashtags
- Use emojis to make it engaging
- Make it viral-worthy and attention-grabbing
- Focus on engagement (likes, comments, shares)

Just return the caption, nothing else."#,
        description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> CaptionService {
        CaptionService::new(&Config::default())
    }

    #[test]
    fn test_fallback_pool_has_at_least_six_entries() {
        assert!(FALLBACK_CAPTIONS.len() >= 6);
        assert!(FALLBACK_CAPTIONS.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_validate_caption_accepts_normal_text() {
        let service = create_test_service();
        assert!(service
            .validate_caption("🔥 Nice video #fyp #viral")
            .is_ok());
    }

    #[test]
    fn test_validate_caption_rejects_empty() {
        let service = create_test_service();
        assert!(matches!(
            service.validate_caption("   "),
            Err(CaptionError::EmptyResponse)
        ));
    }

    #[test]
    fn test_validate_caption_rejects_oversized() {
        let service = create_test_service();
        let oversized = "x".repeat(250);
        assert!(matches!(
            service.validate_caption(&oversized),
            Err(CaptionError::TooLong { chars: 250, .. })
        ));
    }

    #[test]
    fn test_fallback_caption_comes_from_pool() {
        let service = create_test_service();
        let caption = service.fallback_caption();
        assert!(FALLBACK_CAPTIONS.contains(&caption.as_str()));
    }

    #[tokio::test]
    async fn test_generate_without_credentials_never_fails() {
        let service = create_test_service();
        for _ in 0..5 {
            let caption = service.generate("sunset timelapse").await;
            assert!(!caption.is_empty());
            assert!(FALLBACK_CAPTIONS.contains(&caption.as_str()));
        }
    }

    #[test]
    fn test_prompt_embeds_description() {
        let prompt = build_prompt("cat doing backflips");
        assert!(prompt.contains("cat doing backflips"));
        assert!(prompt.contains("Maximum 150 characters"));
    }
}
