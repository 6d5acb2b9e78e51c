//! LLM 生成客户端
//!
//! 负责所有与 chat-completion API 的交互

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::Topic;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// 每次请求的最大输出 token 数
const MAX_TOKENS: u32 = 2000;

/// 文章生成能力的抽象
///
/// 批量处理器只依赖该 trait，便于在测试中注入 mock 实现
#[async_trait]
pub trait Generator: Send + Sync {
    /// 为单个主题生成文章内容
    ///
    /// # 参数
    /// - `topic`: 待生成的主题
    /// - `reference`: 参考文档内容，作为 system 消息原样传递
    ///
    /// # 返回
    /// 返回生成的文章文本（已去除首尾空白）
    async fn generate(&self, topic: &Topic, reference: &str) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// LLM API 客户端
pub struct LlmClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model_name: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    ///
    /// 客户端级别设置请求超时，避免单个挂起的连接长期占用并发槽位。
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::ClientBuildFailed { source: e })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model_name: config.model_name.clone(),
        })
    }
}

#[async_trait]
impl Generator for LlmClient {
    async fn generate(&self, topic: &Topic, reference: &str) -> AppResult<String> {
        let user_message = build_user_prompt(topic);
        let request = ChatRequest {
            model: &self.model_name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: reference,
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
            max_tokens: MAX_TOKENS,
        };

        debug!("正在调用 LLM API，模型: {}，主题: {}", self.model_name, topic);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: self.api_url.clone(),
                source: e,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::RequestFailed {
            endpoint: self.api_url.clone(),
            source: e,
        })?;

        // 非 2xx 响应不重试，携带状态码和原始响应体向上传播
        if !status.is_success() {
            return Err(AppError::api_bad_response(
                self.api_url.clone(),
                status.as_u16(),
                body,
            ));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(ApiError::from)?;

        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| ApiError::EmptyResponse {
                endpoint: self.api_url.clone(),
            })?;

        debug!("LLM API 调用成功，主题: {}", topic);

        Ok(content)
    }
}

/// 构建用户消息
fn build_user_prompt(topic: &Topic) -> String {
    format!("'{}'에 대해 글을 작성해주세요.", topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_topic() {
        let prompt = build_user_prompt(&Topic::new("Cats"));
        assert_eq!(prompt, "'Cats'에 대해 글을 작성해주세요.");
    }

    #[test]
    fn test_request_body_shape() {
        let user_message = build_user_prompt(&Topic::new("Sea Otters"));
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "참고 문서",
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
            max_tokens: MAX_TOKENS,
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "deepseek-chat");
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], "참고 문서");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(
            value["messages"][1]["content"],
            "'Sea Otters'에 대해 글을 작성해주세요."
        );
    }

    #[test]
    fn test_response_parsing_takes_first_choice() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "  첫 번째  "}},
                {"message": {"role": "assistant", "content": "두 번째"}}
            ]
        }"#;

        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let content = parsed.choices.first().unwrap().message.content.trim();

        assert_eq!(content, "첫 번째");
    }
}
