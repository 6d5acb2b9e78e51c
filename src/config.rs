use crate::error::{AppResult, ConfigError};
use std::fmt;

/// API 提供者
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiProvider {
    DeepSeek,
    OpenRouter,
}

impl ApiProvider {
    /// 解析提供者标识，无法识别时返回配置错误
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "deepseek" => Ok(Self::DeepSeek),
            "openrouter" => Ok(Self::OpenRouter),
            other => Err(ConfigError::UnknownProvider {
                provider: other.to_string(),
            }),
        }
    }

    /// 默认的 chat-completion 端点
    pub fn default_api_url(self) -> &'static str {
        match self {
            Self::DeepSeek => "https://api.deepseek.com/v1/chat/completions",
            Self::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
        }
    }

    /// 默认模型名称
    pub fn default_model(self) -> &'static str {
        match self {
            Self::DeepSeek => "deepseek-chat",
            Self::OpenRouter => "deepseek/deepseek-chat",
        }
    }

    /// API 密钥对应的环境变量名
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::DeepSeek => "DEEPSEEK_API_KEY",
            Self::OpenRouter => "OPENROUTER_API_KEY",
        }
    }
}

impl fmt::Display for ApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeepSeek => write!(f, "deepseek"),
            Self::OpenRouter => write!(f, "openrouter"),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// API 提供者
    pub provider: ApiProvider,
    /// API 密钥
    pub api_key: String,
    /// chat-completion 端点
    pub api_url: String,
    /// 模型名称
    pub model_name: String,
    /// 同时处理的主题数量
    pub max_concurrent_tasks: usize,
    /// 主题列表输入文档
    pub input_file: String,
    /// 参考文档，内容作为每次请求的 system 消息
    pub reference_file: String,
    /// 文章输出目录
    pub output_dir: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未知的 API 提供者或缺失的 API 密钥属于致命配置错误，在任何工作开始前返回 Err。
    pub fn from_env() -> AppResult<Self> {
        // 加载 .env 文件（不存在时忽略）
        dotenvy::dotenv().ok();

        let provider = ApiProvider::parse(
            &std::env::var("API_PROVIDER").unwrap_or_else(|_| "deepseek".to_string()),
        )?;

        let api_key =
            std::env::var(provider.api_key_var()).map_err(|_| ConfigError::EnvVarNotFound {
                var_name: provider.api_key_var().to_string(),
            })?;

        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| provider.default_api_url().to_string());

        let model_name = std::env::var("LLM_MODEL_NAME")
            .ok()
            .or_else(|| match provider {
                ApiProvider::OpenRouter => std::env::var("OPENROUTER_MODEL").ok(),
                ApiProvider::DeepSeek => None,
            })
            .unwrap_or_else(|| provider.default_model().to_string());

        Ok(Self {
            provider,
            api_key,
            api_url,
            model_name,
            max_concurrent_tasks: std::env::var("MAX_CONCURRENT_TASKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            input_file: std::env::var("INPUT_FILE").unwrap_or_else(|_| "input.md".to_string()),
            reference_file: std::env::var("REFERENCE_FILE")
                .unwrap_or_else(|_| "reference.md".to_string()),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "outputs".to_string()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
        })
    }
}
