//! # Batch Article Gen
//!
//! 批量文章生成工具：从输入文档读取主题列表，逐个调用 LLM chat-completion API，
//! 将生成的文章写入输出目录。
//!
//! ## 架构设计
//!
//! 本系统采用三层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 主题类型和输入文档加载
//! - `Topic` - 单个主题，推导输出文件名
//! - `loaders` - 解析 input.md / 读取 reference.md
//!
//! ### ② 业务能力层（Clients / Services）
//! - `clients/` - 描述"我能做什么"，只处理单个 Topic
//! - `LlmClient` - chat-completion 生成能力（`Generator` trait 的实现）
//! - `services/ArticleWriter` - 写单篇文章文件能力
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量主题处理器，管理并发和统计
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{Generator, LlmClient};
pub use config::{ApiProvider, Config};
pub use error::{ApiError, AppError, AppResult, ConfigError, FileError};
pub use models::{load_reference, load_topics, parse_topics, Topic};
pub use orchestrator::{process_topics, App, BatchOutcome};
pub use services::ArticleWriter;
