//! 批量生成处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量主题的处理和并发控制。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：加载配置、创建 LLM 客户端
//! 2. **批量加载**：读取主题列表和参考文档
//! 3. **并发控制**：使用 Semaphore 限制同时在途的生成请求数量
//! 4. **结果汇总**：每个任务的成败集中收集，统一输出统计
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个主题的细节
//! - **错误隔离**：单个任务失败不影响其他任务
//! - **向下委托**：生成委托 `clients::Generator`，写盘委托 `services::ArticleWriter`

use crate::clients::{Generator, LlmClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::loaders::{load_reference, load_topics};
use crate::models::Topic;
use crate::services::ArticleWriter;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    client: Arc<LlmClient>,
}

impl App {
    /// 初始化应用
    pub fn new(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = Arc::new(LlmClient::new(&config)?);

        Ok(Self { config, client })
    }

    /// 运行应用主逻辑
    ///
    /// 启动阶段的错误（输入文档缺失、参考文档缺失、输出目录不可创建）立即向上传播；
    /// 单个主题的失败只计入统计，所有任务结束后如有失败则返回 Err，进程以非零状态退出。
    pub async fn run(&self) -> Result<()> {
        // 加载所有待处理的主题
        let topics = load_topics(Path::new(&self.config.input_file)).await?;

        if topics.is_empty() {
            warn!("⚠️ 输入文档中没有找到待处理的主题，程序结束");
            return Ok(());
        }

        log_topics_loaded(topics.len(), self.config.max_concurrent_tasks);

        // 加载参考文档
        let reference = load_reference(Path::new(&self.config.reference_file)).await?;

        // 准备输出目录（先于任何写入）
        let writer = ArticleWriter::new(&self.config.output_dir);
        writer.ensure_output_dir().await?;

        // 并发处理所有主题
        let outcome = process_topics(
            self.client.clone(),
            topics,
            reference,
            writer,
            self.config.max_concurrent_tasks,
        )
        .await?;

        print_final_stats(&outcome);

        if outcome.failed > 0 {
            anyhow::bail!("{} 个主题生成失败", outcome.failed);
        }

        Ok(())
    }
}

/// 批量处理结果
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// 失败的主题及其错误描述
    pub failures: Vec<(String, String)>,
}

/// 并发处理所有主题
///
/// 每个主题一个任务，Semaphore 限制同时在途的任务数量，超出的任务排队等待空位。
/// 任务之间互不等待，单个任务失败不取消其他任务；所有结果集中收集后统一返回。
pub async fn process_topics<G>(
    client: Arc<G>,
    topics: Vec<Topic>,
    reference: String,
    writer: ArticleWriter,
    max_concurrent: usize,
) -> Result<BatchOutcome>
where
    G: Generator + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let reference = Arc::new(reference);
    let writer = Arc::new(writer);
    let total = topics.len();

    let mut handles = Vec::with_capacity(total);

    for (idx, topic) in topics.into_iter().enumerate() {
        let task_index = idx + 1;
        let topic_label = topic.to_string();
        let permit = semaphore.clone().acquire_owned().await?;

        let client = client.clone();
        let reference = reference.clone();
        let writer = writer.clone();

        let handle = tokio::spawn(async move {
            let _permit = permit;
            let result =
                process_single_topic(client.as_ref(), &topic, reference.as_str(), &writer).await;

            match &result {
                Ok(path) => {
                    info!("[主题 {}] ✅ 完成: {} -> {}", task_index, topic, path.display());
                }
                Err(e) => {
                    error!("[主题 {}] ❌ 处理失败: {} - {}", task_index, topic, e);
                }
            }

            result
        });
        handles.push((topic_label, handle));
    }

    // 等待所有任务完成，集中汇总成败
    let mut outcome = BatchOutcome {
        total,
        ..Default::default()
    };

    for (topic_label, handle) in handles {
        match handle.await {
            Ok(Ok(_)) => {
                outcome.success += 1;
            }
            Ok(Err(e)) => {
                outcome.failed += 1;
                outcome.failures.push((topic_label, e.to_string()));
            }
            Err(e) => {
                outcome.failed += 1;
                outcome
                    .failures
                    .push((topic_label, format!("任务执行失败: {}", e)));
            }
        }
    }

    Ok(outcome)
}

/// 处理单个主题：生成文章并写入输出目录
async fn process_single_topic<G: Generator>(
    client: &G,
    topic: &Topic,
    reference: &str,
    writer: &ArticleWriter,
) -> AppResult<PathBuf> {
    let content = client.generate(topic, reference).await?;
    writer.write(topic, &content).await
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量文章生成模式");
    info!("📊 API 提供者: {}", config.provider);
    info!("📊 模型: {}", config.model_name);
    info!("📊 最大并发数: {}", config.max_concurrent_tasks);
    info!("{}", "=".repeat(60));
}

fn log_topics_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的主题", total);
    info!("📋 最多同时处理 {} 个主题\n", max_concurrent);
}

fn print_final_stats(outcome: &BatchOutcome) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", outcome.success, outcome.total);
    info!("❌ 失败: {}", outcome.failed);
    for (topic, err) in &outcome.failures {
        info!("  - {}: {}", topic, err);
    }
    info!("{}", "=".repeat(60));
}
