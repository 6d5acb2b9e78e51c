//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量生成处理器
//! - 管理应用生命周期（初始化、运行）
//! - 加载主题列表和参考文档
//! - 控制并发数量（Semaphore）
//! - 汇总全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Topic>)
//!     ↓
//! clients::Generator (单个主题的生成能力)
//!     ↓
//! services::ArticleWriter (单篇文章的写盘能力)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排层只做调度和统计，不做具体业务判断
//! 2. **向下依赖**：编排层 → clients / services → models
//! 3. **错误隔离**：单个任务的失败不影响兄弟任务

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{process_topics, App, BatchOutcome};
