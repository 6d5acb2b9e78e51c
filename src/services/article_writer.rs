//! 文章写入服务 - 业务能力层
//!
//! 只负责"写单篇文章文件"能力，不关心流程

use crate::error::{AppError, AppResult, FileError};
use crate::models::Topic;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 文章写入服务
///
/// 职责：
/// - 将单个主题的生成结果写入输出目录
/// - 文件名由主题推导，同名文件直接覆盖
/// - 不关心流程顺序
pub struct ArticleWriter {
    output_dir: PathBuf,
}

impl ArticleWriter {
    /// 创建新的文章写入服务
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 确保输出目录存在
    ///
    /// 目录已存在时静默成功，其中已有的文件不受影响。
    pub async fn ensure_output_dir(&self) -> AppResult<()> {
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            FileError::CreateDirFailed {
                path: self.output_dir.display().to_string(),
                source: e,
            }
            .into()
        })
    }

    /// 写入单篇文章
    ///
    /// # 参数
    /// - `topic`: 文章对应的主题
    /// - `content`: 生成的文章内容
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn write(&self, topic: &Topic, content: &str) -> AppResult<PathBuf> {
        let path = self.output_dir.join(topic.output_filename());

        debug!("写入文章: {} ({} 字节)", path.display(), content.len());

        fs::write(&path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        Ok(path)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
