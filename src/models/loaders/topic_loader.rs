use crate::error::{AppError, AppResult, FileError};
use crate::models::topic::Topic;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// 解析输入文档内容为主题列表
///
/// 每行一个主题；去除首尾空白后为空或以 `#` 开头的行被忽略。
/// 保留原始顺序，不做去重。
pub fn parse_topics(content: &str) -> Vec<Topic> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Topic::new)
        .collect()
}

/// 从输入文档加载主题列表
///
/// 文件不存在或不可读时返回 Err，整个运行中止。
pub async fn load_topics(path: &Path) -> AppResult<Vec<Topic>> {
    let content = read_file(path).await?;
    let topics = parse_topics(&content);
    debug!("从 {} 解析出 {} 个主题", path.display(), topics.len());
    Ok(topics)
}

/// 加载参考文档，整个文件内容作为一个字符串
pub async fn load_reference(path: &Path) -> AppResult<String> {
    let content = read_file(path).await?;
    debug!("参考文档 {} 共 {} 字节", path.display(), content.len());
    Ok(content)
}

async fn read_file(path: &Path) -> AppResult<String> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))
}
