use std::fmt;

/// 单个待生成的主题
///
/// 从输入文档的一行解析而来，创建后只读。重复的主题各自独立处理。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    /// 从一行文本创建主题（调用方负责过滤空行和注释行）
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 推导输出文件名：空格替换为下划线，转为小写，加 `.md` 后缀
    ///
    /// 两个不同主题可能归一化为同一文件名，此时后写入者覆盖前者。
    pub fn output_filename(&self) -> String {
        format!("{}.md", self.0.replace(' ', "_").to_lowercase())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_filename_replaces_spaces_and_lowercases() {
        assert_eq!(Topic::new("Sea Otters").output_filename(), "sea_otters.md");
        assert_eq!(Topic::new("Cats").output_filename(), "cats.md");
        assert_eq!(
            Topic::new("Rust Async Programming").output_filename(),
            "rust_async_programming.md"
        );
    }

    #[test]
    fn test_output_filename_keeps_non_ascii() {
        assert_eq!(Topic::new("고양이 이야기").output_filename(), "고양이_이야기.md");
    }

    #[test]
    fn test_colliding_topics_share_filename() {
        assert_eq!(
            Topic::new("Sea Otters").output_filename(),
            Topic::new("sea otters").output_filename()
        );
    }
}
