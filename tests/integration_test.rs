use async_trait::async_trait;
use batch_article_gen::{
    parse_topics, process_topics, ApiError, AppResult, ArticleWriter, Config, Generator,
    LlmClient, Topic,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

/// 记录并发高水位的 mock 生成器
struct MockGenerator {
    response: String,
    fail_topics: HashSet<String>,
    current: AtomicUsize,
    high_water: AtomicUsize,
}

impl MockGenerator {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fail_topics: HashSet::new(),
            current: AtomicUsize::new(0),
            high_water: AtomicUsize::new(0),
        }
    }

    /// 对指定主题返回失败的 mock
    fn failing_on(response: &str, topics: &[&str]) -> Self {
        Self {
            fail_topics: topics.iter().map(|t| t.to_string()).collect(),
            ..Self::new(response)
        }
    }

    fn high_water(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, topic: &Topic, _reference: &str) -> AppResult<String> {
        let in_flight = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(in_flight, Ordering::SeqCst);

        // 模拟网络耗时，让多个任务真正同时在途
        tokio::time::sleep(Duration::from_millis(20)).await;

        self.current.fetch_sub(1, Ordering::SeqCst);

        if self.fail_topics.contains(topic.as_str()) {
            return Err(ApiError::BadResponse {
                endpoint: "mock".to_string(),
                status: 500,
                body: "mock failure".to_string(),
            }
            .into());
        }

        Ok(self.response.clone())
    }
}

fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_batch_writes_one_file_per_topic() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("outputs");
    let writer = ArticleWriter::new(&output_dir);
    writer.ensure_output_dir().await.unwrap();

    let topics = parse_topics("Cats\nDogs\n");
    let client = Arc::new(MockGenerator::new("생성된 본문"));

    let outcome = process_topics(client, topics, "참고 문서".to_string(), writer, 4)
        .await
        .unwrap();

    assert_eq!(outcome.total, 2);
    assert_eq!(outcome.success, 2);
    assert_eq!(outcome.failed, 0);

    assert_eq!(list_files(&output_dir), vec!["cats.md", "dogs.md"]);
    assert_eq!(
        std::fs::read_to_string(output_dir.join("cats.md")).unwrap(),
        "생성된 본문"
    );
    assert_eq!(
        std::fs::read_to_string(output_dir.join("dogs.md")).unwrap(),
        "생성된 본문"
    );
}

#[tokio::test]
async fn test_existing_output_dir_and_unrelated_files_untouched() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("outputs");
    std::fs::create_dir_all(&output_dir).unwrap();
    std::fs::write(output_dir.join("unrelated.txt"), "기존 파일").unwrap();

    let writer = ArticleWriter::new(&output_dir);
    writer.ensure_output_dir().await.unwrap();

    let topics = parse_topics("Cats\n");
    let client = Arc::new(MockGenerator::new("본문"));

    let outcome = process_topics(client, topics, String::new(), writer, 2)
        .await
        .unwrap();

    assert_eq!(outcome.success, 1);
    assert_eq!(list_files(&output_dir), vec!["cats.md", "unrelated.txt"]);
    assert_eq!(
        std::fs::read_to_string(output_dir.join("unrelated.txt")).unwrap(),
        "기존 파일"
    );
}

#[tokio::test]
async fn test_single_failure_does_not_stop_siblings() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("outputs");
    let writer = ArticleWriter::new(&output_dir);
    writer.ensure_output_dir().await.unwrap();

    let topics = parse_topics("Cats\nDogs\nSea Otters\n");
    let client = Arc::new(MockGenerator::failing_on("본문", &["Dogs"]));

    let outcome = process_topics(client, topics, "참고".to_string(), writer, 4)
        .await
        .unwrap();

    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.success, 2);
    assert_eq!(outcome.failed, 1);

    // 失败被显式记录，而不是静默丢弃
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, "Dogs");
    assert!(outcome.failures[0].1.contains("status=500"));

    // 其余主题仍然产出文件
    assert_eq!(list_files(&output_dir), vec!["cats.md", "sea_otters.md"]);
}

#[tokio::test]
async fn test_duplicate_topic_last_write_wins() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("outputs");
    let writer = ArticleWriter::new(&output_dir);
    writer.ensure_output_dir().await.unwrap();

    let topics = parse_topics("Cats\nCats\n");
    let client = Arc::new(MockGenerator::new("본문"));

    let outcome = process_topics(client, topics, String::new(), writer, 2)
        .await
        .unwrap();

    // 重复主题各自独立处理，文件名冲突不报错
    assert_eq!(outcome.success, 2);
    assert_eq!(outcome.failed, 0);
    assert_eq!(list_files(&output_dir), vec!["cats.md"]);
}

#[tokio::test]
async fn test_concurrency_never_exceeds_pool_size() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("outputs");
    let writer = ArticleWriter::new(&output_dir);
    writer.ensure_output_dir().await.unwrap();

    let input: String = (1..=12).map(|i| format!("Topic {}\n", i)).collect();
    let topics = parse_topics(&input);
    let client = Arc::new(MockGenerator::new("본문"));

    let outcome = process_topics(client.clone(), topics, String::new(), writer, 3)
        .await
        .unwrap();

    assert_eq!(outcome.success, 12);
    assert!(
        client.high_water() <= 3,
        "并发高水位 {} 超过了池大小 3",
        client.high_water()
    );
}

/// 真实 API 调用测试，需要配置环境变量后手动运行：cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_real_generation() {
    let _ = tracing_subscriber::fmt::try_init();

    let config = Config::from_env().expect("加载配置失败");
    let client = LlmClient::new(&config).expect("创建客户端失败");

    let topic = Topic::new("고양이");
    let content = client
        .generate(&topic, "당신은 전문 작가입니다.")
        .await
        .expect("生成失败");

    assert!(!content.is_empty());
}
