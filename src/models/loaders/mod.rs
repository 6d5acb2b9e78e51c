pub mod topic_loader;

pub use topic_loader::{load_reference, load_topics, parse_topics};
