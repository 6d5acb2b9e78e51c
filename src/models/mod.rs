pub mod loaders;
pub mod topic;

pub use loaders::{load_reference, load_topics, parse_topics};
pub use topic::Topic;
