pub mod article_writer;

pub use article_writer::ArticleWriter;
