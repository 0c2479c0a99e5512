pub mod config;
pub mod crawl;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod retry;
pub mod storage;
pub mod url_model;
