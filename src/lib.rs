pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod summary;
pub mod template;
pub mod writer;
