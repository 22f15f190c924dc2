pub mod chat;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod llm;
pub mod notes;
pub mod pdf;
