pub mod catalog;
pub mod export;
pub mod generation;
pub mod llm;
pub mod logging;
pub mod models;
pub mod selection;
