pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod qa;
pub mod server;
pub mod store;

// Re-export core types for convenience
pub use graph::{GraphProjection, Link, Node};
pub use llm::{LlmClient, LlmConfig};
pub use store::{GraphStore, StoreConfig};
