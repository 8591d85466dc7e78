use std::env;
use std::path::PathBuf;

use crate::llm::LlmConfig;
use crate::store::StoreConfig;

/// Process configuration, snapshotted from the environment once at startup
/// and handed to the server as an owned value.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub llm: LlmConfig,
    pub pages_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    /// Read configuration from environment variables, falling back to
    /// development defaults. A blank `LLM_API_KEY` is accepted here; the
    /// question-answering pipeline reports it on first use.
    pub fn from_env() -> Self {
        Self {
            store: StoreConfig {
                uri: env_or("NEO4J_URI", "bolt://localhost:7687"),
                user: env_or("NEO4J_USER", "neo4j"),
                password: env_or("NEO4J_PASSWORD", "neo4j"),
                fetch_size: 256,
            },
            llm: LlmConfig {
                api_url: env_or("LLM_API_URL", "https://api.deepseek.com/chat/completions"),
                api_key: env_or("LLM_API_KEY", ""),
                model: env_or("LLM_MODEL", "deepseek-chat"),
            },
            pages_dir: PathBuf::from(env_or("KGRAPH_PAGES_DIR", "templates")),
            static_dir: PathBuf::from(env_or("KGRAPH_STATIC_DIR", "static")),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
