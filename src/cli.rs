use clap::{Parser, Subcommand};

/// kgraph: web explorer and natural-language QA for a Neo4j knowledge graph
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Web explorer and natural-language QA for a Neo4j knowledge graph"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, short, default_value_t = 8000)]
        port: u16,
    },
}
