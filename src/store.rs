use neo4rs::{query, ConfigBuilder, Graph, Query};
use serde_json::Value;

use crate::error::StoreError;
use crate::graph::Link;

/// Full-graph retrieval, bounded by a caller-supplied limit.
const FULL_GRAPH_CYPHER: &str = "MATCH (n)-[r]->(m) \
     RETURN n.name AS source, m.name AS target, type(r) AS relation \
     LIMIT $limit";

/// Keyword subgraph: case-insensitive containment on either endpoint name.
const SEARCH_CYPHER: &str = "MATCH (n)-[r]->(m) \
     WHERE toLower(n.name) CONTAINS toLower($q) OR toLower(m.name) CONTAINS toLower($q) \
     RETURN n.name AS source, m.name AS target, type(r) AS relation \
     LIMIT 100";

/// Connection settings for the graph store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub fetch_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "neo4j".to_string(),
            fetch_size: 256,
        }
    }
}

/// Handle to the Neo4j store, connected once at startup and shared through
/// request state. Clone is cheap (the inner client is pooled).
#[derive(Clone)]
pub struct GraphStore {
    graph: Graph,
}

impl GraphStore {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "connected to Neo4j");
        Ok(Self { graph })
    }

    /// The first `limit` edges in the store, in store order.
    pub async fn full_graph(&self, limit: i64) -> Result<Vec<Link>, StoreError> {
        let q = query(FULL_GRAPH_CYPHER).param("limit", limit);
        self.links(q).await
    }

    /// Up to 100 edges where either endpoint name contains `keyword`,
    /// case-insensitively.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Link>, StoreError> {
        let q = query(SEARCH_CYPHER).param("q", keyword);
        self.links(q).await
    }

    /// Execute an arbitrary Cypher string with no parameters and collect the
    /// rows as JSON objects keyed by column name. Used for model-generated
    /// queries, which run verbatim.
    pub async fn run_raw(&self, cypher: &str) -> Result<Vec<Value>, StoreError> {
        let mut stream = self.graph.execute(query(cypher)).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            let value = row
                .to::<Value>()
                .map_err(|e| StoreError::Deserialize(e.to_string()))?;
            rows.push(value);
        }
        Ok(rows)
    }

    async fn links(&self, q: Query) -> Result<Vec<Link>, StoreError> {
        let mut stream = self.graph.execute(q).await?;
        let mut links = Vec::new();
        while let Some(row) = stream.next().await? {
            links.push(Link {
                source: row
                    .get("source")
                    .map_err(|e| StoreError::Deserialize(e.to_string()))?,
                target: row
                    .get("target")
                    .map_err(|e| StoreError::Deserialize(e.to_string()))?,
                relation: row
                    .get("relation")
                    .map_err(|e| StoreError::Deserialize(e.to_string()))?,
            });
        }
        Ok(links)
    }
}
