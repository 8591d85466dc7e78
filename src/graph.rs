use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One directed edge returned by a graph query. Duplicates coming back from
/// the store are passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub relation: String,
}

/// A node derived from the endpoints of a batch of links. Not stored;
/// deduplicated within a single response only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
}

/// The unit returned to graph-browsing callers: the distinct endpoint nodes
/// plus the links exactly as the store produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphProjection {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

/// Build a projection from an ordered batch of links. Link order is
/// preserved; node order is unspecified (hash-set iteration).
pub fn project(links: Vec<Link>) -> GraphProjection {
    let mut names: HashSet<&str> = HashSet::new();
    for link in &links {
        names.insert(&link.source);
        names.insert(&link.target);
    }

    let nodes = names
        .into_iter()
        .map(|name| Node {
            name: name.to_string(),
        })
        .collect();

    GraphProjection { nodes, links }
}
