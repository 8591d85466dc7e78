use anyhow::Result;
use tracing::info;

use crate::llm::LlmClient;
use crate::store::GraphStore;

/// Three-step question answering: ask the model for a Cypher query, run it
/// verbatim against the store, then ask the model to answer from the rows.
///
/// Any step failing aborts the pipeline; the HTTP layer turns the error into
/// an answer-shaped body. An empty result set is not a failure — synthesis
/// still runs with an empty data payload.
pub async fn answer_question(
    store: &GraphStore,
    llm: &LlmClient,
    question: &str,
) -> Result<String> {
    let cypher = llm.generate_cypher(question).await?;
    info!(%cypher, "generated query");

    let records = store.run_raw(&cypher).await?;
    info!(rows = records.len(), "query executed");

    let answer = llm.synthesize_answer(&records, question).await?;
    Ok(answer)
}
