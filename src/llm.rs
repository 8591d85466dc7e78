use reqwest::Client;
use serde_json::{json, Value};

use crate::error::LlmError;

/// Sampling temperature used for both query generation and answer synthesis.
const TEMPERATURE: f64 = 0.5;

const CYPHER_SYSTEM_PROMPT: &str =
    "You are a professional Cypher query generation assistant, skilled at \
     extracting the key entities from a question.";

const ANSWER_SYSTEM_PROMPT: &str =
    "You are a knowledge graph analysis assistant for the materials science domain.";

/// Settings for the external chat-completion API.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

/// Client for the external chat-completion API. Both prompt kinds go to the
/// same model with the same temperature; one attempt per call, no retries.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Ask the model to turn a free-text question into a Cypher query.
    /// The response is trimmed and fence markers are removed; nothing else
    /// is validated before the query reaches the store.
    pub async fn generate_cypher(&self, question: &str) -> Result<String, LlmError> {
        let content = self
            .chat(CYPHER_SYSTEM_PROMPT, &cypher_prompt(question))
            .await?;
        Ok(strip_fences(&content))
    }

    /// Ask the model to answer `question` from the query result rows.
    /// An empty row set is a valid input; the model answers from nothing.
    pub async fn synthesize_answer(
        &self,
        records: &[Value],
        question: &str,
    ) -> Result<String, LlmError> {
        let content = self
            .chat(ANSWER_SYSTEM_PROMPT, &answer_prompt(records, question))
            .await?;
        Ok(content.trim().to_string())
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        if self.config.api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
            "temperature": TEMPERATURE,
        });

        let res = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(LlmError::Api { status, body });
        }

        let json: Value = res.json().await?;

        if let Some(choice) = json["choices"].as_array().and_then(|arr| arr.first()) {
            if let Some(msg) = choice["message"]["content"].as_str() {
                return Ok(msg.to_string());
            }
        }

        Err(LlmError::MalformedResponse)
    }
}

/// Build the query-generation prompt: schema description, generation rules,
/// and one worked example, with the question embedded at the end.
fn cypher_prompt(question: &str) -> String {
    format!(
        r#"You are a Neo4j expert. Generate a Cypher query following these rules:
Knowledge graph structure:
- Node label: Node
- Key property: name
- Relationships: catalyzes, affects, promotes and similar domain relations
Query generation rules:
1. Extract the core entity keywords from the question
2. Find the nodes related to those keywords and the relationships between them
Example:
Question: "How does the silver catalyst affect reaction activity"
Query: "MATCH (n:Node)-[r]-(m:Node) WHERE n.name CONTAINS 'silver' OR m.name CONTAINS 'activity' RETURN n, r, m"
Generate a Cypher query for the following question:
Question: {question}"#
    )
}

/// Build the answer-synthesis prompt: the result rows pretty-printed as JSON
/// followed by the original question.
fn answer_prompt(records: &[Value], question: &str) -> String {
    let data = serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"Answer the user's question professionally and concisely using the knowledge graph data below:
[Knowledge graph data]:
{data}
[User question]:
{question}
Answer:"#
    )
}

/// Trim the completion and drop every triple-backtick fence marker.
fn strip_fences(content: &str) -> String {
    content.trim().replace("```", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_url: &str) -> LlmClient {
        LlmClient::new(LlmConfig {
            api_url: format!("{server_url}/chat/completions"),
            api_key: "test-key".to_string(),
            model: "deepseek-chat".to_string(),
        })
    }

    fn completion_body(content: &str) -> Value {
        json!({
            "choices": [
                {"message": {"role": "assistant", "content": content}}
            ]
        })
    }

    #[test]
    fn cypher_prompt_embeds_question_and_example() {
        let prompt = cypher_prompt("which promoters improve selectivity");

        assert!(prompt.contains("which promoters improve selectivity"));
        assert!(prompt.contains("Node label: Node"));
        assert!(prompt.contains("MATCH (n:Node)-[r]-(m:Node)"));
    }

    #[test]
    fn answer_prompt_embeds_rows_and_question() {
        let records = vec![json!({"source": "Ag", "target": "selectivity"})];
        let prompt = answer_prompt(&records, "what affects selectivity");

        assert!(prompt.contains("\"source\": \"Ag\""));
        assert!(prompt.contains("what affects selectivity"));
    }

    #[test]
    fn answer_prompt_with_empty_rows() {
        let prompt = answer_prompt(&[], "anything");
        assert!(prompt.contains("[]"), "empty row set renders as empty JSON");
    }

    #[test]
    fn strip_fences_removes_all_markers() {
        assert_eq!(strip_fences("```\nMATCH (n) RETURN n\n```"), "\nMATCH (n) RETURN n\n");
        assert_eq!(strip_fences("  MATCH (n) RETURN n  "), "MATCH (n) RETURN n");
        assert_eq!(strip_fences("no fences"), "no fences");
    }

    #[tokio::test]
    async fn generate_cypher_extracts_and_strips_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "model": "deepseek-chat",
                "temperature": 0.5,
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("```MATCH (n) RETURN n```")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let cypher = client.generate_cypher("show me the graph").await.unwrap();
        assert_eq!(cypher, "MATCH (n) RETURN n");
    }

    #[tokio::test]
    async fn synthesize_answer_trims_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("  The silver catalyst raises activity.  ")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let answer = client
            .synthesize_answer(&[json!({"source": "Ag"})], "what does silver do")
            .await
            .unwrap();
        assert_eq!(answer, "The silver catalyst raises activity.");
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.generate_cypher("question").await.unwrap_err();
        match err {
            LlmError::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid api key"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_choices_is_a_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.generate_cypher("question").await.unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse));
    }

    #[tokio::test]
    async fn blank_api_key_fails_before_any_request() {
        let client = LlmClient::new(LlmConfig {
            api_url: "http://127.0.0.1:1/never-called".to_string(),
            api_key: String::new(),
            model: "deepseek-chat".to_string(),
        });

        let err = client.generate_cypher("question").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
