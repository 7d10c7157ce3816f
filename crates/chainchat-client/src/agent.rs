use std::time::Duration;

use chainchat_common::{ContextEntry, Error, Result};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::envelope::ResponseEnvelope;
use crate::provider::Provider;

const QUERY_PATH: &str = "/api/v1/cdc-ai-agent-service/query";

/// Client for the remote agent service.
///
/// Performs exactly one `POST` per query with a bounded timeout. Failures
/// are never retried; the caller treats each one as terminal for the turn.
pub struct AgentClient {
    client: Client,
    base_url: String,
}

impl AgentClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Connection(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Send one query with the conversation's current context window.
    ///
    /// Callers must filter out empty or whitespace-only query text before
    /// this call.
    pub async fn query(
        &self,
        query: &str,
        context: &[ContextEntry],
        provider: &Provider,
    ) -> Result<ResponseEnvelope> {
        let url = format!("{}{QUERY_PATH}", self.base_url);
        let body = request_body(query, context, provider);
        debug!(
            "querying agent service at {url} ({} context entries)",
            context.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Connection(format!("agent request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Connection(format!(
                "agent service returned {status}: {error_text}"
            )));
        }

        response
            .json::<ResponseEnvelope>()
            .await
            .map_err(|e| Error::Connection(format!("failed to parse agent response: {e}")))
    }
}

/// Query envelope: the user's text plus provider credentials, the provider
/// id, and the context window, nested under `options`.
fn request_body(query: &str, context: &[ContextEntry], provider: &Provider) -> Value {
    let mut options = provider.credential_options();
    options["llmProvider"] = json!(provider.id());
    options["context"] = json!(context);
    json!({
        "query": query,
        "options": options,
    })
}
