use std::env;

use chainchat_common::config::{optional_env, require_env};
use chainchat_common::{Error, Result};
use serde_json::{Value, json};

/// Which backing language-model provider the agent service should use, with
/// the credential shape that provider's options require.
#[derive(Debug, Clone)]
pub enum Provider {
    OpenAi {
        api_key: String,
        model: Option<String>,
    },
    Gemini {
        api_key: String,
        model: Option<String>,
    },
    VertexAi {
        project_id: String,
        location: Option<String>,
        model: Option<String>,
    },
}

impl Provider {
    /// Wire identifier sent as `llmProvider`.
    pub fn id(&self) -> &'static str {
        match self {
            Provider::OpenAi { .. } => "openai",
            Provider::Gemini { .. } => "gemini",
            Provider::VertexAi { .. } => "vertexai",
        }
    }

    /// Build the provider selection from the environment.
    ///
    /// `CHAINCHAT_LLM_PROVIDER` picks `openai` (default), `gemini`, or
    /// `vertexai`; each requires its own credential variables.
    pub fn from_env() -> Result<Self> {
        let selected = env::var("CHAINCHAT_LLM_PROVIDER")
            .unwrap_or_else(|_| "openai".to_string())
            .trim()
            .to_ascii_lowercase();

        match selected.as_str() {
            "openai" => Ok(Provider::OpenAi {
                api_key: require_env("OPENAI_API_KEY")?,
                model: optional_env("OPENAI_MODEL"),
            }),
            "gemini" => Ok(Provider::Gemini {
                api_key: require_env("GOOGLE_API_KEY")?,
                model: optional_env("GEMINI_MODEL"),
            }),
            "vertexai" => Ok(Provider::VertexAi {
                project_id: require_env("GOOGLE_PROJECT_ID")?,
                location: optional_env("GOOGLE_LOCATION"),
                model: optional_env("VERTEXAI_MODEL"),
            }),
            other => Err(Error::Config(format!("unsupported llm provider: {other}"))),
        }
    }

    /// Credential options object keyed the way the service expects
    /// (`openAI`, `gemini`, or `vertexAI`).
    pub(crate) fn credential_options(&self) -> Value {
        match self {
            Provider::OpenAi { api_key, model } => {
                let mut creds = json!({"apiKey": api_key});
                if let Some(model) = model {
                    creds["model"] = json!(model);
                }
                json!({"openAI": creds})
            }
            Provider::Gemini { api_key, model } => {
                let mut creds = json!({"apiKey": api_key});
                if let Some(model) = model {
                    creds["model"] = json!(model);
                }
                json!({"gemini": creds})
            }
            Provider::VertexAi {
                project_id,
                location,
                model,
            } => {
                let mut creds = json!({"projectId": project_id});
                if let Some(location) = location {
                    creds["location"] = json!(location);
                }
                if let Some(model) = model {
                    creds["model"] = json!(model);
                }
                json!({"vertexAI": creds})
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_options_shape() {
        let provider = Provider::OpenAi {
            api_key: "sk-test".to_string(),
            model: None,
        };
        assert_eq!(provider.id(), "openai");
        assert_eq!(
            provider.credential_options(),
            json!({"openAI": {"apiKey": "sk-test"}})
        );
    }

    #[test]
    fn openai_options_include_model_when_set() {
        let provider = Provider::OpenAi {
            api_key: "sk-test".to_string(),
            model: Some("gpt-4-turbo".to_string()),
        };
        assert_eq!(
            provider.credential_options(),
            json!({"openAI": {"apiKey": "sk-test", "model": "gpt-4-turbo"}})
        );
    }

    #[test]
    fn vertexai_options_shape() {
        let provider = Provider::VertexAi {
            project_id: "proj-1".to_string(),
            location: Some("us-central1".to_string()),
            model: None,
        };
        assert_eq!(provider.id(), "vertexai");
        assert_eq!(
            provider.credential_options(),
            json!({"vertexAI": {"projectId": "proj-1", "location": "us-central1"}})
        );
    }

    #[test]
    fn gemini_options_shape() {
        let provider = Provider::Gemini {
            api_key: "g-test".to_string(),
            model: None,
        };
        assert_eq!(provider.id(), "gemini");
        assert_eq!(
            provider.credential_options(),
            json!({"gemini": {"apiKey": "g-test"}})
        );
    }
}
