use chainchat_common::ContextEntry;
use serde::Deserialize;
use serde_json::Value;

/// Parsed response body from the agent service.
///
/// Every field is optional on the wire; a response carrying none of them is
/// valid and simply produces no output for the turn.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub has_errors: bool,
    #[serde(default)]
    pub results: Vec<AgentResult>,
    #[serde(default)]
    pub final_response: Option<String>,
    #[serde(default)]
    pub context: Option<Vec<ContextEntry>>,
}

/// One executed step reported by the agent.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentResult {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<ResultData>,
}

/// Result payload, classified once at parse time.
///
/// An object carrying a string `magicLink` field is a pending transaction
/// needing external signature; any other object or array is structured data;
/// everything else is a plain scalar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum ResultData {
    MagicLink(String),
    Structured(Value),
    Scalar(Value),
}

impl From<Value> for ResultData {
    fn from(value: Value) -> Self {
        match &value {
            Value::Object(map) => match map.get("magicLink").and_then(Value::as_str) {
                Some(link) => ResultData::MagicLink(link.to_string()),
                None => ResultData::Structured(value),
            },
            Value::Array(_) => ResultData::Structured(value),
            _ => ResultData::Scalar(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn magic_link_payload_is_classified_once() {
        let data: ResultData =
            serde_json::from_value(json!({"magicLink": "https://x"})).unwrap();
        assert_eq!(data, ResultData::MagicLink("https://x".to_string()));
    }

    #[test]
    fn object_without_link_is_structured() {
        let data: ResultData = serde_json::from_value(json!({"balance": 42})).unwrap();
        assert_eq!(data, ResultData::Structured(json!({"balance": 42})));
    }

    #[test]
    fn non_string_magic_link_is_structured() {
        let data: ResultData = serde_json::from_value(json!({"magicLink": 7})).unwrap();
        assert_eq!(data, ResultData::Structured(json!({"magicLink": 7})));
    }

    #[test]
    fn arrays_are_structured_and_scalars_plain() {
        let array: ResultData = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(array, ResultData::Structured(json!([1, 2, 3])));

        let scalar: ResultData = serde_json::from_value(json!("0.5 TCRO")).unwrap();
        assert_eq!(scalar, ResultData::Scalar(json!("0.5 TCRO")));
    }

    #[test]
    fn envelope_parses_full_response() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "hasErrors": false,
            "results": [{"status": "done", "data": {"balance": 42}}],
            "finalResponse": "Your balance is 42.",
            "context": [{"turn": 1}]
        }))
        .unwrap();

        assert!(!envelope.has_errors);
        assert_eq!(envelope.results.len(), 1);
        assert_eq!(envelope.results[0].status.as_deref(), Some("done"));
        assert_eq!(envelope.final_response.as_deref(), Some("Your balance is 42."));
        assert_eq!(
            envelope.context,
            Some(vec![ContextEntry(json!({"turn": 1}))])
        );
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(!envelope.has_errors);
        assert!(envelope.results.is_empty());
        assert!(envelope.final_response.is_none());
        assert!(envelope.context.is_none());
    }

    #[test]
    fn result_without_status_or_data_parses() {
        let result: AgentResult = serde_json::from_value(json!({})).unwrap();
        assert!(result.status.is_none());
        assert!(result.data.is_none());
    }
}
