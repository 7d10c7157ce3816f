use chainchat_client::{ResponseEnvelope, ResultData};
use serde_json::Value;

/// One presentation step the front end must perform, in sequence order.
///
/// The dispatcher only decides *what* to show; each front end decides how
/// (terminal lines, Telegram messages, inline link buttons).
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationAction {
    /// The agent service could not be reached this turn.
    ConnectionError,
    /// The service answered but flagged the request as failed.
    ProcessingError,
    /// Status text of one result entry.
    StatusLine(String),
    /// A pending transaction link awaiting external signature.
    MagicLinkOffer(String),
    /// Structured payload to render as indented JSON.
    StructuredDataDisplay(Value),
    /// Scalar payload to render as plain text.
    PlainTextDisplay(String),
    /// Narrative summary, always the last action when present.
    FinalSummary(String),
}

/// Map a query outcome to the ordered actions the front end performs.
///
/// `None` means the client failed to obtain any envelope. An error-flagged
/// envelope short-circuits to a single `ProcessingError`: rendering results
/// after the service declared the request failed would be contradictory.
/// `finalResponse` is always emitted after the per-result actions, wherever
/// it appeared in the body.
pub fn render(envelope: Option<&ResponseEnvelope>) -> Vec<PresentationAction> {
    let Some(envelope) = envelope else {
        return vec![PresentationAction::ConnectionError];
    };

    if envelope.has_errors {
        return vec![PresentationAction::ProcessingError];
    }

    let mut actions = Vec::new();
    for result in &envelope.results {
        let status = result
            .status
            .clone()
            .unwrap_or_else(|| "No status".to_string());
        actions.push(PresentationAction::StatusLine(status));

        match &result.data {
            Some(ResultData::MagicLink(link)) => {
                actions.push(PresentationAction::MagicLinkOffer(link.clone()));
            }
            Some(ResultData::Structured(value)) => {
                actions.push(PresentationAction::StructuredDataDisplay(value.clone()));
            }
            Some(ResultData::Scalar(value)) => {
                actions.push(PresentationAction::PlainTextDisplay(scalar_text(value)));
            }
            None => {}
        }
    }

    if let Some(text) = &envelope.final_response {
        actions.push(PresentationAction::FinalSummary(text.clone()));
    }

    actions
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> ResponseEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn absent_envelope_yields_single_connection_error() {
        assert_eq!(render(None), vec![PresentationAction::ConnectionError]);
    }

    #[test]
    fn error_flag_short_circuits_everything_else() {
        let env = envelope(json!({
            "hasErrors": true,
            "results": [{"status": "done", "data": {"balance": 42}}],
            "finalResponse": "ignored"
        }));
        assert_eq!(render(Some(&env)), vec![PresentationAction::ProcessingError]);
    }

    #[test]
    fn error_flag_alone_yields_single_processing_error() {
        let env = envelope(json!({"hasErrors": true}));
        assert_eq!(render(Some(&env)), vec![PresentationAction::ProcessingError]);
    }

    #[test]
    fn magic_link_never_renders_as_structured_data() {
        let env = envelope(json!({
            "results": [{"status": "ready", "data": {"magicLink": "https://x"}}]
        }));
        assert_eq!(
            render(Some(&env)),
            vec![
                PresentationAction::StatusLine("ready".to_string()),
                PresentationAction::MagicLinkOffer("https://x".to_string()),
            ]
        );
    }

    #[test]
    fn final_summary_is_last_regardless_of_field_order() {
        // finalResponse appears before results in the body.
        let env = envelope(json!({
            "finalResponse": "All done.",
            "results": [
                {"status": "step one"},
                {"status": "step two", "data": "ok"}
            ]
        }));
        assert_eq!(
            render(Some(&env)),
            vec![
                PresentationAction::StatusLine("step one".to_string()),
                PresentationAction::StatusLine("step two".to_string()),
                PresentationAction::PlainTextDisplay("ok".to_string()),
                PresentationAction::FinalSummary("All done.".to_string()),
            ]
        );
    }

    #[test]
    fn results_render_in_envelope_order() {
        let env = envelope(json!({
            "results": [
                {"status": "a", "data": {"n": 1}},
                {"status": "b", "data": {"n": 2}}
            ]
        }));
        assert_eq!(
            render(Some(&env)),
            vec![
                PresentationAction::StatusLine("a".to_string()),
                PresentationAction::StructuredDataDisplay(json!({"n": 1})),
                PresentationAction::StatusLine("b".to_string()),
                PresentationAction::StructuredDataDisplay(json!({"n": 2})),
            ]
        );
    }

    #[test]
    fn missing_status_gets_placeholder_text() {
        let env = envelope(json!({"results": [{}]}));
        assert_eq!(
            render(Some(&env)),
            vec![PresentationAction::StatusLine("No status".to_string())]
        );
    }

    #[test]
    fn scalar_payloads_render_as_plain_text() {
        let env = envelope(json!({
            "results": [
                {"status": "count", "data": 42},
                {"status": "note", "data": "plain words"}
            ]
        }));
        assert_eq!(
            render(Some(&env)),
            vec![
                PresentationAction::StatusLine("count".to_string()),
                PresentationAction::PlainTextDisplay("42".to_string()),
                PresentationAction::StatusLine("note".to_string()),
                PresentationAction::PlainTextDisplay("plain words".to_string()),
            ]
        );
    }

    #[test]
    fn empty_envelope_yields_no_actions() {
        let env = envelope(json!({}));
        assert!(render(Some(&env)).is_empty());
    }
}
