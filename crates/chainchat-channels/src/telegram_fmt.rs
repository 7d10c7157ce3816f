use serde_json::Value;

/// Render a JSON payload as a Telegram MarkdownV2 fenced code block.
///
/// Inside a MarkdownV2 code entity only `` ` `` and `\` need escaping; the
/// rest of the payload is preserved verbatim so the user sees real JSON.
pub fn json_code_block(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    format!("```json\n{}\n```", escape_code(&pretty))
}

fn escape_code(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c == '\\' || c == '`' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
