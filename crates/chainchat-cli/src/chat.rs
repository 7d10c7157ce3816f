use chainchat_client::{AgentClient, Provider};
use chainchat_common::{AgentServiceConfig, ConversationId};
use chainchat_render::{PresentationAction, render};
use chainchat_session::ContextStore;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

/// Blocking read-eval loop over stdin.
///
/// One outstanding agent call at a time; `quit` (any case), Ctrl-C, or
/// Ctrl-D ends the session with a farewell. The in-memory context window is
/// simply abandoned on exit.
pub async fn run() -> anyhow::Result<()> {
    let config = AgentServiceConfig::from_env()?;
    let provider = Provider::from_env()?;
    let client = AgentClient::new(&config.base_url, config.timeout)?;
    let contexts = ContextStore::new();
    let conversation = ConversationId::from("cli");

    println!("✓ {} credentials are ready", provider.id());
    println!();
    println!("Welcome to the Crypto.com AI Agent Chat!");
    println!("Type 'quit' to exit");
    println!("Use up/down arrow keys to navigate command history");
    println!("{}", "-".repeat(50));

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("\nYou: ") {
            Ok(line) => {
                let input = line.trim();
                if input.eq_ignore_ascii_case("quit") {
                    println!("\nGoodbye!");
                    break;
                }
                if input.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(input);

                let window = contexts.get(&conversation);
                let outcome = client.query(input, window.entries(), &provider).await;

                let envelope = match &outcome {
                    Ok(envelope) => Some(envelope),
                    Err(e) => {
                        warn!("agent query failed: {e}");
                        None
                    }
                };

                if let Some(envelope) = envelope
                    && let Some(entries) = &envelope.context
                {
                    contexts.update(&conversation, entries.clone());
                }

                for action in render(envelope) {
                    print_action(action);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn print_action(action: PresentationAction) {
    match action {
        PresentationAction::ConnectionError => {
            println!("\nAI Agent: Sorry, I couldn't connect to the service.");
        }
        PresentationAction::ProcessingError => {
            println!("\nAI Agent: Sorry, there was an error processing your request.");
        }
        PresentationAction::StatusLine(status) => {
            println!("\nAI Agent: {status}");
        }
        PresentationAction::MagicLinkOffer(link) => {
            println!("\nTransaction Ready!");
            println!("Opening signature page in your default browser...");
            if let Err(e) = webbrowser::open(&link) {
                warn!("could not open browser: {e}");
                println!("Open this link to sign the transaction: {link}");
            }
        }
        PresentationAction::StructuredDataDisplay(value) => {
            let pretty =
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            println!("{pretty}");
        }
        PresentationAction::PlainTextDisplay(text) => {
            println!("{text}");
        }
        PresentationAction::FinalSummary(text) => {
            println!("\nAI Agent: {text}");
        }
    }
}
