use std::sync::Arc;

use chainchat_client::{AgentClient, Provider};
use chainchat_common::{ConversationId, Result};
use chainchat_render::{PresentationAction, render};
use chainchat_session::ContextStore;
use chrono::{Local, Utc};
use teloxide::dispatching::UpdateFilterExt;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode, User};
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::shortener::LinkShortener;
use crate::telegram_fmt::json_code_block;

/// Long-polling Telegram front end.
///
/// Each inbound text message runs one agent turn against the sender's own
/// context window; the polling runtime may interleave handlers for
/// different users, which the keyed [`ContextStore`] supports.
pub struct TelegramBot {
    bot_token: String,
    state: Arc<BotState>,
}

struct BotState {
    client: AgentClient,
    provider: Provider,
    contexts: ContextStore,
    shortener: LinkShortener,
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    #[command(description = "greet and explain usage.")]
    Start,
    #[command(description = "show current local and UTC time.")]
    Time,
    #[command(description = "show user and chat details.")]
    Debug,
}

impl TelegramBot {
    pub fn new(
        bot_token: String,
        client: AgentClient,
        provider: Provider,
        contexts: ContextStore,
    ) -> Self {
        Self {
            bot_token,
            state: Arc::new(BotState {
                client,
                provider,
                contexts,
                shortener: LinkShortener::new(),
            }),
        }
    }

    /// Run the polling dispatcher until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let bot = Bot::new(&self.bot_token);

        let handler = Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(handle_command),
            )
            .branch(
                dptree::filter_map(|msg: Message| {
                    let text = msg.text()?.to_string();
                    // Unknown slash commands fall through the command branch;
                    // they are not queries for the agent.
                    (!text.starts_with('/')).then_some(text)
                })
                .endpoint(handle_text),
            );

        info!("telegram bot polling started");
        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![Arc::clone(&self.state)])
            .default_handler(|upd| async move {
                tracing::trace!("unhandled update: {:?}", upd.kind);
            })
            .build()
            .dispatch()
            .await;
        info!("telegram bot polling stopped");

        Ok(())
    }
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    let reply = match cmd {
        Command::Start => "Hi! I am a bot. Use /time to get current time.".to_string(),
        Command::Time => time_text(),
        Command::Debug => debug_text(msg.from.as_ref(), msg.chat.id),
    };
    bot.send_message(msg.chat.id, reply).await?;
    respond(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    text: String,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    // Ignore messages without a sender (channel posts) and other bots.
    let Some(user) = msg.from.as_ref() else {
        return respond(());
    };
    if user.is_bot {
        return respond(());
    }

    let query = text.trim();
    if query.is_empty() {
        return respond(());
    }

    let conversation = ConversationId::from(user.id.0);
    info!(
        "telegram message from {} [uid={}] (chat {}): {} chars",
        user.first_name,
        user.id,
        msg.chat.id,
        query.len()
    );

    let _ = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await;

    let window = state.contexts.get(&conversation);
    let outcome = state
        .client
        .query(query, window.entries(), &state.provider)
        .await;

    let envelope = match &outcome {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            warn!("agent query failed for chat {}: {e}", msg.chat.id);
            None
        }
    };

    if let Some(envelope) = envelope
        && let Some(entries) = &envelope.context
    {
        state.contexts.update(&conversation, entries.clone());
    }

    for action in render(envelope) {
        deliver(&bot, msg.chat.id, &state.shortener, action).await?;
    }
    respond(())
}

/// How one presentation action goes out over Telegram.
#[derive(Debug, Clone, PartialEq)]
enum Reply {
    Plain(String),
    /// MarkdownV2 body with a plain-text fallback if Telegram rejects it.
    Markdown { body: String, fallback: String },
    /// Inline button labeled "Open Magic Link", shortened before display.
    LinkButton { caption: String, link: String },
}

fn plan_reply(action: PresentationAction) -> Reply {
    match action {
        PresentationAction::ConnectionError => {
            Reply::Plain("Sorry, I couldn't connect to the AI service.".to_string())
        }
        PresentationAction::ProcessingError => {
            Reply::Plain("Sorry, there was an error processing your request.".to_string())
        }
        PresentationAction::StatusLine(status) => Reply::Plain(format!("🤖 {status}")),
        PresentationAction::MagicLinkOffer(link) => Reply::LinkButton {
            caption: "Transaction Ready! Click the button below to proceed:".to_string(),
            link,
        },
        PresentationAction::StructuredDataDisplay(value) => Reply::Markdown {
            body: json_code_block(&value),
            fallback: serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
        },
        PresentationAction::PlainTextDisplay(text) => Reply::Plain(text),
        PresentationAction::FinalSummary(text) => Reply::Plain(format!("🤖 {text}")),
    }
}

async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    shortener: &LinkShortener,
    action: PresentationAction,
) -> ResponseResult<()> {
    match plan_reply(action) {
        Reply::Plain(text) => {
            bot.send_message(chat_id, text).await?;
        }
        Reply::Markdown { body, fallback } => {
            let sent = bot
                .send_message(chat_id, body)
                .parse_mode(ParseMode::MarkdownV2)
                .await;
            if sent.is_err() {
                // Fallback: plain text
                bot.send_message(chat_id, fallback).await?;
            }
        }
        Reply::LinkButton { caption, link } => {
            let short = shortener.shorten(&link).await;
            match url::Url::parse(&short) {
                Ok(button_url) => {
                    let keyboard = InlineKeyboardMarkup::new([[InlineKeyboardButton::url(
                        "Open Magic Link",
                        button_url,
                    )]]);
                    bot.send_message(chat_id, caption)
                        .reply_markup(keyboard)
                        .await?;
                }
                Err(e) => {
                    warn!("magic link is not a valid url: {e}");
                    bot.send_message(chat_id, format!("{caption}\n{short}"))
                        .await?;
                }
            }
        }
    }
    respond(())
}

fn time_text() -> String {
    let utc = Utc::now();
    let local = Local::now();
    format!(
        "🕒 Current time:\n\nUTC: {}\nLocal: {}",
        utc.format("%Y-%m-%d %H:%M:%S %Z"),
        local.format("%Y-%m-%d %H:%M:%S")
    )
}

fn debug_text(user: Option<&User>, chat_id: ChatId) -> String {
    let Some(user) = user else {
        return format!("🔍 Debug Information:\n\nNo sender on this message.\nChat ID: {chat_id}");
    };
    format!(
        "🔍 Debug Information:\n\n\
         User ID: {}\n\
         First Name: {}\n\
         Last Name: {}\n\
         Username: {}\n\
         Language: {}\n\
         Is Bot: {}\n\
         Chat ID: {}",
        user.id,
        user.first_name,
        user.last_name.as_deref().unwrap_or("Not set"),
        user.username.as_deref().unwrap_or("Not set"),
        user.language_code.as_deref().unwrap_or("Not set"),
        user.is_bot,
        chat_id,
    )
}
