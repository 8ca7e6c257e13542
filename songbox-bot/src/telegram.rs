//! Telegram transport
//!
//! Long-polls the Bot API with teloxide and routes updates:
//! - `/start` and `/delete <n>` commands
//! - plain text (anything not starting with `/`) as a suggestion
//! - inline button presses

use songbox_common::Identity;
use teloxide::dispatching::UpdateHandler;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update, User,
    UserId,
};
use teloxide::utils::command::BotCommands;
use teloxide::{ApiError, RequestError};
use tracing::{error, info, warn};

use crate::dispatch::SHOW_SONGS;
use crate::{replies, AppState, Result};

/// Bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Song suggestion commands:")]
pub enum Command {
    #[command(description = "show the greeting and the song list button")]
    Start,
    #[command(description = "delete a song by its number (administrator only)")]
    Delete(String),
}

/// Update routing tree
pub fn schema() -> UpdateHandler<crate::Error> {
    let message_handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(
            Message::filter_text()
                .filter(|text: String| !text.starts_with('/'))
                .endpoint(on_text),
        );

    let callback_handler = Update::filter_callback_query().endpoint(on_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

/// Register the command list and poll until Ctrl+C
pub async fn run(bot: Bot, state: AppState) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    info!("Polling for updates");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling update",
        ))
        .build()
        .dispatch()
        .await;
}

fn identity_of(user: &User) -> Identity {
    Identity::new(user.id.0, user.username.clone(), user.first_name.clone())
}

fn admin_chat(state: &AppState) -> ChatId {
    ChatId::from(UserId(state.admin().0))
}

/// First whitespace-separated token of a command's argument text
fn first_arg(args: &str) -> Option<&str> {
    args.split_whitespace().next()
}

async fn on_command(bot: Bot, msg: Message, cmd: Command, state: AppState) -> Result<()> {
    match cmd {
        Command::Start => {
            let keyboard = InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
                replies::SHOW_SONGS_BUTTON,
                SHOW_SONGS,
            )]]);
            bot.send_message(msg.chat.id, replies::GREETING)
                .reply_markup(keyboard)
                .await?;
        }
        Command::Delete(args) => {
            let Some(requester) = msg.from.as_ref().map(identity_of) else {
                return Ok(());
            };
            let text = match state.delete(first_arg(&args), &requester).await {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to delete song: {}", e);
                    replies::STORAGE_FAILURE.to_string()
                }
            };
            bot.send_message(msg.chat.id, text).await?;
        }
    }
    Ok(())
}

async fn on_text(bot: Bot, msg: Message, text: String, state: AppState) -> Result<()> {
    let Some(sender) = msg.from.as_ref().map(identity_of) else {
        return Ok(());
    };

    let reply = match state.suggest(&text, &sender).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Failed to store suggestion: {}", e);
            bot.send_message(msg.chat.id, replies::STORAGE_FAILURE).await?;
            return Ok(());
        }
    };

    if let Some(text) = reply.reply {
        bot.send_message(msg.chat.id, text).await?;
    }
    if let Some(notice) = reply.admin_notice {
        // The song is already stored; an unreachable admin must not fail the update
        if let Err(e) = bot.send_message(admin_chat(&state), notice).await {
            warn!("Failed to notify administrator {}: {}", state.admin(), e);
        }
    }
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, state: AppState) -> Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    if q.data.as_deref() != Some(SHOW_SONGS) {
        return Ok(());
    }

    let text = state.song_list().await;
    if let Some(message) = q.regular_message() {
        match bot.edit_message_text(message.chat.id, message.id, text).await {
            Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
