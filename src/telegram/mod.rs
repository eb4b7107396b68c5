//! Telegram host adapter (teloxide).
//!
//! Wires the host-agnostic pipeline into a long-polling dispatcher: chat
//! text goes through trigger parsing, and `/play [platform] <title>` maps
//! onto the same search-and-play entry point. Request failures are logged
//! and never take the dispatcher down.

use crate::command;
use crate::error::{AppError, AppResult};
use crate::host::{InboundMessage, ReplySink};
use crate::pipeline::{self, PlayerDeps};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::InputFile;

/// Reply sink bound to one chat.
pub struct TelegramSink {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramSink {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn text(&self, text: &str) -> AppResult<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn voice(&self, text: &str, file: &Path) -> AppResult<()> {
        if !file.exists() {
            return Err(AppError::Reply(format!("file not found: {}", file.display())));
        }
        self.bot.send_message(self.chat_id, text).await?;
        self.bot
            .send_voice(self.chat_id, InputFile::file(file.to_path_buf()))
            .await?;
        Ok(())
    }
}

/// Message handler wired into the dispatcher.
pub async fn handle_update(bot: Bot, msg: Message, deps: Arc<PlayerDeps>) -> ResponseResult<()> {
    let Some(text) = msg.text() else { return Ok(()) };
    let sink = TelegramSink::new(bot, msg.chat.id);

    let result = if let Some(rest) = text.strip_prefix("/play ") {
        // Bot-command form of the same request; bad input is ignored the
        // same way an empty trigger is.
        match command::parse_free_text(rest, deps.config.default_platform) {
            Some(request) => pipeline::handle_request(&deps, &request, &sink).await.map(Some),
            None => Ok(None),
        }
    } else {
        let inbound = InboundMessage {
            text: text.to_string(),
            chat_id: msg.chat.id.0,
        };
        pipeline::handle_message(&deps, &inbound, &sink).await
    };

    match result {
        Ok(Some(outcome)) => log::info!("Request in chat {} finished: {:?}", msg.chat.id.0, outcome),
        Ok(None) => {}
        // The request already got its user-visible reply where possible;
        // the dispatcher keeps running regardless.
        Err(e) => log::error!("Request in chat {} failed: {}", msg.chat.id.0, e),
    }
    Ok(())
}

/// Build the bot from `TELOXIDE_TOKEN` and run the long-polling dispatcher
/// until shutdown.
pub async fn run(deps: Arc<PlayerDeps>) {
    let bot = Bot::from_env();
    log::info!("Starting Telegram dispatcher");

    let handler = Update::filter_message().endpoint(handle_update);
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
