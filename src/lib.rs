//! Jukebot — group-chat song-request bot.
//!
//! Users type `点歌：<song name>` (optionally with a platform token first);
//! the bot queries a music aggregator, downloads and caches the track,
//! decrypts NCM containers when needed, and replies with a voice message.
//!
//! # Module Structure
//!
//! - `command`: trigger and platform-token parsing
//! - `search`: aggregator search client
//! - `download`: song cache layout, per-name locking, streaming fetch
//! - `ncm`: encrypted-container detection and decryption
//! - `pipeline`: the per-request flow
//! - `host` / `telegram`: host abstraction and the Telegram adapter

pub mod command;
pub mod config;
pub mod download;
pub mod error;
pub mod host;
pub mod logging;
pub mod ncm;
pub mod pipeline;
pub mod platform;
pub mod search;
pub mod telegram;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult};
pub use pipeline::{handle_message, search_and_play, PlayOutcome, PlayerDeps};
pub use platform::Platform;
