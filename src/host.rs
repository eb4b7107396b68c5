//! Host-framework abstraction.
//!
//! The pipeline never touches a concrete chat framework: inbound events are
//! reduced to [`InboundMessage`] and all replies go through a [`ReplySink`].
//! Each host (Telegram today) supplies an adapter implementing the sink.

use crate::error::AppResult;
use async_trait::async_trait;
use std::path::Path;

/// Inbound chat event, reduced to what the pipeline needs.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Raw message text as typed by the user.
    pub text: String,
    /// Stable id of the originating chat, for logging only.
    pub chat_id: i64,
}

/// Outbound side of the host adapter.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Deliver a plain-text reply.
    async fn text(&self, text: &str) -> AppResult<()>;

    /// Deliver the two-part now-playing reply: a text line plus a voice
    /// attachment referencing `file`.
    async fn voice(&self, text: &str, file: &Path) -> AppResult<()>;
}
