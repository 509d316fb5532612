// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Message snapshots kept for deletion attribution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Jump link to a message, built from stable IDs so it stays valid after
/// the message itself is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLink {
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub message_id: u64,
}

impl MessageLink {
    pub fn new(guild_id: Option<u64>, channel_id: u64, message_id: u64) -> Self {
        Self {
            guild_id,
            channel_id,
            message_id,
        }
    }
}

impl fmt::Display for MessageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Direct messages have no guild and use the "@me" path segment
        match self.guild_id {
            Some(guild_id) => write!(
                f,
                "https://discord.com/channels/{}/{}/{}",
                guild_id, self.channel_id, self.message_id
            ),
            None => write!(
                f,
                "https://discord.com/channels/@me/{}/{}",
                self.channel_id, self.message_id
            ),
        }
    }
}

/// Minimal snapshot of a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSnapshot {
    pub message_id: u64,
    /// Author ID only; the snapshot never holds the author record itself
    pub author_id: u64,
    pub link: MessageLink,
}
