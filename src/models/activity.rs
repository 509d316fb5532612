// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity event model held by the activity store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of member activity that was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    MessageSent,
    MessageDeleted,
    ReactionAdded,
    ReactionRemoved,
    VoiceJoined,
    VoiceLeft,
}

/// The most recent thing a member did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Subject key: a user ID, or a message ID when a deleted message
    /// could not be attributed to its author
    pub user_id: u64,
    /// When this service captured the event (not the platform's event time)
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    /// Render-ready markdown summary
    pub description: String,
}

impl ActivityEvent {
    /// Build an event captured now.
    pub fn now(user_id: u64, kind: ActivityKind, description: impl Into<String>) -> Self {
        Self {
            user_id,
            timestamp: Utc::now(),
            kind,
            description: description.into(),
        }
    }
}
