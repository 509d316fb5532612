// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lookaside cache of sent messages.
//!
//! Raw delete notifications carry only IDs, so we remember who wrote each
//! message when it is sent. Entries are single-use: a deletion takes the
//! entry out. There is no expiry or capacity bound, so messages that are
//! never deleted stay for the life of the process.

use crate::models::MessageSnapshot;
use dashmap::DashMap;

/// Message ID to snapshot map.
#[derive(Debug, Default)]
pub struct MessageCache {
    messages: DashMap<u64, MessageSnapshot>,
}

impl MessageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the snapshot for `message_id`.
    pub fn put(&self, message_id: u64, snapshot: MessageSnapshot) {
        self.messages.insert(message_id, snapshot);
    }

    /// Remove and return the snapshot for `message_id`.
    pub fn take(&self, message_id: u64) -> Option<MessageSnapshot> {
        self.messages.remove(&message_id).map(|(_, snapshot)| snapshot)
    }

    /// Read a snapshot without consuming it.
    pub fn peek(&self, message_id: u64) -> Option<MessageSnapshot> {
        self.messages
            .get(&message_id)
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
