// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Latest-activity-per-user store.
//!
//! Writes are unconditional overwrites keyed by arrival order. A delayed
//! notification for an older action can therefore replace a newer record
//! for the same user; readers get "last arrived", not "most recent in
//! real time".

use crate::models::ActivityEvent;
use dashmap::DashMap;

/// In-memory map of user ID to that user's last recorded activity.
#[derive(Debug, Default)]
pub struct ActivityStore {
    events: DashMap<u64, ActivityEvent>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event, replacing whatever was stored for `user_id`.
    pub fn record(&self, user_id: u64, event: ActivityEvent) {
        self.events.insert(user_id, event);
    }

    /// Last recorded event for `user_id`.
    pub fn lookup(&self, user_id: u64) -> Option<ActivityEvent> {
        self.events.get(&user_id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
