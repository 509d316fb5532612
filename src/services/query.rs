// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read side: "last activity" lookups and service status.

use crate::services::store::ActivityStore;
use crate::time_utils::relative_timestamp;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};

/// Process-wide record of when the session became ready.
#[derive(Debug, Default)]
pub struct ServiceClock {
    start_time: OnceLock<DateTime<Utc>>,
}

impl ServiceClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the start time. Only the first call has any effect; returns
    /// whether this call set it.
    pub fn mark_ready(&self) -> bool {
        self.mark_ready_at(Utc::now())
    }

    pub fn mark_ready_at(&self, at: DateTime<Utc>) -> bool {
        self.start_time.set(at).is_ok()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.start_time.get().copied()
    }
}

/// Result of a status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    /// Uptime origin; the capture time itself if the session is not ready yet
    pub online_since: DateTime<Utc>,
    /// Caller's previous status query, or the capture time on a first query
    pub previous_interaction: DateTime<Utc>,
    pub captured_at: DateTime<Utc>,
}

impl StatusReport {
    pub fn render(&self) -> String {
        format!(
            "🟢 Online: {}\nYour last interaction with the bot was: {}",
            relative_timestamp(self.online_since),
            relative_timestamp(self.previous_interaction)
        )
    }
}

/// Answers check and status commands.
///
/// Status queries are tracked in their own map, separate from the activity
/// store: a status reply reports the previous *status query*, never the
/// caller's last message, reaction or voice event.
pub struct QueryService {
    store: Arc<ActivityStore>,
    clock: Arc<ServiceClock>,
    status_queries: DashMap<u64, DateTime<Utc>>,
}

impl QueryService {
    pub fn new(store: Arc<ActivityStore>, clock: Arc<ServiceClock>) -> Self {
        Self {
            store,
            clock,
            status_queries: DashMap::new(),
        }
    }

    /// Describe the last recorded activity of `user_id`.
    pub fn describe_last_activity(&self, user_id: u64) -> String {
        match self.store.lookup(user_id) {
            Some(event) => format!(
                "<@{}> - Last interaction: {}\nInteraction: {}",
                user_id,
                relative_timestamp(event.timestamp),
                event.description
            ),
            None => format!("<@{}> has no recorded interactions.", user_id),
        }
    }

    /// Report uptime and the caller's previous status query, then record
    /// this query for the next call.
    pub fn status_report(&self, caller_id: u64) -> StatusReport {
        self.status_report_at(caller_id, Utc::now())
    }

    pub fn status_report_at(&self, caller_id: u64, now: DateTime<Utc>) -> StatusReport {
        let previous = self.status_queries.insert(caller_id, now).unwrap_or(now);

        StatusReport {
            online_since: self.clock.started_at().unwrap_or(now),
            previous_interaction: previous,
            captured_at: now,
        }
    }

    /// Rendered form of [`QueryService::status_report`].
    pub fn describe_status(&self, caller_id: u64) -> String {
        self.status_report(caller_id).render()
    }
}
