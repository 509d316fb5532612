// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event normalization.
//!
//! Turns gateway dispatches into activity records:
//! 1. Drop anything done by bot accounts
//! 2. Remember sent messages so raw deletions can be attributed
//! 3. Resolve reaction targets to a jump link (cache, then Discord)
//! 4. Record the resulting event, overwriting the subject's previous one

use crate::models::gateway::{MessageDelete, ReactionEvent, VoiceStateUpdate};
use crate::models::{
    ActivityEvent, ActivityKind, GatewayEvent, Message, MessageLink, MessageSnapshot,
};
use crate::services::message_cache::MessageCache;
use crate::services::platform::Platform;
use crate::services::query::ServiceClock;
use crate::services::store::ActivityStore;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Applies gateway events to the activity store and message cache.
pub struct EventNormalizer {
    store: Arc<ActivityStore>,
    cache: Arc<MessageCache>,
    clock: Arc<ServiceClock>,
    platform: Arc<dyn Platform>,
}

impl EventNormalizer {
    pub fn new(
        store: Arc<ActivityStore>,
        cache: Arc<MessageCache>,
        clock: Arc<ServiceClock>,
        platform: Arc<dyn Platform>,
    ) -> Self {
        Self {
            store,
            cache,
            clock,
            platform,
        }
    }

    /// Accept an event from the intake path.
    ///
    /// Events that need remote lookups (reactions) run on their own task so
    /// a slow Discord round-trip never holds up the next event; the handle
    /// is returned for callers that want to wait. Everything else is applied
    /// before this returns.
    pub fn ingest(self: &Arc<Self>, event: GatewayEvent) -> Option<JoinHandle<()>> {
        match event {
            GatewayEvent::ReactionAdd(_) | GatewayEvent::ReactionRemove(_) => {
                let this = Arc::clone(self);
                Some(tokio::spawn(async move {
                    this.dispatch(event).await;
                }))
            }
            GatewayEvent::Ready => {
                self.on_ready();
                None
            }
            GatewayEvent::MessageCreate(ref message) => {
                self.on_message_create(message);
                None
            }
            GatewayEvent::MessageDelete(ref payload) => {
                self.on_message_delete(payload);
                None
            }
            GatewayEvent::VoiceStateUpdate(ref update) => {
                self.on_voice_state_update(update);
                None
            }
            GatewayEvent::Unsupported(ref name) => {
                tracing::debug!(event = %name, "Ignoring unsupported dispatch");
                None
            }
        }
    }

    /// Apply one event to completion, returning the recorded activity.
    pub async fn dispatch(&self, event: GatewayEvent) -> Option<ActivityEvent> {
        match event {
            GatewayEvent::Ready => {
                self.on_ready();
                None
            }
            GatewayEvent::MessageCreate(message) => self.on_message_create(&message),
            GatewayEvent::MessageDelete(payload) => Some(self.on_message_delete(&payload)),
            GatewayEvent::ReactionAdd(payload) => self.on_reaction_add(&payload).await,
            GatewayEvent::ReactionRemove(payload) => self.on_reaction_remove(&payload).await,
            GatewayEvent::VoiceStateUpdate(update) => self.on_voice_state_update(&update),
            GatewayEvent::Unsupported(name) => {
                tracing::debug!(event = %name, "Ignoring unsupported dispatch");
                None
            }
        }
    }

    /// Session is ready; start the uptime clock on the first occurrence.
    pub fn on_ready(&self) {
        if self.clock.mark_ready() {
            tracing::info!("Session ready, uptime clock started");
        } else {
            tracing::debug!("Session resumed, keeping original start time");
        }
    }

    pub fn on_message_create(&self, message: &Message) -> Option<ActivityEvent> {
        if message.author.bot {
            return None;
        }

        let link = MessageLink::new(message.guild_id, message.channel_id, message.id);
        let event = ActivityEvent::now(
            message.author.id,
            ActivityKind::MessageSent,
            format!("Sent a message: [Here]({})", link),
        );

        self.cache.put(
            message.id,
            MessageSnapshot {
                message_id: message.id,
                author_id: message.author.id,
                link,
            },
        );
        Some(self.record(event))
    }

    /// Attribute a raw deletion. Without a cached snapshot the author is
    /// unknown, so the message ID itself becomes the subject key.
    pub fn on_message_delete(&self, payload: &MessageDelete) -> ActivityEvent {
        let event = match self.cache.take(payload.id) {
            Some(snapshot) => ActivityEvent::now(
                snapshot.author_id,
                ActivityKind::MessageDeleted,
                format!("Deleted a message: [Here]({})", snapshot.link),
            ),
            None => {
                tracing::debug!(
                    message_id = payload.id,
                    channel_id = payload.channel_id,
                    "Deleted message not cached, keying by message ID"
                );
                ActivityEvent::now(
                    payload.id,
                    ActivityKind::MessageDeleted,
                    format!("Deleted a message in <#{}>", payload.channel_id),
                )
            }
        };
        self.record(event)
    }

    /// Only needs the member object the gateway attaches to the event; a
    /// member without a user record counts as unknown.
    pub async fn on_reaction_add(&self, payload: &ReactionEvent) -> Option<ActivityEvent> {
        if payload.member.as_ref().and_then(|m| m.human()).is_none() {
            return None;
        }

        let link = self.resolve_link(payload).await?;
        let event = ActivityEvent::now(
            payload.user_id,
            ActivityKind::ReactionAdded,
            format!("Added reaction {} on [this message]({})", payload.emoji, link),
        );
        Some(self.record(event))
    }

    /// Raw removals carry no member, so the user must resolve fully.
    pub async fn on_reaction_remove(&self, payload: &ReactionEvent) -> Option<ActivityEvent> {
        match self.platform.resolve_user(payload.user_id).await {
            Ok(Some(user)) if !user.bot => {}
            Ok(_) => return None,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    user_id = payload.user_id,
                    "Could not resolve reacting user, discarding"
                );
                return None;
            }
        }

        let link = self.resolve_link(payload).await?;
        let event = ActivityEvent::now(
            payload.user_id,
            ActivityKind::ReactionRemoved,
            format!(
                "Removed reaction {} from [this message]({})",
                payload.emoji, link
            ),
        );
        Some(self.record(event))
    }

    /// A move between two channels counts as joining the destination.
    /// Updates without an identifiable human member are dropped.
    pub fn on_voice_state_update(&self, update: &VoiceStateUpdate) -> Option<ActivityEvent> {
        if update.member.as_ref().and_then(|m| m.human()).is_none() {
            return None;
        }

        let before = update.before.as_ref();
        let event = match (before, update.after.as_ref()) {
            (_, Some(to)) if before.map(|c| c.id) != Some(to.id) => ActivityEvent::now(
                update.user_id,
                ActivityKind::VoiceJoined,
                format!("Joined voice channel '{}'", to.name),
            ),
            (Some(from), None) => ActivityEvent::now(
                update.user_id,
                ActivityKind::VoiceLeft,
                format!("Left voice channel '{}'", from.name),
            ),
            // Same channel (mute, deafen, stream toggles) or no channel at all
            _ => return None,
        };
        Some(self.record(event))
    }

    /// Jump link for a reaction's target message, or `None` if it cannot
    /// be resolved.
    async fn resolve_link(&self, payload: &ReactionEvent) -> Option<MessageLink> {
        if let Some(snapshot) = self.cache.peek(payload.message_id) {
            return Some(snapshot.link);
        }

        let channel = match self.platform.resolve_channel(payload.channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                tracing::debug!(channel_id = payload.channel_id, "Channel not found");
                return None;
            }
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    channel_id = payload.channel_id,
                    "Channel lookup failed"
                );
                return None;
            }
        };

        match self.platform.fetch_message(&channel, payload.message_id).await {
            Ok(Some(message)) => Some(MessageLink::new(
                message.guild_id.or(payload.guild_id),
                message.channel_id,
                message.id,
            )),
            Ok(None) => {
                tracing::debug!(message_id = payload.message_id, "Message not found");
                None
            }
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    message_id = payload.message_id,
                    "Message fetch failed"
                );
                None
            }
        }
    }

    fn record(&self, event: ActivityEvent) -> ActivityEvent {
        tracing::debug!(
            user_id = event.user_id,
            kind = ?event.kind,
            "Recorded activity"
        );
        self.store.record(event.user_id, event.clone());
        event
    }
}
