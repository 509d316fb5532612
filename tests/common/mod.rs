// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use dashmap::DashMap;
use presence_tracker::config::Config;
use presence_tracker::error::AppError;
use presence_tracker::models::gateway::{
    Emoji, MessageDelete, ReactionEvent, VoiceChannelRef, VoiceStateUpdate,
};
use presence_tracker::models::{Channel, Member, Message, User};
use presence_tracker::routes::create_router;
use presence_tracker::AppState;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub const GUILD_ID: u64 = 1;

/// In-memory stand-in for Discord.
#[derive(Default)]
pub struct MockPlatform {
    pub channels: DashMap<u64, Channel>,
    pub messages: DashMap<u64, Message>,
    pub users: DashMap<u64, User>,
    /// Make every lookup fail as if the API were unreachable
    pub failing: AtomicBool,
    pub channel_lookups: AtomicUsize,
    pub message_fetches: AtomicUsize,
}

#[allow(dead_code)]
impl MockPlatform {
    pub fn add_channel(&self, id: u64) {
        self.channels.insert(
            id,
            Channel {
                id,
                guild_id: Some(GUILD_ID),
                name: Some(format!("channel-{}", id)),
            },
        );
    }

    /// Add a message as the REST API would return it (no guild_id).
    pub fn add_message(&self, channel_id: u64, message_id: u64, author: User) {
        self.messages.insert(
            message_id,
            Message {
                id: message_id,
                channel_id,
                guild_id: None,
                author,
            },
        );
    }

    pub fn add_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Platform("mock outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl presence_tracker::services::Platform for MockPlatform {
    async fn resolve_channel(&self, channel_id: u64) -> Result<Option<Channel>, AppError> {
        self.channel_lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.channels.get(&channel_id).map(|c| c.value().clone()))
    }

    async fn fetch_message(
        &self,
        channel: &Channel,
        message_id: u64,
    ) -> Result<Option<Message>, AppError> {
        self.message_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .messages
            .get(&message_id)
            .filter(|m| m.channel_id == channel.id)
            .map(|m| {
                let mut message = m.value().clone();
                message.guild_id = message.guild_id.or(channel.guild_id);
                message
            }))
    }

    async fn resolve_user(&self, user_id: u64) -> Result<Option<User>, AppError> {
        self.check()?;
        Ok(self.users.get(&user_id).map(|u| u.value().clone()))
    }
}

/// Create app state around a fresh mock platform.
#[allow(dead_code)]
pub fn create_test_state() -> (Arc<AppState>, Arc<MockPlatform>) {
    let platform = Arc::new(MockPlatform::default());
    let state = Arc::new(AppState::new(Config::test_default(), platform.clone()));
    (state, platform)
}

/// Create a test app with offline mock dependencies.
/// Returns the router, the shared state and the mock platform.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MockPlatform>) {
    let (state, platform) = create_test_state();
    (create_router(state.clone()), state, platform)
}

#[allow(dead_code)]
pub fn user(id: u64) -> User {
    User {
        id,
        username: format!("user{}", id),
        bot: false,
    }
}

#[allow(dead_code)]
pub fn bot(id: u64) -> User {
    User {
        id,
        username: format!("bot{}", id),
        bot: true,
    }
}

#[allow(dead_code)]
pub fn member(user: User) -> Member {
    Member { user: Some(user) }
}

#[allow(dead_code)]
pub fn message(author: User, channel_id: u64, message_id: u64) -> Message {
    Message {
        id: message_id,
        channel_id,
        guild_id: Some(GUILD_ID),
        author,
    }
}

#[allow(dead_code)]
pub fn delete(channel_id: u64, message_id: u64) -> MessageDelete {
    MessageDelete {
        id: message_id,
        channel_id,
        guild_id: Some(GUILD_ID),
    }
}

#[allow(dead_code)]
pub fn reaction(
    user_id: u64,
    member: Option<Member>,
    channel_id: u64,
    message_id: u64,
) -> ReactionEvent {
    ReactionEvent {
        user_id,
        channel_id,
        message_id,
        guild_id: Some(GUILD_ID),
        member,
        emoji: Emoji {
            id: None,
            name: Some("👍".to_string()),
            animated: false,
        },
    }
}

#[allow(dead_code)]
pub fn voice(
    user: User,
    before: Option<(u64, &str)>,
    after: Option<(u64, &str)>,
) -> VoiceStateUpdate {
    let channel = |(id, name): (u64, &str)| VoiceChannelRef {
        id,
        name: name.to_string(),
    };
    VoiceStateUpdate {
        user_id: user.id,
        guild_id: Some(GUILD_ID),
        member: Some(member(user)),
        before: before.map(channel),
        after: after.map(channel),
    }
}
