// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gateway dispatches forwarded by the session bridge.
//!
//! The bridge posts each dispatch as `{"t": "<EVENT_NAME>", "d": {...}}`.
//! Voice state updates are forwarded with both the previous and the new
//! channel, since the bridge owns the voice state cache.

use super::platform::{snowflake, Member, Message};
use serde::Deserialize;
use std::fmt;

/// Raw dispatch envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchEnvelope {
    pub t: String,
    #[serde(default)]
    pub d: serde_json::Value,
}

/// A gateway dispatch this service understands.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    /// Session became ready; the payload is not needed
    Ready,
    MessageCreate(Message),
    MessageDelete(MessageDelete),
    ReactionAdd(ReactionEvent),
    ReactionRemove(ReactionEvent),
    VoiceStateUpdate(VoiceStateUpdate),
    /// Any other dispatch name; accepted and ignored
    Unsupported(String),
}

impl GatewayEvent {
    /// Decode the payload of a dispatch envelope according to its name.
    pub fn from_envelope(envelope: DispatchEnvelope) -> Result<Self, serde_json::Error> {
        let DispatchEnvelope { t, d } = envelope;
        Ok(match t.as_str() {
            "READY" => Self::Ready,
            "MESSAGE_CREATE" => Self::MessageCreate(serde_json::from_value(d)?),
            "MESSAGE_DELETE" => Self::MessageDelete(serde_json::from_value(d)?),
            "MESSAGE_REACTION_ADD" => Self::ReactionAdd(serde_json::from_value(d)?),
            "MESSAGE_REACTION_REMOVE" => Self::ReactionRemove(serde_json::from_value(d)?),
            "VOICE_STATE_UPDATE" => Self::VoiceStateUpdate(serde_json::from_value(d)?),
            _ => Self::Unsupported(t),
        })
    }

    /// Dispatch name, for logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Ready => "READY",
            Self::MessageCreate(_) => "MESSAGE_CREATE",
            Self::MessageDelete(_) => "MESSAGE_DELETE",
            Self::ReactionAdd(_) => "MESSAGE_REACTION_ADD",
            Self::ReactionRemove(_) => "MESSAGE_REACTION_REMOVE",
            Self::VoiceStateUpdate(_) => "VOICE_STATE_UPDATE",
            Self::Unsupported(name) => name,
        }
    }
}

/// Raw message deletion: IDs only, no content or author.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageDelete {
    #[serde(with = "snowflake")]
    pub id: u64,
    #[serde(with = "snowflake")]
    pub channel_id: u64,
    #[serde(default, with = "snowflake::option")]
    pub guild_id: Option<u64>,
}

/// Raw reaction add/remove.
///
/// `member` is only present on guild reaction adds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionEvent {
    #[serde(with = "snowflake")]
    pub user_id: u64,
    #[serde(with = "snowflake")]
    pub channel_id: u64,
    #[serde(with = "snowflake")]
    pub message_id: u64,
    #[serde(default, with = "snowflake::option")]
    pub guild_id: Option<u64>,
    #[serde(default)]
    pub member: Option<Member>,
    pub emoji: Emoji,
}

/// Reaction emoji; custom emoji carry an ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Emoji {
    #[serde(default, with = "snowflake::option")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("_");
        match self.id {
            Some(id) if self.animated => write!(f, "<a:{}:{}>", name, id),
            Some(id) => write!(f, "<:{}:{}>", name, id),
            None => f.write_str(name),
        }
    }
}

/// A voice channel a member was or is connected to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceChannelRef {
    #[serde(with = "snowflake")]
    pub id: u64,
    pub name: String,
}

/// Voice state transition for one member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceStateUpdate {
    #[serde(with = "snowflake")]
    pub user_id: u64,
    #[serde(default, with = "snowflake::option")]
    pub guild_id: Option<u64>,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub before: Option<VoiceChannelRef>,
    #[serde(default)]
    pub after: Option<VoiceChannelRef>,
}
