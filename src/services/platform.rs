// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Discord lookups used while normalizing events.
//!
//! Handles:
//! - Channel resolution (local cache first, REST fetch on miss)
//! - Message fetches for reaction targets
//! - User resolution for raw reaction removals

use crate::error::AppError;
use crate::models::{Channel, Message, User};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::Arc;

/// Lookups against the chat platform.
///
/// `Ok(None)` means the object does not exist or is not visible to the bot.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn resolve_channel(&self, channel_id: u64) -> Result<Option<Channel>, AppError>;

    async fn fetch_message(
        &self,
        channel: &Channel,
        message_id: u64,
    ) -> Result<Option<Message>, AppError>;

    async fn resolve_user(&self, user_id: u64) -> Result<Option<User>, AppError>;
}

/// Discord REST API client.
#[derive(Clone)]
pub struct DiscordRestClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    channels: Arc<DashMap<u64, Channel>>,
}

impl DiscordRestClient {
    /// Create a new client authenticating as a bot.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            channels: Arc::new(DashMap::new()),
        }
    }

    /// Number of channels held locally.
    pub fn cached_channels(&self) -> usize {
        self.channels.len()
    }

    /// GET a JSON object, mapping 404 to `None`.
    async fn get_optional<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
    ) -> Result<Option<T>, AppError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                tracing::warn!(path, "Discord rate limit hit (429)");
            }
            return Err(AppError::Platform(format!("HTTP {}: {}", status, body)));
        }

        let value = response
            .json::<T>()
            .await
            .map_err(|e| AppError::Platform(format!("Failed to parse response: {}", e)))?;
        Ok(Some(value))
    }
}

#[async_trait]
impl Platform for DiscordRestClient {
    async fn resolve_channel(&self, channel_id: u64) -> Result<Option<Channel>, AppError> {
        if let Some(channel) = self.channels.get(&channel_id) {
            return Ok(Some(channel.value().clone()));
        }

        let channel: Option<Channel> = self
            .get_optional(&format!("/channels/{}", channel_id))
            .await?;
        if let Some(ref channel) = channel {
            self.channels.insert(channel_id, channel.clone());
        }
        Ok(channel)
    }

    async fn fetch_message(
        &self,
        channel: &Channel,
        message_id: u64,
    ) -> Result<Option<Message>, AppError> {
        let message: Option<Message> = self
            .get_optional(&format!("/channels/{}/messages/{}", channel.id, message_id))
            .await?;

        // REST message objects omit guild_id; take it from the channel.
        Ok(message.map(|mut m| {
            m.guild_id = m.guild_id.or(channel.guild_id);
            m
        }))
    }

    async fn resolve_user(&self, user_id: u64) -> Result<Option<User>, AppError> {
        self.get_optional(&format!("/users/{}", user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TOKEN: &str = "test-token";

    fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
        match headers.get("authorization").and_then(|h| h.to_str().ok()) {
            Some(h) if h == format!("Bot {}", TOKEN) => Ok(()),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }

    async fn channel(
        State(hits): State<Arc<AtomicUsize>>,
        headers: HeaderMap,
        Path(channel_id): Path<u64>,
    ) -> Result<Json<Value>, StatusCode> {
        authorized(&headers)?;
        hits.fetch_add(1, Ordering::SeqCst);
        match channel_id {
            10 => Ok(Json(json!({"id": "10", "guild_id": "1", "name": "general"}))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn message(
        headers: HeaderMap,
        Path((channel_id, message_id)): Path<(u64, u64)>,
    ) -> Result<Json<Value>, StatusCode> {
        authorized(&headers)?;
        match (channel_id, message_id) {
            // REST message objects carry no guild_id
            (10, 200) => Ok(Json(json!({
                "id": "200",
                "channel_id": "10",
                "author": {"id": "9", "username": "alice"}
            }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn user(
        headers: HeaderMap,
        Path(user_id): Path<u64>,
    ) -> Result<Json<Value>, StatusCode> {
        authorized(&headers)?;
        match user_id {
            4 => Ok(Json(json!({"id": "4", "username": "bob"}))),
            500 => Err(StatusCode::INTERNAL_SERVER_ERROR),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    /// Serve a minimal Discord API on an ephemeral port.
    async fn spawn_discord() -> (DiscordRestClient, Arc<AtomicUsize>) {
        let channel_hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/channels/{channel_id}", get(channel))
            .route("/channels/{channel_id}/messages/{message_id}", get(message))
            .route("/users/{user_id}", get(user))
            .with_state(channel_hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (
            DiscordRestClient::new(format!("http://{}", addr), TOKEN),
            channel_hits,
        )
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = DiscordRestClient::new("https://discord.com/api/v10/", "token");
        assert_eq!(client.base_url, "https://discord.com/api/v10");
        assert_eq!(client.cached_channels(), 0);
    }

    #[tokio::test]
    async fn test_not_found_is_none() {
        let (client, _) = spawn_discord().await;

        assert_eq!(client.resolve_user(404).await.unwrap(), None);
        assert_eq!(client.resolve_channel(404).await.unwrap(), None);
        assert_eq!(client.cached_channels(), 0);
    }

    #[tokio::test]
    async fn test_server_error_is_platform_error() {
        let (client, _) = spawn_discord().await;

        match client.resolve_user(500).await {
            Err(AppError::Platform(msg)) => assert!(msg.contains("500")),
            other => panic!("expected platform error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolve_user() {
        let (client, _) = spawn_discord().await;

        let user = client.resolve_user(4).await.unwrap().expect("user exists");
        assert_eq!(user.username, "bob");
        assert!(!user.bot);
    }

    #[tokio::test]
    async fn test_fetched_message_takes_channel_guild() {
        let (client, _) = spawn_discord().await;

        let channel = client
            .resolve_channel(10)
            .await
            .unwrap()
            .expect("channel exists");
        let message = client
            .fetch_message(&channel, 200)
            .await
            .unwrap()
            .expect("message exists");

        assert_eq!(message.guild_id, Some(1));
        assert_eq!(message.author.id, 9);
        assert_eq!(client.fetch_message(&channel, 201).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_channel_fetched_once_then_cached() {
        let (client, channel_hits) = spawn_discord().await;

        let first = client.resolve_channel(10).await.unwrap();
        let second = client.resolve_channel(10).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.and_then(|c| c.name), Some("general".to_string()));
        assert_eq!(channel_hits.load(Ordering::SeqCst), 1);
        assert_eq!(client.cached_channels(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_api_is_platform_error() {
        // Port 9 (discard) is never listening.
        let client = DiscordRestClient::new("http://127.0.0.1:9", "token");
        let result = client.resolve_user(1).await;
        assert!(matches!(result, Err(AppError::Platform(_))));
    }
}
