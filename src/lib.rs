// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presence tracker: remembers what each community member did last.
//!
//! This crate ingests Discord gateway dispatches (messages, reactions,
//! voice state changes), keeps the latest activity per member in memory,
//! and answers `check` and `status` commands.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{
    ActivityStore, EventNormalizer, MessageCache, Platform, QueryService, ServiceClock,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub clock: Arc<ServiceClock>,
    pub store: Arc<ActivityStore>,
    pub message_cache: Arc<MessageCache>,
    pub normalizer: Arc<EventNormalizer>,
    pub query_service: QueryService,
}

impl AppState {
    /// Wire up fresh in-memory state around a platform client.
    pub fn new(config: Config, platform: Arc<dyn Platform>) -> Self {
        let clock = Arc::new(ServiceClock::new());
        let store = Arc::new(ActivityStore::new());
        let message_cache = Arc::new(MessageCache::new());

        let normalizer = Arc::new(EventNormalizer::new(
            store.clone(),
            message_cache.clone(),
            clock.clone(),
            platform,
        ));
        let query_service = QueryService::new(store.clone(), clock.clone());

        Self {
            config,
            clock,
            store,
            message_cache,
            normalizer,
            query_service,
        }
    }
}
