// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod message_cache;
pub mod normalizer;
pub mod platform;
pub mod query;
pub mod store;

pub use message_cache::MessageCache;
pub use normalizer::EventNormalizer;
pub use platform::{DiscordRestClient, Platform};
pub use query::{QueryService, ServiceClock, StatusReport};
pub use store::ActivityStore;
