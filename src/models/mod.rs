// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod gateway;
pub mod message;
pub mod platform;

pub use activity::{ActivityEvent, ActivityKind};
pub use gateway::GatewayEvent;
pub use message::{MessageLink, MessageSnapshot};
pub use platform::{Channel, Member, Message, User};
