// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Discord objects as returned by the REST API and gateway.
//!
//! Only the fields this service reads are modelled. Snowflake IDs arrive as
//! JSON strings and are parsed into `u64`.

use serde::{Deserialize, Serialize};

/// Discord user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(with = "snowflake")]
    pub id: u64,
    #[serde(default)]
    pub username: String,
    /// Whether this is an automated (bot) account
    #[serde(default)]
    pub bot: bool,
}

/// Guild member; the gateway attaches this to guild-scoped events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub user: Option<User>,
}

impl Member {
    /// The member's user, if it is known and not an automated account.
    pub fn human(&self) -> Option<&User> {
        self.user.as_ref().filter(|u| !u.bot)
    }
}

/// Discord channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(with = "snowflake")]
    pub id: u64,
    #[serde(default, with = "snowflake::option")]
    pub guild_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Discord message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(with = "snowflake")]
    pub id: u64,
    #[serde(with = "snowflake")]
    pub channel_id: u64,
    /// Present on gateway dispatches, absent from REST message objects
    #[serde(default, with = "snowflake::option")]
    pub guild_id: Option<u64>,
    pub author: User,
}

/// Serde adapters for snowflake IDs (string or integer on the wire).
pub mod snowflake {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(u64),
    }

    fn parse<E: de::Error>(raw: Raw) -> Result<u64, E> {
        match raw {
            Raw::Int(v) => Ok(v),
            Raw::Str(s) => s
                .parse()
                .map_err(|_| E::custom(format!("invalid snowflake: {}", s))),
        }
    }

    pub fn serialize<S: Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        parse(Raw::deserialize(deserializer)?)
    }

    pub mod option {
        use super::{parse, Raw};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            id: &Option<u64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match id {
                Some(id) => serializer.serialize_str(&id.to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<u64>, D::Error> {
            Option::<Raw>::deserialize(deserializer)?
                .map(parse::<D::Error>)
                .transpose()
        }
    }
}
