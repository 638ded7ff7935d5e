use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of entity a peer identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerNamespace {
    User,
    Chat,
    Channel,
    SecretChat,
}

impl PeerNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeerNamespace::User => "user",
            PeerNamespace::Chat => "chat",
            PeerNamespace::Channel => "channel",
            PeerNamespace::SecretChat => "secret_chat",
        }
    }
}

impl fmt::Display for PeerNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeerNamespace {
    type Err = ParsePeerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(PeerNamespace::User),
            "chat" => Ok(PeerNamespace::Chat),
            "channel" => Ok(PeerNamespace::Channel),
            "secret_chat" => Ok(PeerNamespace::SecretChat),
            other => Err(ParsePeerIdError::UnknownNamespace(other.to_string())),
        }
    }
}

/// Namespace-qualified peer identifier
///
/// The same numeric id may exist in several namespaces, so the namespace is
/// part of the identity. Rendered as `namespace:id`, e.g. `user:777000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId {
    pub namespace: PeerNamespace,
    pub id: i64,
}

impl PeerId {
    pub fn new(namespace: PeerNamespace, id: i64) -> Self {
        Self { namespace, id }
    }

    /// Identifier in the user namespace
    pub fn user(id: i64) -> Self {
        Self::new(PeerNamespace::User, id)
    }

    pub fn is_user(&self) -> bool {
        self.namespace == PeerNamespace::User
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}

impl FromStr for PeerId {
    type Err = ParsePeerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, id) = s
            .split_once(':')
            .ok_or_else(|| ParsePeerIdError::MissingSeparator(s.to_string()))?;
        let namespace = namespace.parse()?;
        let id = id
            .parse::<i64>()
            .map_err(|_| ParsePeerIdError::InvalidId(id.to_string()))?;
        Ok(Self { namespace, id })
    }
}

/// Errors produced when parsing a `namespace:id` string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePeerIdError {
    #[error("peer id '{0}' is missing the ':' separator")]
    MissingSeparator(String),

    #[error("unknown peer namespace '{0}'")]
    UnknownNamespace(String),

    #[error("invalid numeric peer id '{0}'")]
    InvalidId(String),
}
